//! Jump to an item or variation by id and print its variant tree.

use anyhow::{bail, Result};
use console::style;
use nook_catalog::prelude::*;

use super::{load_data, ShowArgs};
use crate::context::Context;
use crate::output::owned_badge;

/// Run the show command.
pub fn run(args: ShowArgs, ctx: &Context) -> Result<()> {
    let mut data = load_data(&args.data, ctx)?;
    let id = ItemId::new(args.id);

    let Some(entry) = data.catalog.select_by_id(id) else {
        bail!("No item or variation with id {}", id);
    };

    if ctx.output.is_json() {
        ctx.output.json(entry);
        return Ok(());
    }

    let projection = entry.current_projection_with(&ctx.config.display.name_separator);
    let labels = entry.labels(&data.translations);

    ctx.output.header(&projection.name);
    ctx.output.kv("ID", &projection.id.to_string());
    if projection.id != entry.id {
        ctx.output.kv("Item ID", &entry.id.to_string());
    }
    ctx.output.kv("Owned", &owned_badge(entry.owned));
    ctx.output.kv("Category", labels.category_name());
    ctx.output.kv("Version", labels.version_name());
    ctx.output.kv("Size", labels.size_name());
    ctx.output.kv("Tag", labels.tag_name());
    ctx.output.kv("Series", labels.series_name());
    ctx.output.kv("Source", &join_or_empty(&labels.source_names()));
    ctx.output.kv("Colors", &join_or_empty(&labels.color_names()));
    ctx.output.kv("Themes", &join_or_empty(&labels.theme_names()));
    ctx.output.kv("Styles", &join_or_empty(&labels.style_names()));
    if let Some(buy) = entry.buy {
        ctx.output.kv("Buy", &buy.to_string());
    }
    if let Some(sell) = entry.sell {
        ctx.output.kv("Sell", &sell.to_string());
    }
    ctx.output.kv("Image", &projection.image_url);

    if !entry.has_variations {
        return Ok(());
    }

    ctx.output.header(&format!("Variants ({})", entry.variant_count()));
    let selection = entry.selection();
    for (vi, group) in entry.variant_groups.iter().enumerate() {
        for (pi, pattern) in group.patterns.iter().enumerate() {
            let name = [group.variant_name.as_str(), pattern.pattern_name.as_str()]
                .into_iter()
                .filter(|s| !s.is_empty())
                .collect::<Vec<_>>()
                .join(ctx.config.display.name_separator.as_str());
            let line = format!(
                "{} {} {}",
                if name.is_empty() { "(default)" } else { name.as_str() },
                style(format!("#{}", pattern.id)).dim(),
                style(pattern.colors.join(", ")).dim()
            );
            if selection == Selection::new(vi, pi) {
                ctx.output.list_item(&style(line).bold().to_string());
            } else {
                ctx.output.list_item(&line);
            }
        }
    }

    Ok(())
}

fn join_or_empty(values: &[&str]) -> String {
    if values.is_empty() {
        nook_catalog::i18n::EMPTY_LABEL.to_string()
    } else {
        values.join(", ")
    }
}
