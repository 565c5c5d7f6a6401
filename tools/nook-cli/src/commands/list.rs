//! Browse the catalog page by page.

use anyhow::Result;
use nook_catalog::prelude::*;

use super::{load_data, ListArgs};
use crate::commands::facets::print_facets;
use crate::context::Context;
use crate::output::owned_badge;

/// Run the list command.
pub fn run(args: ListArgs, ctx: &Context) -> Result<()> {
    let mut data = load_data(&args.data, ctx)?;

    let mut query = BrowseQuery::from_config(&ctx.config)
        .with_criteria(args.criteria())
        .with_page(args.page);
    if let Some(sort) = args.sort {
        query = query.with_sort(sort);
    }
    if let Some(per_page) = args.per_page {
        query = query.with_per_page(per_page);
    }
    if args.facets {
        query = query.with_facets();
    }

    let results = data.catalog.browse(&query, &data.translations);

    if ctx.output.is_json() {
        ctx.output.json(&results);
        return Ok(());
    }

    let pagination = results.pagination;
    ctx.output.header(&format!(
        "Items ({} matching, sorted {})",
        pagination.total,
        query.sort.display_name()
    ));

    if results.is_empty() {
        ctx.output.info("No items match the current filters.");
        return Ok(());
    }

    let separator = &ctx.config.display.name_separator;
    let rows: Vec<[String; 4]> = results
        .items
        .iter()
        .map(|entry| {
            let projection = entry.current_projection_with(separator);
            [
                projection.id.to_string(),
                projection.name,
                entry.labels(&data.translations).category_name().to_string(),
                owned_badge(entry.owned),
            ]
        })
        .collect();

    let widths = column_widths(&rows);
    ctx.output.table_row(&["ID", "Name", "Category", "Owned"], &widths);
    for row in &rows {
        let cols: Vec<&str> = row.iter().map(String::as_str).collect();
        ctx.output.table_row(&cols, &widths);
    }

    let pages: Vec<String> = pagination
        .page_numbers(ctx.config.browse.page_window)
        .into_iter()
        .map(|n| {
            if n == pagination.page {
                format!("[{}]", n)
            } else {
                n.to_string()
            }
        })
        .collect();
    ctx.output.info(&format!(
        "Showing {}-{} of {} | page {} of {} | {}",
        pagination.start_item(),
        pagination.end_item(),
        pagination.total,
        pagination.page,
        pagination.total_pages,
        pages.join(" ")
    ));

    if let Some(facets) = &results.facets {
        print_facets(facets, None, ctx);
    }

    Ok(())
}

/// Widest cell per column, header included, by display width.
fn column_widths(rows: &[[String; 4]]) -> Vec<usize> {
    let mut widths: Vec<usize> = ["ID", "Name", "Category", "Owned"]
        .iter()
        .map(|h| console::measure_text_width(h))
        .collect();
    for row in rows {
        for (width, cell) in widths.iter_mut().zip(row.iter()) {
            *width = (*width).max(console::measure_text_width(cell));
        }
    }
    widths
}
