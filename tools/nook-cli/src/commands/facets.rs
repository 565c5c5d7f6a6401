//! Print the selectable values of each filter dimension.

use anyhow::Result;
use console::style;
use nook_catalog::prelude::*;

use super::{load_data, FacetsArgs};
use crate::context::Context;

/// Run the facets command.
pub fn run(args: FacetsArgs, ctx: &Context) -> Result<()> {
    let data = load_data(&args.data, ctx)?;
    let facets = data.catalog.facets(&data.translations);

    if ctx.output.is_json() {
        match args.dimension {
            Some(dimension) => ctx.output.json(&facets.get(dimension)),
            None => ctx.output.json(&facets),
        }
        return Ok(());
    }

    print_facets(&facets, args.dimension, ctx);
    Ok(())
}

/// Print facets, optionally a single dimension.
pub fn print_facets(facets: &Facets, only: Option<Dimension>, ctx: &Context) {
    for facet in facets.iter() {
        if only.is_some_and(|d| d != facet.dimension) {
            continue;
        }

        ctx.output.header(&format!("{} ({})", facet.name, facet.values.len()));
        if facet.is_empty() {
            ctx.output.list_item(&style("none").dim().to_string());
            continue;
        }

        for value in &facet.values {
            let item = if value.label == value.value {
                format!("{} {}", value.label, style(format!("×{}", value.count)).dim())
            } else {
                format!(
                    "{} {} {}",
                    value.label,
                    style(format!("({})", value.value)).dim(),
                    style(format!("×{}", value.count)).dim()
                )
            };
            ctx.output.list_item(&item);
        }
    }
}
