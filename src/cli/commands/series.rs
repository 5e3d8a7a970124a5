//! series command - List and inspect configured book series

use anyhow::Result;

use crate::cli::Context;
use crate::core::series::{AxisMode, BookSeries, Fragment};
use crate::ui::output;

/// List configured series, one per line.
pub fn list(ctx: &Context) -> Result<()> {
    let library = ctx.load_library()?;
    let names = library.registry().names();

    if names.is_empty() {
        output::print("No series configured.", ctx.verbosity());
        return Ok(());
    }

    output::result(output::format_list(&names, ""));
    Ok(())
}

/// Show a series' folder, axes and template.
pub fn show(ctx: &Context, name: &str) -> Result<()> {
    let library = ctx.load_library()?;
    let series = library.registry().lookup_str(name)?;
    output::result(describe(&series));
    Ok(())
}

/// Human-readable description of a series.
pub fn describe(series: &BookSeries) -> String {
    let mut lines = vec![
        format!("series:   {}", series.name()),
        format!("folder:   {}", series.folder()),
    ];

    if series.specificities().is_empty() {
        lines.push("axes:     (none)".to_string());
    } else {
        let axes: Vec<String> = series
            .specificities()
            .iter()
            .map(|spec| format!("{} {}..={}", spec.axis(), spec.min(), spec.max()))
            .collect();
        lines.push("axes:".to_string());
        lines.push(output::format_list(&axes, "  "));
    }

    let template: Vec<String> = series.template().iter().map(fragment_pattern).collect();
    lines.push(format!("template: {}", template.concat()));

    lines.join("\n")
}

/// Compact placeholder notation for one fragment.
fn fragment_pattern(fragment: &Fragment) -> String {
    match fragment {
        Fragment::Literal(text) => text.clone(),
        Fragment::Axis {
            axis,
            pad,
            mode: AxisMode::Numeric,
        } if *pad > 0 => format!("{{{}:{}}}", axis, pad),
        Fragment::Axis {
            axis,
            mode: AxisMode::Numeric,
            ..
        } => format!("{{{}}}", axis),
        Fragment::Axis {
            axis,
            mode: AxisMode::Letter,
            ..
        } => format!("{{{}:letter}}", axis),
        Fragment::Property { property } => format!("{{@{}}}", property),
        Fragment::Timestamp { timestamp } => format!("{{%{}}}", timestamp),
    }
}
