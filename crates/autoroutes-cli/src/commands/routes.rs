use super::load_generator;
use crate::ProjectArgs;
use anyhow::{Context, Result};
use autoroutes::RouteOutput;
use colored::Colorize;

pub fn execute(args: &ProjectArgs, json: bool) -> Result<()> {
    let mut generator = load_generator(args)?;
    let output = generator.build(None).context("Failed to build route table")?;

    if json {
        println!("{}", serde_json::to_string_pretty(&output)?);
    } else {
        print!("{}", render_table(&output));
    }

    Ok(())
}

/// Plain-text listing: one route per line, layouts marked
fn render_table(output: &RouteOutput) -> String {
    let width = output.routes.values().map(|r| r.path.len()).max().unwrap_or(0);
    let mut out = String::new();

    for record in output.routes.values() {
        let kind = if record.is_layout {
            format!("{:<6}", "layout").yellow()
        } else {
            format!("{:<6}", "page").normal()
        };
        let parent = record
            .parent_id
            .as_deref()
            .map(|p| format!(" ← {}", p).dimmed().to_string())
            .unwrap_or_default();

        out.push_str(&format!(
            "{:<width$}  {}  {}{}\n",
            record.path,
            kind,
            record.id.cyan(),
            parent,
            width = width
        ));
    }

    out
}
