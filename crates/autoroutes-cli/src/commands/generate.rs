use super::{load_generator, print_report};
use crate::ProjectArgs;
use anyhow::{Context, Result};
use colored::Colorize;

pub fn execute(args: &ProjectArgs) -> Result<()> {
    println!("{}", "Generating routes...".green().bold());

    let mut generator = load_generator(args)?;
    let report = generator.generate(None).context("Route generation failed")?;

    print_report(&report);
    Ok(())
}
