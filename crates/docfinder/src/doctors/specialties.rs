use crate::prelude::{println, *};
use colored::Colorize;
use docfinder_core::{all_specialties, available_consultation_modes, ConsultationMode};
use serde::Serialize;

use super::load_directory;

#[derive(Debug, clap::Args, Clone)]
pub struct SpecialtiesOptions {
    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

/// Filter options offered by the directory
#[derive(Debug, Serialize)]
pub struct FilterOptions {
    pub specialties: Vec<String>,
    pub consultation_modes: Vec<ConsultationMode>,
}

pub async fn run(options: SpecialtiesOptions, global: crate::Global) -> Result<()> {
    let doctors = load_directory(&global).await?;

    let filters = FilterOptions {
        specialties: all_specialties(&doctors),
        consultation_modes: available_consultation_modes(&doctors),
    };

    if global.verbose {
        println!(
            "{} specialties across {} doctors",
            filters.specialties.len(),
            doctors.len()
        );
    }

    if options.json {
        let json = serde_json::to_string_pretty(&filters)
            .map_err(|e| eyre!("JSON serialization failed: {}", e))?;
        println!("{}", json);
    } else {
        print!("{}", format_filters_text(&filters));
    }

    Ok(())
}

fn format_filters_text(filters: &FilterOptions) -> String {
    let mut result = String::new();

    result.push_str(&f!("{}\n", "SPECIALTIES".bright_cyan().bold()));
    if filters.specialties.is_empty() {
        result.push_str(&f!("  {}\n", "(none)".yellow()));
    }
    for specialty in &filters.specialties {
        result.push_str(&f!("  {}\n", specialty));
    }

    result.push_str(&f!("\n{}\n", "CONSULTATION MODES".bright_cyan().bold()));
    for mode in &filters.consultation_modes {
        result.push_str(&f!("  {}\n", mode));
    }

    result.push_str(&f!(
        "\n{}: {}\n",
        "Filter by specialty".green(),
        "docfinder search --specialty <name>".cyan()
    ));

    result
}
