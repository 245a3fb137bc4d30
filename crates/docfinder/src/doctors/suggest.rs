use crate::prelude::{println, *};
use colored::Colorize;
use docfinder_core::view::{build_suggestions, SuggestionOutput};
use docfinder_core::{decode, query_from_url};

use super::load_directory;

#[derive(Debug, clap::Args, Clone)]
pub struct SuggestOptions {
    /// Partial doctor name as typed so far
    #[arg(value_name = "TEXT")]
    pub partial: String,

    /// Current query string; suggestions keep its other filters
    #[arg(long, default_value = "")]
    pub query: String,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

pub async fn run(options: SuggestOptions, global: crate::Global) -> Result<()> {
    if global.verbose {
        println!("Suggesting names for {:?}", options.partial);
    }

    let output = suggest_data(&global, &options.partial, &options.query).await?;

    if options.json {
        output_json(&output)?;
    } else {
        print!("{}", format_suggestions_text(&output));
    }

    Ok(())
}

/// Fetches the directory and returns the bounded suggestion list
pub async fn suggest_data(
    global: &crate::Global,
    partial: &str,
    query: &str,
) -> Result<SuggestionOutput> {
    let doctors = load_directory(global).await?;
    let state = decode(query_from_url(query));
    Ok(build_suggestions(&doctors, partial, &state))
}

fn output_json(output: &SuggestionOutput) -> Result<()> {
    let json = serde_json::to_string_pretty(output)
        .map_err(|e| eyre!("JSON serialization failed: {}", e))?;
    println!("{}", json);
    Ok(())
}

fn format_suggestions_text(output: &SuggestionOutput) -> String {
    let mut result = String::new();

    if output.suggestions.is_empty() {
        result.push_str(&f!("{}\n", "No suggestions.".yellow()));
        return result;
    }

    for suggestion in &output.suggestions {
        result.push_str(&f!(
            "{} {}",
            suggestion.name.white().bold(),
            f!("({})", suggestion.specialties.join(", ")).bright_black()
        ));
        result.push_str(&f!(
            "\n    {}: {}\n",
            "Select".green(),
            f!("docfinder search \"?{}\"", suggestion.query).cyan()
        ));
    }

    result
}
