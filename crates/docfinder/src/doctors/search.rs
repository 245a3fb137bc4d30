use crate::prelude::{println, *};
use colored::Colorize;
use docfinder_core::view::{
    build_directory_view, format_experience, format_fee, format_modes, DirectoryView,
};
use docfinder_core::{decode, query_from_url, ConsultationMode, FilterSortState, SortOption};
use prettytable::row;

use super::load_directory;

#[derive(Debug, clap::Args, Clone)]
pub struct SearchOptions {
    /// Query string or shareable link to start from (e.g. "?specialty=Dentist&sort=fees")
    #[arg(value_name = "QUERY", default_value = "")]
    pub query: String,

    /// Text to look for in doctor names
    #[arg(short, long)]
    pub search: Option<String>,

    /// Consultation mode: "Video Consult" or "In Clinic"
    #[arg(short, long)]
    pub consult: Option<ConsultationMode>,

    /// Specialty to include (repeat to include several)
    #[arg(long = "specialty", value_name = "SPECIALTY")]
    pub specialties: Vec<String>,

    /// Sort order: fees (cheapest first) or experience (most experienced first)
    #[arg(long)]
    pub sort: Option<SortOption>,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

pub async fn run(options: SearchOptions, global: crate::Global) -> Result<()> {
    let state = resolve_state(&options);

    if global.verbose {
        println!("Filters: {:?}", state);
    }

    let view = search_data(&global, state).await?;

    if options.json {
        output_json(&view)?;
    } else {
        output_formatted(&view);
    }

    Ok(())
}

/// Fetches the directory and applies the state, returning the rendered view model
pub async fn search_data(
    global: &crate::Global,
    state: FilterSortState,
) -> Result<DirectoryView> {
    let doctors = load_directory(global).await?;
    Ok(build_directory_view(&doctors, state))
}

/// Start from the positional query string and layer explicit flags on top
///
/// Flags replace the decoded value for search, consultation and sort. Specialty
/// flags are added to whatever the query string already selected.
pub fn resolve_state(options: &SearchOptions) -> FilterSortState {
    let mut state = decode(query_from_url(&options.query));

    if let Some(search) = &options.search {
        state = state.with_search(search.clone());
    }

    if options.consult.is_some() {
        state = state.with_consultation(options.consult);
    }

    for specialty in &options.specialties {
        state = state.with_specialty(specialty, true);
    }

    if options.sort.is_some() {
        state = state.with_sort(options.sort);
    }

    state
}

/// Convert the view to JSON string
fn format_search_json(view: &DirectoryView) -> Result<String> {
    serde_json::to_string_pretty(view).map_err(|e| eyre!("JSON serialization failed: {}", e))
}

/// Convert the view to formatted text with colors
fn format_search_text(view: &DirectoryView) -> String {
    let mut result = String::new();

    result.push_str(&f!("\n{}\n", "=".repeat(80).bright_cyan()));
    result.push_str(&f!("{}\n", view.heading.bright_cyan().bold()));
    result.push_str(&f!("{}\n", "=".repeat(80).bright_cyan()));

    if view.doctors.is_empty() {
        result.push_str(&f!(
            "\n{}\n",
            "Try adjusting your search or filters to find more results".yellow()
        ));
    } else {
        let mut table = new_table();
        table.set_titles(row![
            "ID",
            "Name",
            "Specialties",
            "Experience",
            "Fee",
            "Consultation",
            "Clinic"
        ]);

        for doctor in &view.doctors {
            let clinic = match (&doctor.clinic_name, &doctor.area) {
                (Some(name), Some(area)) => f!("{name}, {area}"),
                (Some(name), None) => name.clone(),
                (None, Some(area)) => area.clone(),
                (None, None) => "n/a".to_string(),
            };

            table.add_row(row![
                doctor.id,
                doctor.display_name(),
                doctor.specialties.join(", "),
                format_experience(doctor.experience_years),
                format_fee(doctor.fee),
                format_modes(&doctor.consultation_types),
                clinic
            ]);
        }

        result.push('\n');
        result.push_str(&table.to_string());
    }

    result.push_str(&f!("\n{}\n", "=".repeat(80).bright_yellow()));
    result.push_str(&f!("{}\n", "FILTERS".bright_yellow().bold()));
    result.push_str(&f!("{}\n", "=".repeat(80).bright_yellow()));

    if view.state.is_default() {
        result.push_str(&f!("\n{}\n", "No filters applied.".bright_white()));
    } else {
        result.push_str(&f!(
            "\n{}: {}\n",
            "Share this view".green(),
            f!("?{}", view.query).cyan()
        ));
        result.push_str(&f!(
            "{}: {}\n",
            "Reopen".green(),
            f!("docfinder search \"?{}\"", view.query).cyan()
        ));
    }

    result.push_str(&f!(
        "\n{}:\n",
        "Available specialties".bright_white().bold()
    ));
    result.push_str(&f!("  {}\n", view.specialties.join(", ")));

    result.push_str(&f!(
        "\n{}:\n",
        "To get JSON output".bright_white().bold()
    ));
    result.push_str(&f!("  {}\n\n", "docfinder search <query> --json".cyan()));

    result
}

fn output_json(view: &DirectoryView) -> Result<()> {
    let json = format_search_json(view)?;
    println!("{}", json);
    Ok(())
}

fn output_formatted(view: &DirectoryView) {
    print!("{}", format_search_text(view));
}
