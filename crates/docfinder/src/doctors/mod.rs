use crate::prelude::{println, *};
use docfinder_core::DoctorRecord;

pub mod search;
pub mod source;
pub mod specialties;
pub mod suggest;

pub use source::{DoctorSource, DEFAULT_API_URL};

#[derive(Debug, clap::Subcommand)]
pub enum Commands {
    /// List doctors matching a search, filters and sort order
    #[clap(name = "search")]
    Search(search::SearchOptions),

    /// Suggest up to three doctors whose name contains the given text
    #[clap(name = "suggest")]
    Suggest(suggest::SuggestOptions),

    /// List every specialty available as a filter
    #[clap(name = "specialties")]
    Specialties(specialties::SpecialtiesOptions),
}

pub async fn run(command: Commands, global: crate::Global) -> Result<()> {
    if global.verbose {
        println!("Doctor directory: {}", global.api_url);
        println!();
    }

    match command {
        Commands::Search(options) => search::run(options, global).await,
        Commands::Suggest(options) => suggest::run(options, global).await,
        Commands::Specialties(options) => specialties::run(options, global).await,
    }
}

/// Fetch the full doctor list once for this invocation
///
/// Any acquisition failure is reported as an error the user can retry, never as
/// an empty directory.
pub async fn load_directory(global: &crate::Global) -> Result<Vec<DoctorRecord>> {
    let source = DoctorSource::new(global.api_url.clone());

    match source.fetch_all().await {
        Ok(doctors) => Ok(doctors),
        Err(err) => {
            log::warn!("Doctor list unavailable from {}: {err}", source.url());
            Err(err).wrap_err("Failed to load doctors. Please try again later.")
        }
    }
}
