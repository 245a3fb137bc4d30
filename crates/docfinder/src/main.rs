use crate::prelude::*;
use clap::Parser;

mod doctors;
mod error;
mod prelude;

#[derive(Debug, clap::Parser)]
#[command(
    author,
    version,
    about,
    long_about = "Search a doctor directory by name, consultation mode and specialty. \
                  Every view is described by a query string that can be shared or bookmarked."
)]
pub struct App {
    #[command(subcommand)]
    pub command: doctors::Commands,

    #[clap(flatten)]
    global: Global,
}

#[derive(Debug, Clone, clap::Args)]
pub struct Global {
    /// Endpoint serving the doctor list as a JSON array
    #[clap(
        long,
        env = "DOCFINDER_API_URL",
        global = true,
        default_value = doctors::DEFAULT_API_URL
    )]
    api_url: String,

    /// Whether to display additional information.
    #[clap(long, env = "DOCFINDER_VERBOSE", global = true, default_value = "false")]
    verbose: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    env_logger::init();
    color_eyre::install()?;

    let app = App::parse();

    crate::doctors::run(app.command, app.global).await
}
