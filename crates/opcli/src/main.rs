use clap::Parser;

use crate::prelude::*;

mod clipboard;
mod config;
mod ollama;
mod openproject;
mod prelude;
mod ui;
mod wp;

#[derive(Debug, clap::Parser)]
#[command(
    author,
    version,
    about,
    long_about = "op is a CLI to manage work packages and other OpenProject entities over its REST API"
)]
pub struct App {
    #[command(subcommand)]
    pub command: SubCommands,

    #[clap(flatten)]
    global: Global,
}

#[derive(Debug, Clone, clap::Args)]
pub struct Global {
    /// Whether to display additional information.
    #[clap(long, env = "OPCLI_VERBOSE", global = true, default_value = "false")]
    verbose: bool,
}

#[derive(Debug, clap::Parser)]
pub enum SubCommands {
    /// Work package operations
    Wp(crate::wp::App),
}

#[tokio::main]
async fn main() -> Result<()> {
    env_logger::init();
    color_eyre::install()?;

    let app = App::parse();

    match app.command {
        SubCommands::Wp(sub_app) => crate::wp::run(sub_app, app.global).await,
    }
}
