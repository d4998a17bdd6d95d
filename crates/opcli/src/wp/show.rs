//! Show the details of a single work package

use serde::{Deserialize, Serialize};

use opcli_core::work_package::{transform_work_package, WorkPackageOutput};

use crate::config::Config;
use crate::prelude::{println, *};
use crate::{openproject, ui};

/// Options for showing a work package
#[derive(Debug, clap::Args, Serialize, Deserialize, Clone)]
pub struct ShowOptions {
    /// Work package id
    pub id: u64,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

/// Fetch a work package and flatten it for display.
pub async fn show_work_package_data(id: u64) -> Result<WorkPackageOutput> {
    let config = Config::load()?;
    let client = openproject::Client::new(&config)?;

    let wp = client.get_work_package(id).await?;
    Ok(transform_work_package(wp))
}

/// Handle the show command
pub async fn handler(options: ShowOptions) -> Result<()> {
    let spinner = ui::spinner("Loading work package...");
    let wp = show_work_package_data(options.id).await;
    spinner.finish_and_clear();
    let wp = wp?;

    if options.json {
        println!("{}", serde_json::to_string_pretty(&wp)?);
    } else {
        super::display_work_package(&wp);
    }

    Ok(())
}
