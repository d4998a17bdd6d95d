//! Create work packages

use clap::Args;
use colored::Colorize;
use serde::{Deserialize, Serialize};

use opcli_core::work_package::CreatedWorkPackage;

use crate::config::Config;
use crate::prelude::{println, *};
use crate::{openproject, ui};

/// Create a new work package
#[derive(Args, Debug, Serialize, Deserialize, Clone)]
pub struct CreateOptions {
    /// Subject/title of the work package (required)
    pub subject: String,

    /// Long-form description (markdown)
    #[arg(long, short = 'd', default_value = "")]
    pub description: String,

    /// Work package type (e.g. Task, Bug, Feature); the project default is
    /// used when omitted
    #[arg(long = "type", value_name = "TYPE")]
    pub kind: Option<String>,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

/// Create a work package in the configured project.
pub async fn create_work_package_data(options: &CreateOptions) -> Result<CreatedWorkPackage> {
    let config = Config::load()?;
    let client = openproject::Client::new(&config)?;

    let created = client
        .create_work_package(&options.subject, &options.description, options.kind.as_deref())
        .await?;

    Ok(created)
}

/// Handle the create command
pub async fn handler(options: CreateOptions) -> Result<()> {
    let spinner = ui::spinner("Creating work package...");
    let created = create_work_package_data(&options).await;
    spinner.finish_and_clear();
    let created = created?;

    if options.json {
        println!("{}", serde_json::to_string_pretty(&created)?);
    } else {
        std::println!(
            "\n{}\n",
            format!("Created work package #{}: {}", created.id, created.subject)
                .green()
                .bold()
        );
    }

    Ok(())
}
