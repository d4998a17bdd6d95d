//! Assign a work package to the authenticated user

use colored::Colorize;
use serde::{Deserialize, Serialize};

use crate::config::Config;
use crate::prelude::*;
use crate::{openproject, ui};

/// Options for the assign-me command
#[derive(Debug, clap::Args, Serialize, Deserialize, Clone)]
pub struct AssignMeOptions {
    /// Work package id
    pub id: u64,
}

/// Handle the assign-me command
pub async fn handler(options: AssignMeOptions) -> Result<()> {
    let config = Config::load()?;
    let client = openproject::Client::new(&config)?;

    let spinner = ui::spinner("Resolving the current user...");
    let user = client.current_user().await;
    spinner.finish_and_clear();
    let user = user?;

    let spinner = ui::spinner("Assigning work package...");
    let assigned = client.assign_to_user(options.id, user.id).await;
    spinner.finish_and_clear();
    assigned?;

    std::println!(
        "\n{}\n",
        format!("Work package #{} assigned to {}", options.id, user.name)
            .green()
            .bold()
    );

    Ok(())
}
