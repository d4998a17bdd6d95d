pub mod assign;
pub mod create;
pub mod from_image;
pub mod list;
pub mod show;

use colored::Colorize;

use opcli_core::work_package::{format_timestamp, WorkPackageOutput};

use crate::prelude::{println, *};

/// Work package module app - root command
#[derive(Debug, clap::Parser)]
#[command(name = "wp")]
#[command(about = "Manage OpenProject work packages")]
pub struct App {
    #[command(subcommand)]
    pub command: Commands,
}

/// Work package commands
#[derive(Debug, clap::Subcommand)]
pub enum Commands {
    /// List the project's work packages
    #[clap(name = "list")]
    List(list::ListOptions),

    /// Show the details of a single work package
    #[clap(name = "show")]
    Show(show::ShowOptions),

    /// Create a new work package
    #[clap(name = "create")]
    Create(create::CreateOptions),

    /// Assign a work package to the authenticated user
    #[clap(name = "assign-me")]
    AssignMe(assign::AssignMeOptions),

    /// Create a work package from a screenshot analyzed by a local model
    #[clap(name = "create-from-image")]
    CreateFromImage(from_image::FromImageOptions),
}

/// Run work package commands
pub async fn run(app: App, global: crate::Global) -> Result<()> {
    if global.verbose {
        println!("Running work package command...");
    }

    match app.command {
        Commands::List(options) => list::handler(options).await,
        Commands::Show(options) => show::handler(options).await,
        Commands::Create(options) => create::handler(options).await,
        Commands::AssignMe(options) => assign::handler(options).await,
        Commands::CreateFromImage(options) => from_image::handler(options).await,
    }
}

/// Color used for a status label, roughly following the OpenProject
/// defaults.
fn status_color(status: &str) -> colored::Color {
    match status {
        "New" => colored::Color::Blue,
        "In progress" | "In Progress" | "Doing" => colored::Color::Cyan,
        "Code review" => colored::Color::Magenta,
        "Homolog" | "On hold" => colored::Color::Yellow,
        "Done" | "Closed" => colored::Color::Green,
        "Blocked" | "Rejected" => colored::Color::Red,
        _ => colored::Color::White,
    }
}

/// Display a work package's details as a formatted CLI table.
///
/// Renders the standard detail view used by the show handler: header line,
/// metadata table, timestamps, and the raw markdown description.
fn display_work_package(wp: &WorkPackageOutput) {
    std::println!(
        "\n{} - {}\n",
        format!("#{}", wp.id).bold().purple(),
        wp.subject.bright_white()
    );

    let mut table = new_table();

    if let Some(status) = &wp.status {
        table.add_row(prettytable::row![
            "Status".bold().cyan(),
            status.color(status_color(status)).to_string()
        ]);
    }

    if let Some(kind) = &wp.kind {
        table.add_row(prettytable::row![
            "Type".bold().cyan(),
            kind.bright_blue().to_string()
        ]);
    }

    if let Some(priority) = &wp.priority {
        table.add_row(prettytable::row![
            "Priority".bold().cyan(),
            priority.bright_yellow().to_string()
        ]);
    }

    let assignee = wp.assignee.as_deref().unwrap_or("Unassigned");
    let assignee_colored = if assignee == "Unassigned" {
        assignee.bright_black().to_string()
    } else {
        assignee.bright_magenta().to_string()
    };
    table.add_row(prettytable::row![
        "Assignee".bold().cyan(),
        assignee_colored
    ]);

    if let Some(created) = &wp.created_at {
        table.add_row(prettytable::row![
            "Created".bold().cyan(),
            format_timestamp(created).bright_black().to_string()
        ]);
    }

    if let Some(updated) = &wp.updated_at {
        table.add_row(prettytable::row![
            "Updated".bold().cyan(),
            format_timestamp(updated).bright_black().to_string()
        ]);
    }

    table.printstd();

    if let Some(description) = &wp.description {
        std::println!("\n{}:", "Description".bold().cyan());
        std::println!("{}\n", description.trim());
    } else {
        std::println!();
    }
}

/// One listing row: id, status, assignee, subject.
fn display_row(wp: &WorkPackageOutput) {
    let id = format!("#{:<5}", wp.id).bold().purple();

    let status = wp.status.as_deref().unwrap_or("");
    let status = format!("{status:<12}").color(status_color(status));

    let assignee = format!("{:<20}", wp.assignee.as_deref().unwrap_or("")).bright_blue();

    std::println!("{}  {}  {}  {}", id, status, assignee, wp.subject);
}
