//! List work packages, one page at a time or all at once

use colored::Colorize;
use serde::{Deserialize, Serialize};

use opcli_core::work_package::{transform_page, transform_work_package, ListOutput};

use crate::config::Config;
use crate::prelude::{println, *};
use crate::{openproject, ui};

/// Options for listing work packages
#[derive(Debug, clap::Args, Serialize, Deserialize, Clone)]
pub struct ListOptions {
    /// Page number
    #[arg(short, long, default_value = "1")]
    pub page: usize,

    /// Items per page
    #[arg(short = 's', long = "size", default_value = "70")]
    pub size: usize,

    /// Fetch every work package instead of a single page
    #[arg(short, long)]
    pub all: bool,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

/// Fetch one locally computed page of the project's work packages.
pub async fn list_page_data(page: usize, page_size: usize) -> Result<ListOutput> {
    let config = Config::load()?;
    let client = openproject::Client::new(&config)?;

    let page = client.list_page(page, page_size).await?;
    Ok(transform_page(page))
}

/// Handle the list command
pub async fn handler(options: ListOptions) -> Result<()> {
    if options.page < 1 || options.size < 1 {
        return Err(eyre!("--page and --size must be at least 1"));
    }

    if options.all {
        let config = Config::load()?;
        let client = openproject::Client::new(&config)?;

        let spinner = ui::spinner("Loading work packages...");
        let all = client.list_all().await;
        spinner.finish_and_clear();

        let items: Vec<_> = all?.into_iter().map(transform_work_package).collect();

        if options.json {
            println!("{}", serde_json::to_string_pretty(&items)?);
            return Ok(());
        }

        std::println!(
            "\n{}\n",
            format!("Work packages ({})", items.len()).bold()
        );
        for wp in &items {
            super::display_row(wp);
        }
        std::println!();
        return Ok(());
    }

    let spinner = ui::spinner("Loading work packages...");
    let page = list_page_data(options.page, options.size).await;
    spinner.finish_and_clear();
    let page = page?;

    if options.json {
        println!("{}", serde_json::to_string_pretty(&page)?);
        return Ok(());
    }

    std::println!(
        "\n{}",
        format!("Work packages ({} total)", page.total).bold()
    );
    std::println!(
        "{}\n",
        format!("Page {} of {}", page.page, page.total_pages).yellow()
    );

    for wp in &page.items {
        super::display_row(wp);
    }

    if page.has_next {
        std::println!(
            "\n{}",
            format!("Use --page {} to see more", page.page + 1).yellow()
        );
    }
    std::println!();

    Ok(())
}
