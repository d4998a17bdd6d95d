//! Create a work package from a screenshot
//!
//! The image (a file or the clipboard contents) is captioned by a local
//! Ollama vision model, the answer is parsed into a title/description pair,
//! and after confirmation a work package is created from it.

use std::io::Write;
use std::path::PathBuf;

use colored::Colorize;
use serde::{Deserialize, Serialize};

use crate::config::Config;
use crate::prelude::{eprintln, println, *};
use crate::{clipboard, ollama, openproject, ui};

/// Options for creating a work package from an image
#[derive(Debug, clap::Args, Serialize, Deserialize, Clone)]
pub struct FromImageOptions {
    /// Path to the screenshot to analyze
    pub image: Option<PathBuf>,

    /// Read the image from the system clipboard instead of a file
    #[arg(long, short = 'c')]
    pub clipboard: bool,

    /// Ollama model used for the analysis
    #[arg(long, short = 'm', env = "OPCLI_VISION_MODEL", default_value = "llava")]
    pub model: String,

    /// Create without asking for confirmation
    #[arg(long, short = 'y')]
    pub yes: bool,
}

fn confirm(prompt: &str) -> Result<bool> {
    print!("{} [Y/n]: ", prompt.purple().bold());
    std::io::stdout().flush().ok();

    let mut answer = String::new();
    std::io::stdin()
        .read_line(&mut answer)
        .map_err(|e| eyre!("failed to read from stdin: {}", e))?;

    let answer = answer.trim().to_lowercase();
    Ok(answer.is_empty() || matches!(answer.as_str(), "y" | "yes" | "s" | "sim"))
}

/// Handle the create-from-image command
pub async fn handler(options: FromImageOptions) -> Result<()> {
    let (image_path, from_clipboard) = if options.clipboard {
        let spinner = ui::spinner("Reading image from the clipboard...");
        let path = clipboard::image_from_clipboard().await;
        spinner.finish_and_clear();
        (path?, true)
    } else {
        let path = options
            .image
            .clone()
            .ok_or_eyre("provide an image path or use --clipboard")?;
        if !path.exists() {
            return Err(eyre!("file not found: {}", path.display()));
        }
        (path, false)
    };

    // Fail on configuration problems before spending two minutes on the
    // model call.
    let config = Config::load()?;

    let model = ollama::Client::new(&options.model)?;

    let spinner = ui::spinner("Analyzing the screenshot...");
    let analysis = model.analyze_screenshot(&image_path).await;
    spinner.finish_and_clear();

    if from_clipboard {
        clipboard::cleanup(&image_path).await;
    }

    let analysis = match analysis {
        Ok(analysis) => analysis,
        Err(e) => {
            eprintln!("{}", "Could not analyze the image.".red());
            eprintln!("Check that Ollama is running: ollama serve");
            eprintln!("And that the model is installed: ollama pull {}", options.model);
            return Err(e);
        }
    };

    std::println!("\n{} {}", "Title:".bright_black(), analysis.title.bold());
    std::println!("{}", "Description:".bright_black());
    std::println!("{}\n", analysis.description);

    if !options.yes && !confirm("Create work package?")? {
        println!("Aborted.");
        return Ok(());
    }

    let client = openproject::Client::new(&config)?;

    let spinner = ui::spinner("Creating work package...");
    let created = client
        .create_work_package(&analysis.title, &analysis.description, None)
        .await;
    spinner.finish_and_clear();
    let created = created?;

    std::println!(
        "\n{}\n",
        format!("Created work package #{}: {}", created.id, created.subject)
            .green()
            .bold()
    );

    Ok(())
}
