mod config;
mod controller;
mod dashboard;
mod logging;
mod models;
mod report;
mod request;
mod transport;
mod tui;

use anyhow::{anyhow, Context, Result};
use clap::{Args, Parser, Subcommand};
use config::Config;
use controller::Controller;
use request::Upload;
use std::path::PathBuf;
use std::sync::Arc;
use transport::{HttpTransport, Transport};
use tui::Prefill;

#[derive(Parser)]
#[command(name = "skillgap")]
#[command(about = "Resume vs. job description gap analysis, powered by a remote analysis service")]
struct Cli {
    /// Analysis service base URL (overrides SKILLGAP_API_URL)
    #[arg(long, global = true)]
    api_url: Option<String>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Open the interactive dashboard (default)
    Dashboard {
        #[command(flatten)]
        inputs: Inputs,
    },

    /// Run one analysis and print the result
    Analyze {
        #[command(flatten)]
        inputs: Inputs,

        /// Print the raw JSON payload instead of a report
        #[arg(long)]
        json: bool,
    },
}

#[derive(Args, Default)]
struct Inputs {
    /// Path to the resume (PDF or DOCX)
    #[arg(short, long)]
    resume: Option<PathBuf>,

    /// Job description text
    #[arg(long, conflicts_with = "jd_file")]
    jd_text: Option<String>,

    /// Path to a job description file (PDF, DOCX or TXT)
    #[arg(long)]
    jd_file: Option<PathBuf>,

    /// GitHub profile URL
    #[arg(short, long)]
    github_url: Option<String>,
}

impl Inputs {
    fn into_prefill(self) -> Prefill {
        Prefill {
            resume: self.resume.map(|p| p.display().to_string()),
            jd_text: self.jd_text,
            jd_file: self.jd_file.map(|p| p.display().to_string()),
            github_url: self.github_url,
        }
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let config = Config::from_env(cli.api_url.as_deref())?;

    match cli.command {
        Some(Commands::Analyze { inputs, json }) => {
            logging::init_stderr(&config);
            let transport = HttpTransport::new(&config.api_url)?;
            tracing::info!(endpoint = transport.endpoint(), "Using analysis service");
            run_analyze(&transport, inputs, json)
        }

        Some(Commands::Dashboard { inputs }) => run_dashboard(&config, inputs),

        None => run_dashboard(&config, Inputs::default()),
    }
}

fn run_dashboard(config: &Config, inputs: Inputs) -> Result<()> {
    logging::init_file(config)?;
    let transport: Arc<dyn Transport> = Arc::new(HttpTransport::new(&config.api_url)?);
    tracing::info!(api_url = %config.api_url, "Opening dashboard");
    tui::run_dashboard(transport, inputs.into_prefill())
}

fn run_analyze(transport: &dyn Transport, inputs: Inputs, json: bool) -> Result<()> {
    let mut controller = Controller::new();

    if let Some(path) = &inputs.resume {
        controller.set_resume(Some(
            Upload::from_path(path).context("Failed to load resume")?,
        ));
    }
    if let Some(text) = &inputs.jd_text {
        controller.set_jd_text(text);
    }
    if let Some(path) = &inputs.jd_file {
        controller.set_jd_file(Some(
            Upload::from_path(path).context("Failed to load job description")?,
        ));
    }
    if let Some(url) = &inputs.github_url {
        controller.set_github_url(url);
    }

    eprintln!("Analyzing...");
    controller.analyze(transport);

    match controller.result() {
        Some(result) if json => {
            println!("{}", serde_json::to_string_pretty(result)?);
            Ok(())
        }
        Some(result) => {
            println!("{}", report::render(result));
            Ok(())
        }
        None => Err(anyhow!(
            "{}",
            controller.error().unwrap_or("Analysis did not complete")
        )),
    }
}
