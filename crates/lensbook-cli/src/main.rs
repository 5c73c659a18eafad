use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

mod commands;

#[derive(Parser)]
#[command(name = "lensbook")]
#[command(version, about = "Lensbook - session scheduling for photographers", long_about = None)]
struct Cli {
    /// Data directory (overrides config and LENSBOOK_DATA_DIR)
    #[arg(long, global = true)]
    data_dir: Option<PathBuf>,

    /// Log at debug level
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Validate a session form and print the normalised config
    Validate {
        #[command(flatten)]
        input: commands::SubmissionArgs,
    },
    /// Print the slots a session form would produce
    Preview {
        #[command(flatten)]
        input: commands::SubmissionArgs,
    },
    /// Create a session with its availability and images
    Create {
        /// Authenticated owner id
        #[arg(long)]
        owner: String,
        #[command(flatten)]
        input: commands::SubmissionArgs,
        /// Promotional image to upload (repeatable)
        #[arg(long = "image")]
        images: Vec<PathBuf>,
    },
    /// List an owner's sessions, newest first
    List {
        #[arg(long)]
        owner: String,
    },
    /// Show one session with its availability and images
    Show {
        #[arg(long)]
        owner: String,
        session_id: String,
    },
    /// Manage session images
    Images {
        #[command(subcommand)]
        action: ImagesAction,
    },
}

#[derive(Subcommand)]
enum ImagesAction {
    /// List a session's images, newest first
    List { session_id: String },
    /// Delete an image and its stored file
    Delete { image_id: String },
}

const LOG_TARGETS: [&str; 4] = [
    "lensbook",
    "lensbook_core",
    "lensbook_infrastructure",
    "lensbook_application",
];

/// Logs go to stderr; stdout carries command output only.
fn init_tracing(verbose: bool) {
    let level = if verbose { "debug" } else { "info" };
    let directives = LOG_TARGETS
        .iter()
        .map(|target| format!("{}={}", target, level))
        .collect::<Vec<_>>()
        .join(",");

    let filter = if verbose {
        EnvFilter::new(directives)
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(directives))
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(false)
                .with_writer(std::io::stderr),
        )
        .init();
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match cli.command {
        Commands::Validate { input } => commands::form::validate(&input)?,
        Commands::Preview { input } => commands::form::preview(&input)?,
        Commands::Create { owner, input, images } => {
            let app = commands::App::load(cli.data_dir)?;
            commands::session::create(&app, &owner, &input, &images).await?
        }
        Commands::List { owner } => {
            let app = commands::App::load(cli.data_dir)?;
            commands::session::list(&app, &owner).await?
        }
        Commands::Show { owner, session_id } => {
            let app = commands::App::load(cli.data_dir)?;
            commands::session::show(&app, &owner, &session_id).await?
        }
        Commands::Images { action } => {
            let app = commands::App::load(cli.data_dir)?;
            match action {
                ImagesAction::List { session_id } => commands::images::list(&app, &session_id).await?,
                ImagesAction::Delete { image_id } => commands::images::delete(&app, &image_id).await?,
            }
        }
    }

    Ok(())
}
