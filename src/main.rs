use clap::{Args, Parser, Subcommand};
use colored::Colorize;
use lessmay::{LogFormat, Settings};
use std::path::PathBuf;
use tracing::debug;

mod logging;
mod show_conflicts;

#[derive(Parser)]
#[command(name = "lessmay")]
#[command(version)]
#[command(about = "Clean up Syncthing sync-conflict copies in an Obsidian vault")]
struct Cli {
    #[command(flatten)]
    global: GlobalArgs,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Args)]
struct GlobalArgs {
    /// Config file (default is ~/.lessmay.toml)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Log line format (default is text)
    #[arg(long, global = true, value_enum)]
    log_format: Option<LogFormat>,

    /// Paths to skip (can be specified multiple times, default is .trash)
    #[arg(long = "skip-path", global = true)]
    skip_paths: Vec<String>,
}

#[derive(Subcommand)]
enum Commands {
    /// Remove identical sync-conflict copies and show diffs for the rest
    ShowConflicts {
        /// Directories to scan (default is the Obsidian vault)
        dirs: Vec<String>,

        /// Default Obsidian vault path
        #[arg(short, long)]
        default_path: Option<String>,

        #[arg(long, help = "Output reports as JSON lines")]
        json: bool,
    },
    /// Print the version number of lessmay
    Version,
}

fn main() {
    let cli = Cli::parse();

    match cli.command {
        Some(Commands::ShowConflicts {
            dirs,
            default_path,
            json,
        }) => {
            let mut settings = load_settings(&cli.global);
            if let Some(path) = default_path {
                settings.default_path = Some(path);
            }

            let roots = match show_conflicts::root_paths(&dirs, &settings) {
                Ok(roots) => roots,
                Err(e) => fail(e),
            };

            let skip_paths = settings.skip_substrings();
            if let Err(e) = show_conflicts::run_show_conflicts(&roots, &skip_paths, json) {
                fail(e);
            }
        }
        Some(Commands::Version) => println!("lessmay {}", env!("CARGO_PKG_VERSION")),
        None => {
            println!("lessmay v{}", env!("CARGO_PKG_VERSION"));
            println!("Try 'lessmay --help' for more information.");
        }
    }
}

/// Read the settings file, apply flag overrides and start logging
fn load_settings(args: &GlobalArgs) -> Settings {
    let loaded = match &args.config {
        Some(path) => Settings::load(path).map(|s| Some((s, path.clone()))),
        None => Settings::load_default(),
    };
    let (mut settings, source) = match loaded {
        Ok(Some((settings, path))) => (settings, Some(path)),
        Ok(None) => (Settings::default(), None),
        Err(e) => fail(e),
    };

    settings.verbose |= args.verbose;
    if let Some(format) = args.log_format {
        settings.log_format = format;
    }
    if !args.skip_paths.is_empty() {
        settings.skip_paths = args.skip_paths.clone();
    }

    logging::init_logging(settings.verbose, settings.log_format);
    if let Some(path) = source {
        debug!(path = %path.display(), "Using config file");
    }

    settings
}

fn fail(e: impl std::fmt::Display) -> ! {
    eprintln!("{} {}", "Error:".red().bold(), e);
    std::process::exit(1);
}
