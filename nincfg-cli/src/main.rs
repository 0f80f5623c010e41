// CLI application
use clap::Parser;
use nincfg_cli::commands::{check_record, edit_record, show_record};
use nincfg_cli::settings::EditorSettings;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "nincfg")]
#[command(about = "Nintendont nincfg.bin editor")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(clap::Subcommand)]
enum Commands {
    /// Print every editable field of a record
    Show {
        /// Path to nincfg.bin (default from settings)
        path: Option<PathBuf>,

        /// Emit the fields as JSON
        #[arg(long)]
        json: bool,
    },
    /// Report what loading a record would clear or repair
    Check {
        /// Path to nincfg.bin (default from settings)
        path: Option<PathBuf>,
    },
    /// Edit a record interactively
    Edit {
        /// Path to nincfg.bin (default from settings)
        path: Option<PathBuf>,

        /// Read input from a gamepad instead of stdin
        #[arg(long)]
        gamepad: bool,
    },
}

fn main() -> anyhow::Result<()> {
    env_logger::init();

    let cli = Cli::parse();
    let settings = EditorSettings::load()?;

    match cli.command {
        Commands::Show { path, json } => {
            show_record(&settings.resolve_record_path(path), json)?;
        }
        Commands::Check { path } => {
            let repairs = check_record(&settings.resolve_record_path(path))?;
            if repairs > 0 {
                log::warn!("Record needed {} repair(s)", repairs);
            }
        }
        Commands::Edit { path, gamepad } => {
            edit_record(&settings.resolve_record_path(path), &settings, gamepad)?;
        }
    }

    Ok(())
}
