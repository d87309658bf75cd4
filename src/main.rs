use std::fs;
use std::io::Read;
use std::path::PathBuf;

use clap::{CommandFactory, Parser, Subcommand};
use clap_complete::Shell;

use sidediff::Diff;

#[derive(Parser)]
#[command(name = "sidediff")]
#[command(about = "Parse unified diffs into a side-by-side row model")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Parse a diff and print the full model as JSON
    Parse {
        /// Diff file to read; stdin when omitted
        file: Option<PathBuf>,
        /// Pretty-print the JSON output
        #[arg(long)]
        pretty: bool,
    },
    /// Print aggregate statistics for a diff
    Summary {
        /// Diff file to read; stdin when omitted
        file: Option<PathBuf>,
        /// Emit JSON instead of text
        #[arg(long)]
        json: bool,
    },
    /// Generate shell completions
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

fn load_diff(file: Option<&PathBuf>) -> Result<Diff, Box<dyn std::error::Error>> {
    let bytes = match file {
        Some(path) => fs::read(path)?,
        None => {
            let mut buffer = Vec::new();
            std::io::stdin().read_to_end(&mut buffer)?;
            buffer
        }
    };
    Ok(Diff::parse_bytes(&bytes)?)
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();
    let cli = Cli::parse();

    match cli.command {
        Commands::Parse { file, pretty } => {
            let diff = load_diff(file.as_ref())?;
            let output = if pretty {
                serde_json::to_string_pretty(&diff)?
            } else {
                serde_json::to_string(&diff)?
            };
            println!("{output}");
        }
        Commands::Summary { file, json } => {
            let summary = load_diff(file.as_ref())?.summary();
            if json {
                println!("{}", serde_json::to_string_pretty(&summary)?);
            } else {
                print!("{summary}");
            }
        }
        Commands::Completions { shell } => {
            clap_complete::generate(shell, &mut Cli::command(), "sidediff", &mut std::io::stdout());
        }
    }

    Ok(())
}
