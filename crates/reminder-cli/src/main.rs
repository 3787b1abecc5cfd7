use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};

use reminder_cli::{generate_docs, reminder_api};
use reminder_lambda_shared::{init_tracing_with, LogFormat};

#[derive(Parser, Debug)]
#[command(author, version, about = "Reminder API utilities")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Generate the OpenAPI description of the reminder API.
    Docs {
        /// Host (or full URL) the API is served from.
        #[arg(long = "base-url")]
        base_url: String,
        /// Directory the description is written to.
        #[arg(long = "out-dir", default_value = "docs")]
        out_dir: PathBuf,
    },
    /// List the registered routes.
    Routes,
}

fn main() -> Result<()> {
    init_tracing_with(LogFormat::Text, "warn");
    let cli = Cli::parse();

    match cli.command {
        Command::Docs { base_url, out_dir } => {
            for path in generate_docs(&base_url, &out_dir)? {
                println!("Wrote {}", path.display());
            }
            Ok(())
        }
        Command::Routes => {
            for route in reminder_api()?.routes() {
                println!("{} {} - {}", route.method, route.path, route.spec.summary);
            }
            Ok(())
        }
    }
}
