use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Container image vulnerability intelligence
#[derive(Parser, Debug)]
#[command(name = "image-vuln-intel")]
#[command(version)]
#[command(
    about = "Ingest container image ancestries and page through vulnerability notifications",
    long_about = None
)]
pub struct Args {
    #[command(subcommand)]
    pub command: Command,
}

impl Args {
    pub fn parse_args() -> Self {
        Self::parse()
    }
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Print a fresh pagination key
    Keygen,

    /// Inspect the configuration file
    Config {
        #[command(subcommand)]
        command: ConfigCommand,
    },

    /// Issue or inspect pagination tokens
    Token {
        #[command(subcommand)]
        command: TokenCommand,
    },

    /// Ingest an ancestry from layer manifests and print it as JSON
    Ingest(IngestArgs),
}

#[derive(Subcommand, Debug)]
pub enum ConfigCommand {
    /// Load and validate the configuration, then print a summary
    Check {
        /// Path to the YAML configuration file
        #[arg(short, long)]
        config: Option<PathBuf>,
    },
}

#[derive(Subcommand, Debug)]
pub enum TokenCommand {
    /// Seal a page cursor into a token
    Issue {
        /// Path to the YAML configuration file
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Offset into the old vulnerability's layers
        #[arg(long, default_value_t = 0, value_parser = clap::value_parser!(i64).range(0..))]
        old: i64,

        /// Offset into the new vulnerability's layers
        #[arg(long, default_value_t = 0, value_parser = clap::value_parser!(i64).range(0..))]
        new: i64,
    },

    /// Open a token and print the page cursor it carries
    Inspect {
        /// Path to the YAML configuration file
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Token to open
        token: String,
    },
}

#[derive(clap::Args, Debug)]
pub struct IngestArgs {
    /// Path to the YAML configuration file
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Name of the ancestry
    #[arg(short, long)]
    pub name: String,

    /// Image format of the layers
    #[arg(short, long, default_value = "Docker")]
    pub format: String,

    /// Layer manifest, root first. Can be specified multiple times:
    /// --layer base.json --layer app.json
    #[arg(short, long = "layer", value_name = "MANIFEST", required = true)]
    pub layers: Vec<String>,

    /// Header sent with every layer fetch, as NAME=VALUE. Can be specified
    /// multiple times
    #[arg(short = 'H', long = "header", value_name = "NAME=VALUE", value_parser = parse_header)]
    pub headers: Vec<(String, String)>,

    /// Include the features of the terminal layer
    #[arg(long)]
    pub with_features: bool,

    /// Include the vulnerabilities affecting each feature
    #[arg(long)]
    pub with_vulnerabilities: bool,
}

fn parse_header(value: &str) -> Result<(String, String), String> {
    match value.split_once('=') {
        Some((name, header_value)) if !name.trim().is_empty() => {
            Ok((name.trim().to_string(), header_value.to_string()))
        }
        _ => Err(format!("expected NAME=VALUE, got '{}'", value)),
    }
}
