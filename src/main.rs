mod cli;

use cli::{Args, Command, ConfigCommand, IngestArgs, TokenCommand};
use image_vuln_intel::adapters::outbound::crypto::XChaChaPageTokenCodec;
use image_vuln_intel::adapters::outbound::filesystem::ManifestLayerProcessor;
use image_vuln_intel::adapters::outbound::persistence::InMemoryDatastore;
use image_vuln_intel::application::dto::{GetAncestryRequest, LayerSource, PostAncestryRequest};
use image_vuln_intel::application::use_cases::AncestryUseCase;
use image_vuln_intel::config::{self, Config, LogFormat, LogSection, PaginationKey};
use image_vuln_intel::image_analysis::domain::PageCursor;
use image_vuln_intel::ports::inbound::AncestryPort;
use image_vuln_intel::ports::outbound::{PageTokenCodec, TokenError};
use image_vuln_intel::shared::error::{ExitCode, ServiceError};
use image_vuln_intel::shared::Result;
use image_vuln_intel::telemetry;
use owo_colors::OwoColorize;
use std::path::Path;
use std::process;
use std::sync::Arc;

#[tokio::main]
async fn main() {
    let args = Args::parse_args();

    if let Err(e) = run(args).await {
        eprintln!("\n{} An error occurred:\n", "❌".red());
        eprintln!("{}", e.red());

        // Display error chain
        for cause in e.chain().skip(1) {
            eprintln!("\nCaused by: {}", cause);
        }

        eprintln!();
        process::exit(exit_code_for(&e).as_i32());
    }
}

async fn run(args: Args) -> Result<()> {
    match args.command {
        Command::Keygen => {
            telemetry::init(&LogSection::default());
            println!("{}", PaginationKey::generate().encode());
            Ok(())
        }
        Command::Config {
            command: ConfigCommand::Check { config },
        } => {
            let config = load(config.as_deref())?;
            print_summary(&config);
            Ok(())
        }
        Command::Token { command } => run_token(command),
        Command::Ingest(ingest) => run_ingest(ingest).await,
    }
}

/// Loads the configuration and installs logging from it.
fn load(path: Option<&Path>) -> Result<Config> {
    let config = config::load_config(path)?;
    telemetry::init(&config.log);

    if config.pagination_key_generated {
        tracing::warn!(
            "no pagination key configured; generated one for this process, \
             tokens will not survive a restart"
        );
    }

    Ok(config)
}

fn codec(config: &Config) -> XChaChaPageTokenCodec {
    XChaChaPageTokenCodec::new(&config.pagination_key).with_max_age(config.token_ttl)
}

fn run_token(command: TokenCommand) -> Result<()> {
    match command {
        TokenCommand::Issue { config, old, new } => {
            let config = load(config.as_deref())?;
            let token = codec(&config).encode(&PageCursor::new(old, new))?;
            println!("{}", token);
        }
        TokenCommand::Inspect { config, token } => {
            let config = load(config.as_deref())?;
            let cursor = codec(&config).decode(&token)?;
            println!("{}", serde_json::to_string_pretty(&cursor)?);
        }
    }
    Ok(())
}

async fn run_ingest(args: IngestArgs) -> Result<()> {
    let config = load(args.config.as_deref())?;

    let datastore = Arc::new(InMemoryDatastore::new());
    let processor =
        ManifestLayerProcessor::new(config.supported_formats.clone(), config.max_manifest_bytes);
    let use_case = AncestryUseCase::new(datastore, processor);

    let layers = args
        .layers
        .iter()
        .map(|path| {
            args.headers
                .iter()
                .fold(LayerSource::new(path.as_str()), |source, (name, value)| {
                    source.with_header(name.as_str(), value.as_str())
                })
        })
        .collect();
    let posted = use_case
        .post_ancestry(PostAncestryRequest::new(
            args.name.as_str(),
            args.format.as_str(),
            layers,
        ))
        .await?;
    tracing::info!(
        ancestry = args.name.as_str(),
        engine_version = posted.engine_version,
        "ancestry stored"
    );

    let response = use_case
        .get_ancestry(GetAncestryRequest::new(
            args.name.as_str(),
            args.with_features,
            args.with_vulnerabilities,
        ))
        .await?;

    println!("{}", serde_json::to_string_pretty(&response)?);
    Ok(())
}

fn print_summary(config: &Config) {
    let key = if config.pagination_key_generated {
        "generated (not persisted)"
    } else {
        "configured"
    };
    let ttl = match config.token_ttl {
        Some(ttl) => format!("{}s", ttl.as_secs()),
        None => "none".to_string(),
    };
    let log_format = match config.log.format {
        LogFormat::Compact => "compact",
        LogFormat::Json => "json",
    };

    println!("{} Configuration is valid", "✅".green());
    println!("  pagination key:     {}", key);
    println!("  token ttl:          {}", ttl);
    println!("  supported formats:  {}", config.supported_formats.join(", "));
    println!("  max manifest bytes: {}", config.max_manifest_bytes);
    println!("  log:                {} ({})", config.log.level, log_format);
}

/// Rejected input exits with 2, a missing entity with 4, anything else with 3.
fn exit_code_for(error: &anyhow::Error) -> ExitCode {
    if let Some(service_error) = error.downcast_ref::<ServiceError>() {
        return ExitCode::for_service_error(service_error);
    }
    if let Some(TokenError::InvalidToken { .. }) = error.downcast_ref::<TokenError>() {
        return ExitCode::InvalidArguments;
    }
    ExitCode::ApplicationError
}
