use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use colored::Colorize;
use tracing::info;

use claimsense::config::Config;
use claimsense::extraction::profiles::{ProfileDirectory, StaticProfiles};
use claimsense::gemini::{ContentGenerator, GeminiClient};

/// ClaimSense: insurance claim extraction, fraud scoring and claim assistant.
///
/// Reads hospital bills with a hosted vision model, flags likely fraud with a
/// fixed rule set, and answers claim questions in English, Hindi or Marathi.
#[derive(Parser)]
#[command(name = "claimsense", version, about)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the HTTP API (POST /upload, POST /chat)
    Serve {
        /// Port to listen on (default: PORT env var, then 5000)
        #[arg(long)]
        port: Option<u16>,

        /// Address to bind (default: BIND_ADDR env var, then 0.0.0.0)
        #[arg(long)]
        bind: Option<String>,
    },

    /// Score a saved extraction (JSON or raw model output) for fraud
    Score {
        /// File containing the extraction
        path: PathBuf,

        /// Mobile number of the policy holder to cross-check against
        #[arg(long)]
        mobile: Option<String>,

        /// Score without any reference profile
        #[arg(long, conflicts_with = "mobile")]
        no_profile: bool,
    },

    /// Detect the reply language of a chat message
    Detect {
        /// The message text
        #[arg(required = true, num_args = 1..)]
        text: Vec<String>,
    },

    /// Extract and score a bill image via the model
    Extract {
        /// Path to the bill image
        image: PathBuf,

        /// Mobile number of the policy holder to cross-check against
        #[arg(long)]
        mobile: Option<String>,

        /// Print the result as JSON instead of a summary
        #[arg(long)]
        json: bool,
    },

    /// Ping deployed services so free-tier hosts don't spin them down
    KeepAlive {
        /// Service base URL (repeatable; default: KEEPALIVE_URLS env var)
        #[arg(long = "url")]
        urls: Vec<String>,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file if present (silently ignore if missing)
    let _ = dotenvy::dotenv();

    // Set up structured logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("claimsense=info")),
        )
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Serve { port, bind } => {
            let mut config = Config::load()?;
            config.require_gemini()?;
            if let Some(port) = port {
                config.port = port;
            }
            if let Some(bind) = bind {
                config.bind_addr = bind;
            }

            let generator = create_generator(&config)?;
            let directory = StaticProfiles::demo();
            let profile_count = directory.len();
            let profiles: Arc<dyn ProfileDirectory> = Arc::new(directory);

            info!(
                model = %config.gemini_model,
                profiles = profile_count,
                origins = config.cors_origins.len(),
                "Starting ClaimSense API"
            );
            claimsense::web::run_server(config, generator, profiles).await?;
        }

        Commands::Score {
            path,
            mobile,
            no_profile,
        } => {
            let text = std::fs::read_to_string(&path)
                .with_context(|| format!("Failed to read {}", path.display()))?;
            let extracted = claimsense::extraction::parse::parse_model_output(&text)?;

            let profile = if no_profile {
                None
            } else {
                let profiles = StaticProfiles::demo();
                let profile = profiles.lookup(mobile.as_deref()).await?;
                if profile.is_none() {
                    println!(
                        "{}",
                        "No reference profile found; profile rules skipped.".dimmed()
                    );
                }
                profile
            };

            let verdict = claimsense::fraud::score(&extracted, profile.as_ref());
            let analysis = claimsense::pipeline::document::ClaimAnalysis::new(extracted, verdict);
            claimsense::output::terminal::display_claim_analysis(&analysis);
        }

        Commands::Detect { text } => {
            let text = text.join(" ");
            let language = claimsense::language::detect_language(&text);
            claimsense::output::terminal::display_language(&text, language);
        }

        Commands::Extract {
            image,
            mobile,
            json,
        } => {
            let config = Config::load()?;
            config.require_gemini()?;

            let bytes = std::fs::read(&image)
                .with_context(|| format!("Failed to read {}", image.display()))?;
            let document = claimsense::pipeline::document::DocumentImage::new(bytes, None)?;

            println!("Extracting claim fields from {}...", image.display());

            let generator = create_generator(&config)?;
            let profiles = StaticProfiles::demo();
            let analysis = claimsense::pipeline::document::analyze_document(
                generator.as_ref(),
                &profiles,
                document,
                mobile.as_deref(),
            )
            .await?;

            if json {
                println!("{}", serde_json::to_string_pretty(&analysis)?);
            } else {
                claimsense::output::terminal::display_claim_analysis(&analysis);
            }
        }

        Commands::KeepAlive { urls } => {
            let config = Config::load()?;
            let urls = if urls.is_empty() {
                config.keepalive_urls
            } else {
                urls
            };
            if urls.is_empty() {
                anyhow::bail!(
                    "No services to ping. Pass --url or set KEEPALIVE_URLS in your .env file."
                );
            }

            let targets: Vec<claimsense::keepalive::ServiceTarget> = urls
                .iter()
                .map(|u| claimsense::keepalive::ServiceTarget::from_url(u))
                .collect();

            println!(
                "{}",
                format!("Pinging {} services...", targets.len()).bold()
            );

            let client = claimsense::keepalive::build_client()?;
            let reports = claimsense::keepalive::run(&client, &targets).await;
            for report in &reports {
                claimsense::output::terminal::display_ping(report);
            }

            claimsense::output::terminal::display_keepalive_summary(&reports);
        }
    }

    Ok(())
}

/// Build the Gemini client once; everything downstream takes it by trait.
fn create_generator(config: &Config) -> Result<Arc<dyn ContentGenerator>> {
    let client = GeminiClient::new(
        &config.gemini_api_url,
        &config.gemini_model,
        config.gemini_api_key.clone(),
    )?;
    info!(model = %client.model(), "Using Gemini content generator");
    Ok(Arc::new(client))
}
