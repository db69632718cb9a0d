use brandlens_core::InteractionId;
use brandlens_gemini::GeminiClient;
use brandlens_research::{analyze_brand, search_brands, AnalyzeRequest};
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(name = "brandlens")]
#[command(about = "Brand and company research backed by grounded Gemini interactions")]
struct Cli {
    /// Sampling temperature forwarded to every model call
    #[arg(long, global = true, env = "BRANDLENS_TEMPERATURE")]
    temperature: Option<f32>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Find brands and companies related to a search term
    Search {
        /// Brand name, SKU or company name
        query: String,
    },
    /// Build a detailed profile for one brand
    Analyze {
        /// Brand to profile
        brand: String,
        /// Official homepage; omitted or empty means discover it
        homepage: Option<String>,
        /// Interaction id to continue, e.g. from a previous search
        interaction_id: Option<String>,
    },
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    match run(cli).await {
        Ok(output) => println!("{output}"),
        Err(e) => {
            eprintln!("[ERROR] {e}");
            std::process::exit(1);
        }
    }
}

async fn run(cli: Cli) -> anyhow::Result<String> {
    let config = brandlens_core::load_app_config()?;

    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(config.log_level.clone()))?;
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .init();

    let client = GeminiClient::from_config(&config)?;
    execute(&cli.command, &client, cli.temperature).await
}

/// Runs one subcommand and renders its response envelope as pretty JSON.
async fn execute(
    command: &Commands,
    client: &GeminiClient,
    temperature: Option<f32>,
) -> anyhow::Result<String> {
    let output = match command {
        Commands::Search { query } => {
            let response = search_brands(client, query, temperature).await?;
            log_continuation(response.interaction_id.as_ref());
            serde_json::to_string_pretty(&response)?
        }
        Commands::Analyze {
            brand,
            homepage,
            interaction_id,
        } => {
            let request = AnalyzeRequest::new(brand.as_str())
                .with_homepage(homepage.clone())
                .continuing(interaction_id.as_deref().and_then(InteractionId::new))
                .with_temperature(temperature);
            let response = analyze_brand(client, &request).await?;
            log_continuation(response.interaction_id.as_ref());
            serde_json::to_string_pretty(&response)?
        }
    };
    Ok(output)
}

fn log_continuation(interaction_id: Option<&InteractionId>) {
    match interaction_id {
        Some(id) => tracing::info!(interaction_id = %id, "pass this id to `analyze` to continue the dialogue"),
        None => tracing::info!("no interaction id returned"),
    }
}
