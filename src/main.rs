use clap::{Parser, ValueEnum};
use nextage_dday::{Client, Config, Mode, StashError, Synchronizer};
use std::process::ExitCode;
use std::time::Duration;

#[derive(Debug, Parser)]
#[command(
    name = "nextage-dday",
    about = "Write each performer's countdown to their next birthday into a Stash custom field"
)]
struct Cli {
    /// GraphQL endpoint; falls back to STASH_URL, then the local default
    #[arg(long, env = "STASH_URL")]
    url: Option<String>,

    /// API key sent in the ApiKey header; falls back to STASH_API_KEY
    #[arg(long, env = "STASH_API_KEY", hide_env_values = true)]
    api_key: Option<String>,

    /// How the API key is sourced and whether the field is created when missing
    #[arg(long, value_enum, default_value = "no-key")]
    mode: CliMode,

    /// Name of the performer custom field to write
    #[arg(long, default_value = nextage_dday::config::DEFAULT_FIELD_NAME)]
    field_name: String,

    /// Per-request timeout in seconds (no timeout by default)
    #[arg(long)]
    timeout_secs: Option<u64>,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum CliMode {
    NoKey,
    Fallback,
    Strict,
}

impl From<CliMode> for Mode {
    fn from(value: CliMode) -> Self {
        match value {
            CliMode::NoKey => Mode::NoKey,
            CliMode::Fallback => Mode::Fallback,
            CliMode::Strict => Mode::Strict,
        }
    }
}

#[tokio::main]
async fn main() -> ExitCode {
    dotenvy::dotenv().ok();
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();
    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("NextAgeDday failed: {err}");
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli) -> Result<(), StashError> {
    let mut config = Config::resolve(cli.mode.into(), cli.url, cli.api_key)?
        .with_field_name(cli.field_name);
    if let Some(secs) = cli.timeout_secs {
        config = config.with_timeout(Duration::from_secs(secs));
    }
    log::debug!("Resolved configuration: {:?}", config);

    let client = Client::new(&config)?;
    Synchronizer::new(&client, &config).run().await
}
