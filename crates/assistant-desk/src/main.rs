mod settings;
mod shell;

use anyhow::Context;
use assistant_desk_client::{
    AssistantRegistry, AssistantsApi, DeskError, OpenAIAssistantsClient, QueryPipeline,
};
use clap::{Parser, Subcommand};
use std::process::ExitCode;
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use settings::Settings;
use shell::QueryOutcome;

#[derive(Debug, Parser)]
#[command(name = "assistant-desk", version, about = "Query OpenAI assistants from the terminal")]
struct Args {
    /// Override the API base URL (e.g. a local proxy)
    #[arg(long, env = "OPENAI_BASE_URL")]
    base_url: Option<String>,

    /// Delay between run status checks
    #[arg(long)]
    poll_interval_ms: Option<u64>,

    /// Give up on a run after this many seconds
    #[arg(long)]
    max_wait_secs: Option<u64>,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// List the assistants available to this account
    List,
    /// Send one question to an assistant and print the answer
    Ask {
        /// Assistant id, list position (1-based) or name
        #[arg(short, long)]
        assistant: String,
        #[arg(required = true, num_args = 1..)]
        text: Vec<String>,
    },
    /// Pick assistants and ask questions until an empty line or EOF
    Interactive,
}

#[tokio::main]
async fn main() -> ExitCode {
    // Load .env file
    dotenvy::dotenv().ok();

    let args = Args::parse();

    match run(args).await {
        Ok(code) => code,
        Err(Failure::Config(err)) => {
            eprintln!("[error] Configuration Error: {:#}", err);
            ExitCode::from(2)
        }
        Err(Failure::Runtime(err)) => {
            match err.downcast_ref::<DeskError>() {
                Some(desk_err) => shell::print_notification(&desk_err.notification()),
                None => eprintln!("[error] Error: {:#}", err),
            }
            ExitCode::FAILURE
        }
    }
}

/// Configuration problems exit with 2, everything else with 1
enum Failure {
    Config(anyhow::Error),
    Runtime(anyhow::Error),
}

impl From<anyhow::Error> for Failure {
    fn from(err: anyhow::Error) -> Self {
        Failure::Runtime(err)
    }
}

impl From<DeskError> for Failure {
    fn from(err: DeskError) -> Self {
        if err.is_config() {
            Failure::Config(err.into())
        } else {
            Failure::Runtime(err.into())
        }
    }
}

async fn run(args: Args) -> Result<ExitCode, Failure> {
    let mut settings = Settings::load()
        .context("Failed to load configuration")
        .map_err(Failure::Config)?;

    if let Some(base_url) = args.base_url {
        settings.api.base_url = base_url;
    }
    if let Some(interval) = args.poll_interval_ms {
        settings.poll.interval_ms = interval;
    }
    if let Some(max_wait) = args.max_wait_secs {
        settings.poll.max_wait_secs = max_wait;
    }

    init_logging(&settings);

    let client_config = settings.client_config()?;
    tracing::info!("Using API at {}", client_config.base_url);

    let client: Arc<dyn AssistantsApi> = Arc::new(OpenAIAssistantsClient::new(&client_config)?);
    let registry = AssistantRegistry::load(client.as_ref()).await?;
    let pipeline = QueryPipeline::new(client, client_config.poll);

    match args.command.unwrap_or(Command::Interactive) {
        Command::List => shell::print_assistants(&registry),
        Command::Ask { assistant, text } => {
            let assistant = registry.select(&assistant)?;
            let question = text.join(" ");
            tracing::info!("Asking {} ({})", shell::display_name(assistant), assistant.id);

            match shell::dispatch_query(&pipeline, assistant.id.clone(), question).await? {
                QueryOutcome::Answered(answer) => println!("{}", answer),
                QueryOutcome::Failed(err) => return Err(err.into()),
                QueryOutcome::Interrupted => return Ok(ExitCode::from(130)),
            }
        }
        Command::Interactive => shell::interactive(&registry, &pipeline).await?,
    }

    Ok(ExitCode::SUCCESS)
}

fn init_logging(settings: &Settings) {
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&settings.logging.level))
        .unwrap_or_else(|_| EnvFilter::new("warn"));

    let registry = tracing_subscriber::registry().with(env_filter);

    // stdout carries answers only
    match settings.logging.format.as_str() {
        "json" => {
            registry
                .with(tracing_subscriber::fmt::layer().json().with_writer(std::io::stderr))
                .init();
        }
        "compact" => {
            registry
                .with(tracing_subscriber::fmt::layer().compact().with_writer(std::io::stderr))
                .init();
        }
        _ => {
            registry
                .with(tracing_subscriber::fmt::layer().pretty().with_writer(std::io::stderr))
                .init();
        }
    }
}
