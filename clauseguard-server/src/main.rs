use std::process::ExitCode;
use std::sync::Arc;

use chrono::TimeDelta;
use clap::{Parser, Subcommand};
use tracing::{error, info};
use tracing_subscriber::{fmt, EnvFilter};

use clauseguard_ai::{AiClient, Provider};
use clauseguard_common::models::Identity;
use clauseguard_core::auth::{SessionTokenResolver, SessionTokens};
use clauseguard_core::crypto::TokenCipher;
use clauseguard_core::http::{router, serve, AppState};
use clauseguard_core::repositories::PostgresRecordRepository;
use clauseguard_core::{ContractActions, Database, Error};

mod config;
use config::{parse_token_ttl_hours, ConfigStatus, RawConfig, ServerConfig, ENV_SESSION_KEY};

#[derive(Parser, Debug)]
#[command(name = "clauseguard-server")]
#[command(author, version, about = "ClauseGuard - contract actions HTTP server")]
struct Args {
    /// Postgres connection string
    #[arg(long, env = "CLAUSEGUARD_DATABASE_URL", hide_env_values = true)]
    database_url: Option<String>,

    /// Base64 encoded 32-byte key used to seal session tokens
    #[arg(long, env = "CLAUSEGUARD_SESSION_KEY", hide_env_values = true)]
    session_key: Option<String>,

    /// Model provider: gemini, openai or anthropic
    #[arg(long, env = "CLAUSEGUARD_MODEL_PROVIDER")]
    model_provider: Option<String>,

    #[arg(long, env = "CLAUSEGUARD_MODEL_API_KEY", hide_env_values = true)]
    model_api_key: Option<String>,

    /// Model name (defaults per provider)
    #[arg(long, env = "CLAUSEGUARD_MODEL")]
    model: Option<String>,

    /// Override the provider's API base URL
    #[arg(long, env = "CLAUSEGUARD_MODEL_API_BASE")]
    model_api_base: Option<String>,

    /// Address to listen on
    #[arg(long, env = "CLAUSEGUARD_BIND_ADDR")]
    bind_addr: Option<String>,

    /// Lifetime of issued session tokens, in hours
    #[arg(long, env = "CLAUSEGUARD_TOKEN_TTL_HOURS")]
    token_ttl_hours: Option<String>,

    /// Upper bound on tokens per model reply
    #[arg(long, env = "CLAUSEGUARD_MODEL_MAX_TOKENS")]
    model_max_tokens: Option<String>,

    /// Sampling temperature, 0 to 2
    #[arg(long, env = "CLAUSEGUARD_MODEL_TEMPERATURE")]
    model_temperature: Option<String>,

    /// Extra system instruction sent with every model request
    #[arg(long, env = "CLAUSEGUARD_MODEL_SYSTEM_PROMPT")]
    model_system_prompt: Option<String>,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Run the HTTP server (default)
    Serve,
    /// Mint a session token for a user
    IssueToken {
        #[arg(long)]
        user_id: String,

        #[arg(long)]
        email: Option<String>,
    },
    /// Print a fresh random session key
    GenerateKey,
}

impl Args {
    fn raw_config(&self) -> RawConfig {
        let clean = |v: &Option<String>| v.clone().filter(|s| !s.trim().is_empty());
        RawConfig {
            database_url: clean(&self.database_url),
            session_key: clean(&self.session_key),
            model_provider: clean(&self.model_provider),
            model_api_key: clean(&self.model_api_key),
            model: clean(&self.model),
            model_api_base: clean(&self.model_api_base),
            bind_addr: clean(&self.bind_addr),
            token_ttl_hours: clean(&self.token_ttl_hours),
            model_max_tokens: clean(&self.model_max_tokens),
            model_temperature: clean(&self.model_temperature),
            model_system_prompt: clean(&self.model_system_prompt),
        }
    }
}

fn init_tracing() {
    let filter = EnvFilter::from_default_env()
        .add_directive("clauseguard=info".parse().unwrap_or_default());
    let sub = fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .finish();
    if let Err(e) = tracing::subscriber::set_global_default(sub) {
        eprintln!("Failed to set global subscriber: {}", e);
    }
}

#[tokio::main]
async fn main() -> ExitCode {
    dotenv::dotenv().ok();
    init_tracing();
    let args = Args::parse();
    let raw = args.raw_config();

    let result = match args.command.unwrap_or(Command::Serve) {
        Command::Serve => {
            info!("ClauseGuard server starting.");
            raw.log_summary();
            match ServerConfig::validate(raw) {
                ConfigStatus::Ready(cfg) => run_server(cfg).await,
                ConfigStatus::Misconfigured { missing, invalid } => {
                    for var in &missing {
                        error!("Missing required setting {}", var);
                    }
                    for problem in &invalid {
                        error!("Invalid setting {}", problem);
                    }
                    return ExitCode::FAILURE;
                }
            }
        }
        Command::IssueToken { user_id, email } => issue_token(&raw, &user_id, email),
        Command::GenerateKey => TokenCipher::generate_base64_key().map(|key| println!("{}", key)),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("Fatal [{}]: {}", e.kind(), e);
            ExitCode::FAILURE
        }
    }
}

async fn run_server(cfg: ServerConfig) -> Result<(), Error> {
    // 1) Model provider
    let model = Provider::create(cfg.provider_config())?;
    info!("Using model provider '{}' with model '{}'", model.name(), cfg.model);
    let ai = Arc::new(AiClient::with_provider(model).await);

    // 2) Postgres
    let db = Database::new(&cfg.database_url).await?;
    db.migrate().await?;
    let records = Arc::new(PostgresRecordRepository::new(db.pool().clone()));

    // 3) Session tokens
    let tokens = Arc::new(session_tokens(&cfg.session_key, cfg.token_ttl_hours)?);
    let identity = Arc::new(SessionTokenResolver::new(tokens));

    // 4) HTTP
    let actions = Arc::new(ContractActions::new(identity, records, ai));
    let app = router(AppState { actions });

    serve(cfg.bind_addr, app, async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            error!("Failed to listen for Ctrl-C: {:?}", e);
        }
        info!("Ctrl-C detected; shutting down.");
    })
    .await
}

fn session_tokens(session_key: &str, ttl_hours: i64) -> Result<SessionTokens, Error> {
    let ttl = TimeDelta::try_hours(ttl_hours)
        .ok_or_else(|| Error::Config(format!("token lifetime of {} hours is out of range", ttl_hours)))?;
    let cipher = TokenCipher::from_base64_key(session_key)?;
    Ok(SessionTokens::new(cipher, ttl))
}

fn issue_token(raw: &RawConfig, user_id: &str, email: Option<String>) -> Result<(), Error> {
    let key = raw
        .session_key
        .as_deref()
        .ok_or_else(|| Error::Config(format!("{} is required to issue tokens", ENV_SESSION_KEY)))?;
    let ttl_hours = match raw.token_ttl_hours.as_deref() {
        Some(v) => parse_token_ttl_hours(v).map_err(Error::Config)?,
        None => clauseguard_core::auth::DEFAULT_TOKEN_TTL_HOURS,
    };

    let mut identity = Identity::new(user_id);
    if let Some(email) = email {
        identity = identity.with_email(email);
    }

    let token = session_tokens(key, ttl_hours)?.issue(&identity)?;
    info!("Issued session token for user {} (valid {}h)", identity.user_id, ttl_hours);
    println!("{}", token);
    Ok(())
}
