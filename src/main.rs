//! chat-gateway: quota-gated chat completion gateway
//!
//! Accepts chat requests, enforces per-user daily quotas, forwards to an
//! upstream chat-completion API, and records usage.

use chat_gateway::api::{serve, AppState};
use chat_gateway::clock::SystemClock;
use chat_gateway::llm::mock::MockChatModel;
use chat_gateway::llm::openai::OpenAiChat;
use chat_gateway::llm::ChatModel;
use chat_gateway::usage::{QuotaPolicy, UsageLedger, UsageStore};
use chat_gateway::GatewayConfig;
use sqlx::sqlite::SqlitePoolOptions;
use std::path::Path;
use std::sync::Arc;
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize logging
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "chat_gateway=info,tower_http=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting chat-gateway v{}", env!("CARGO_PKG_VERSION"));

    // Load configuration
    let config = if let Some(config_path) = std::env::args().nth(1) {
        info!("Loading configuration from {}", config_path);
        GatewayConfig::from_file(Path::new(&config_path))?
    } else {
        info!("No config file specified, using development defaults");
        GatewayConfig::development()
    };
    config.validate()?;

    // Open the usage store
    let pool = SqlitePoolOptions::new().connect(&config.database.url).await?;

    let store = UsageStore::new(pool.clone(), Arc::new(SystemClock));
    store.init_db().await?;

    let ledger = UsageLedger::new(pool.clone());
    let policy = QuotaPolicy::from_config(&config.quota);

    // Select the chat model (mock for keyless development)
    let use_mock = std::env::var("USE_MOCK_LLM")
        .map(|v| v == "true")
        .unwrap_or(false);

    let chat_model: Arc<dyn ChatModel> = if use_mock {
        warn!("USE_MOCK_LLM is set, completions will be mocked");
        Arc::new(MockChatModel::new())
    } else {
        let api_key = std::env::var("OPENAI_API_KEY").map_err(|_| {
            anyhow::anyhow!("OPENAI_API_KEY is not set (set USE_MOCK_LLM=true to run without it)")
        })?;
        Arc::new(OpenAiChat::new(api_key, &config.upstream))
    };

    info!("Chat model initialized: {}", chat_model.model_name());

    let state = Arc::new(AppState {
        store,
        ledger,
        policy,
        chat_model,
    });

    serve(&config.server.listen_addr, state).await
}
