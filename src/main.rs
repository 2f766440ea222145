use anyhow::Result;
use clap::Parser;
use std::sync::Arc;
use tracing::info;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

use i18n_store::{
    cache::{ExportCache, MemoryExportCache, NullExportCache},
    config::Config,
    database::{Database, repositories::TranslationSeaOrmRepository},
    services::TranslationService,
    web::{AppState, WebServer},
};

#[derive(Parser)]
#[command(name = "i18n-store")]
#[command(version)]
#[command(about = "A key-value translation store with tagging, search and cached exports")]
#[command(long_about = None)]
struct Cli {
    /// Configuration file path
    #[arg(short, long, default_value = "config.toml")]
    config: String,

    /// Listening IP address
    #[arg(short = 'H', long, value_name = "IP")]
    host: Option<String>,

    /// Listening port
    #[arg(short, long, value_name = "PORT")]
    port: Option<u16>,

    /// Database URL (overrides config file)
    #[arg(short = 'd', long, value_name = "URL")]
    database_url: Option<String>,

    /// Log level
    #[arg(short = 'v', long, default_value = "info")]
    log_level: String,

    /// Emit logs as JSON lines
    #[arg(long)]
    log_json: bool,
}

fn init_tracing(cli: &Cli) {
    let log_filter = if cli.log_level == "trace" {
        format!("i18n_store={},tower_http=trace", cli.log_level)
    } else {
        format!("i18n_store={}", cli.log_level)
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| log_filter.into());

    if cli.log_json {
        tracing_subscriber::registry()
            .with(filter)
            .with(tracing_subscriber::fmt::layer().json())
            .init();
    } else {
        tracing_subscriber::registry()
            .with(filter)
            .with(tracing_subscriber::fmt::layer())
            .init();
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(&cli);

    info!("Starting i18n-store v{}", env!("CARGO_PKG_VERSION"));

    let mut config = Config::load_from_file(&cli.config)?;
    info!("Configuration loaded from: {}", cli.config);

    // Override config with CLI arguments
    if let Some(host) = cli.host {
        config.web.host = host;
    }
    if let Some(port) = cli.port {
        config.web.port = port;
    }
    if let Some(database_url) = cli.database_url {
        config.database.url = database_url;
    }
    config.validate()?;

    let database = Database::new(&config.database).await?;
    database.migrate().await?;
    info!(
        "Database ready ({})",
        database.database_type().as_str()
    );

    let cache: Arc<dyn ExportCache> = if config.cache.enabled {
        info!(
            "Export cache enabled: capacity={} ttl={}",
            config.cache.capacity,
            humantime::format_duration(config.cache.export_ttl)
        );
        Arc::new(MemoryExportCache::new(config.cache.capacity)?)
    } else {
        info!("Export cache disabled");
        Arc::new(NullExportCache)
    };

    let repository = Arc::new(TranslationSeaOrmRepository::new(database.connection()));
    let translation_service = Arc::new(TranslationService::new(
        repository,
        cache,
        config.cache.export_ttl,
    ));

    let server = WebServer::new(
        &config.web,
        AppState {
            translation_service,
            database,
        },
    )?;
    info!("Listening on http://{}", server.addr());

    server.serve().await
}
