use std::sync::Arc;

use clap::Parser;
use tokio::sync::watch;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use signage_display::{
    config::Config,
    display::{engine::DisplayEngine, video::AutoplayPlayer},
    router,
    services::{
        api::HttpContentSource,
        clock::SystemClock,
        poller::{DisplayStatus, Poller},
    },
    AppState,
};

#[derive(Parser)]
#[command(name = "display-agent", about = "Campus signage display agent")]
struct Args {
    /// Content API base URL (overrides API_BASE_URL)
    #[arg(long)]
    api_url: Option<String>,

    /// Poll once, print the rendered frame as JSON and exit
    #[arg(long)]
    once: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let _ = dotenvy::dotenv();

    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::from_default_env())
        .with(tracing_subscriber::fmt::layer())
        .init();

    let args = Args::parse();
    let mut config = Config::from_env()?;
    if let Some(url) = args.api_url {
        config.api_base_url = url;
    }

    let source = Arc::new(HttpContentSource::new(config.api_base_url.clone()));
    let engine = DisplayEngine::new(&config, Box::new(AutoplayPlayer));
    let mut poller = Poller::new(engine, source, Arc::new(SystemClock));

    if args.once {
        poller.start().await;
        println!("{}", serde_json::to_string_pretty(&poller.status())?);
        return Ok(());
    }

    let (status_tx, status_rx) = watch::channel(DisplayStatus::default());
    info!("Polling {} every {} ms", config.api_base_url, config.poll_interval_ms);
    tokio::spawn(poller.run(status_tx));

    let app = router(AppState { display: status_rx });

    let addr = format!("{}:{}", config.host, config.port);
    info!("Display agent listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
