use portico::Collaborators;
use portico_config::ConfigModule;
use portico_server::{build_app, config::AppConfig};
use tracing::error;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_target(false)
        .init();

    if let Err(e) = run().await {
        error!("{e:#}");
        std::process::exit(1);
    }
}

async fn run() -> anyhow::Result<()> {
    let config = ConfigModule::<AppConfig>::load()?;
    let mode = config.get_ref().mode_config()?;

    let app = build_app(mode, Collaborators::in_memory()).await?;
    app.listen().await
}
