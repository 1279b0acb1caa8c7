use minicat::app::{InMemoryAccounts, Router, StaticFiles};
use minicat::config::Config;
use minicat::server::Server;
use minicat::session::SessionStore;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_target(false)
        .with_level(true)
        .init();

    let cfg = Config::load()?;

    let router = Router::new(
        InMemoryAccounts::new(),
        StaticFiles::new(cfg.static_files.root.clone()),
        SessionStore::with_idle_timeout(cfg.session.idle_timeout()),
    );

    let server = Server::bind(&cfg.server.listen_addr, router)
        .await?
        .configure(&cfg);

    server
        .serve_with_shutdown(async {
            if let Err(e) = tokio::signal::ctrl_c().await {
                tracing::error!("Failed to listen for shutdown signal: {}", e);
                std::future::pending::<()>().await;
            }
            tracing::info!("Shutdown signal received");
        })
        .await
}
