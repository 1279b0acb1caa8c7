use std::future::Future;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use tokio::net::TcpListener;
use tokio::sync::Semaphore;
use tokio::task::JoinSet;
use tracing::info;

use crate::app::{AccountService, ResourceResolver, Router};
use crate::config::{Config, DEFAULT_SHUTDOWN_GRACE_SECS};
use crate::http::connection::Connection;

/// Pause after a failed accept so persistent errors such as EMFILE don't spin.
const ACCEPT_BACKOFF: Duration = Duration::from_millis(100);

/// Accepts connections and runs each one in its own task.
pub struct Server<A, R> {
    listener: TcpListener,
    router: Arc<Router<A, R>>,
    limit: Option<Arc<Semaphore>>,
    read_timeout: Option<Duration>,
    shutdown_grace: Duration,
}

impl<A, R> Server<A, R>
where
    A: AccountService,
    R: ResourceResolver,
{
    pub async fn bind(addr: &str, router: Router<A, R>) -> anyhow::Result<Self> {
        let listener = TcpListener::bind(addr).await?;
        info!("Listening on {}", listener.local_addr()?);

        Ok(Self {
            listener,
            router: Arc::new(router),
            limit: None,
            read_timeout: None,
            shutdown_grace: Duration::from_secs(DEFAULT_SHUTDOWN_GRACE_SECS),
        })
    }

    /// Applies the connection limit, read timeout and shutdown grace period
    /// from `cfg`.
    pub fn configure(mut self, cfg: &Config) -> Self {
        self.limit = cfg
            .server
            .max_connections
            .map(|max| Arc::new(Semaphore::new(max)));
        self.read_timeout = cfg.server.read_timeout();
        self.shutdown_grace = cfg.server.shutdown_grace();
        self
    }

    pub fn local_addr(&self) -> anyhow::Result<SocketAddr> {
        Ok(self.listener.local_addr()?)
    }

    /// Serves until `shutdown` resolves, then stops accepting and waits for
    /// in-flight connections to finish. Connections still open once the
    /// grace period has passed are aborted.
    pub async fn serve_with_shutdown<F>(self, shutdown: F) -> anyhow::Result<()>
    where
        F: Future<Output = ()>,
    {
        let Server {
            listener,
            router,
            limit,
            read_timeout,
            shutdown_grace,
        } = self;

        let mut tasks = JoinSet::new();
        tokio::pin!(shutdown);

        loop {
            let permit = match &limit {
                Some(semaphore) => Some(tokio::select! {
                    permit = semaphore.clone().acquire_owned() => permit?,
                    _ = &mut shutdown => break,
                }),
                None => None,
            };

            tokio::select! {
                accepted = listener.accept() => {
                    let (socket, peer) = match accepted {
                        Ok(accepted) => accepted,
                        Err(e) => {
                            tracing::warn!(error = %e, "Failed to accept connection");
                            tokio::time::sleep(ACCEPT_BACKOFF).await;
                            continue;
                        }
                    };
                    info!("Accepted connection from {}", peer);

                    let router = Arc::clone(&router);
                    tasks.spawn(async move {
                        let _permit = permit;
                        let mut conn = Connection::new(socket, router).with_read_timeout(read_timeout);
                        if let Err(e) = conn.run().await {
                            tracing::error!("Connection error from {}: {}", peer, e);
                        }
                    });
                }

                Some(_) = tasks.join_next(), if !tasks.is_empty() => {}

                _ = &mut shutdown => break,
            }
        }

        drop(listener);
        info!(in_flight = tasks.len(), "Shutting down, waiting for connections");

        let drain = async { while tasks.join_next().await.is_some() {} };
        if tokio::time::timeout(shutdown_grace, drain).await.is_err() {
            tracing::warn!(
                remaining = tasks.len(),
                grace = ?shutdown_grace,
                "Grace period elapsed, aborting open connections"
            );
            tasks.abort_all();
            while tasks.join_next().await.is_some() {}
        }

        Ok(())
    }
}
