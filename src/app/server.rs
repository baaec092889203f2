//! Server lifecycle.
//!
//! `Server::start` returns an explicit handle owning the store connection and
//! the serve task; `stop` tears both down in order. There is no module-level
//! server state.

use std::net::SocketAddr;

use anyhow::Result;
use tokio::sync::oneshot;
use tokio::task::JoinHandle;
use tower_http::cors::{Any, CorsLayer};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::infra::config;
use crate::storage::documents::RestaurantStore;
use crate::transport;
use crate::transport::http::AppState;

pub struct Server {
    store: RestaurantStore,
    local_addr: SocketAddr,
    shutdown_tx: oneshot::Sender<()>,
    task: JoinHandle<std::io::Result<()>>,
}

impl Server {
    /// Connects to the document store, then binds and listens.
    ///
    /// Fails if either step fails; a listen failure closes the store
    /// connection before propagating.
    pub async fn start(host: &str, port: u16) -> Result<Server> {
        let store = RestaurantStore::connect(&config::database_url()).await?;

        let listener = match tokio::net::TcpListener::bind((host, port)).await {
            Ok(l) => l,
            Err(e) => {
                store.pool().close().await;
                return Err(e.into());
            }
        };
        let local_addr = listener.local_addr()?;

        let cors = CorsLayer::new().allow_origin(Any).allow_methods(Any);
        let app = transport::http::create_router(AppState {
            store: store.clone(),
        })
        .merge(
            SwaggerUi::new("/swagger-ui")
                .url("/api-docs/openapi.json", transport::http::ApiDoc::openapi()),
        )
        .layer(cors);

        let (shutdown_tx, shutdown_rx) = oneshot::channel::<()>();
        let task = tokio::spawn(async move {
            axum::serve(listener, app)
                .with_graceful_shutdown(async {
                    let _ = shutdown_rx.await;
                })
                .await
        });

        Ok(Server {
            store,
            local_addr,
            shutdown_tx,
            task,
        })
    }

    /// Closes the store connection, then shuts the listener down and waits
    /// for the serve task to finish.
    pub async fn stop(self) -> Result<()> {
        self.store.pool().close().await;
        let _ = self.shutdown_tx.send(());
        self.task.await??;
        Ok(())
    }

    pub fn local_addr(&self) -> SocketAddr {
        self.local_addr
    }

    pub fn store(&self) -> &RestaurantStore {
        &self.store
    }
}
