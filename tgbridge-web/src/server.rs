//! Runs the actix server on its own OS thread with its own actix `System`, so HTTP serving never
//! shares a runtime with the bot loop.

use std::io;
use std::net::SocketAddr;
use std::thread;

use actix_web::dev::{Server, ServerHandle};
use actix_web::{middleware::Logger, web, App, HttpServer};
use anyhow::{Context, Result};
use tokio::sync::oneshot;
use tracing::{error, info};

use crate::config::WebConfig;
use crate::routes;
use crate::state::AppState;

pub const WEB_THREAD_NAME: &str = "tgbridge-web";

type Ready = io::Result<(ServerHandle, Vec<SocketAddr>)>;

/// Handle to a running web thread.
pub struct WebServerHandle {
    addrs: Vec<SocketAddr>,
    handle: ServerHandle,
    thread: Option<thread::JoinHandle<io::Result<()>>>,
}

impl WebServerHandle {
    /// Addresses actually bound; differs from the config when port 0 was requested.
    pub fn addrs(&self) -> &[SocketAddr] {
        &self.addrs
    }

    /// Graceful stop: in-flight requests finish, then the thread is joined.
    pub async fn stop(mut self) -> Result<()> {
        self.handle.stop(true).await;
        if let Some(thread) = self.thread.take() {
            let joined = tokio::task::spawn_blocking(move || thread.join())
                .await
                .context("Failed to join web thread")?;
            match joined {
                Ok(result) => result.context("Web server exited with an error")?,
                Err(_) => anyhow::bail!("Web thread panicked"),
            }
        }
        info!("Web server stopped");
        Ok(())
    }
}

fn build_server(config: &WebConfig, state: AppState) -> io::Result<(Server, Vec<SocketAddr>)> {
    let data = web::Data::new(state);
    let webhook_path = config.webhook_path.clone();
    let http = HttpServer::new(move || {
        let data = data.clone();
        let webhook_path = webhook_path.clone();
        App::new()
            .wrap(Logger::default())
            .configure(move |cfg| routes::configure(cfg, data, &webhook_path))
    })
    .workers(config.workers)
    .disable_signals()
    .bind((config.host.as_str(), config.port))?;
    let addrs = http.addrs();
    Ok((http.run(), addrs))
}

/// Starts the web thread and waits until the listener is bound.
///
/// Bind failures are returned here rather than surfacing later from the thread.
pub async fn spawn_server(config: WebConfig, state: AppState) -> Result<WebServerHandle> {
    let (ready_tx, ready_rx) = oneshot::channel::<Ready>();

    let thread = thread::Builder::new()
        .name(WEB_THREAD_NAME.to_string())
        .spawn(move || {
            let system = actix_web::rt::System::new();
            system.block_on(async move {
                let (server, addrs) = match build_server(&config, state) {
                    Ok(built) => built,
                    Err(e) => {
                        let kind = e.kind();
                        let message = e.to_string();
                        let _ = ready_tx.send(Err(e));
                        return Err(io::Error::new(kind, message));
                    }
                };
                let _ = ready_tx.send(Ok((server.handle(), addrs)));
                let result = server.await;
                if let Err(e) = &result {
                    error!(error = %e, "Web server terminated with an error");
                }
                result
            })
        })
        .context("Failed to spawn web thread")?;

    let (handle, addrs) = ready_rx
        .await
        .context("Web thread exited before binding")?
        .context("Failed to bind web server")?;
    info!(addrs = ?addrs, "Web server listening");

    Ok(WebServerHandle {
        addrs,
        handle,
        thread: Some(thread),
    })
}
