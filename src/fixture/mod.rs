pub mod samples;

use std::net::SocketAddr;
use std::thread;

use axum::routing::get;
use axum::{Json, Router};
use tokio::net::TcpListener;

use crate::model::ResultRecord;

pub use samples::sample_record;

pub const RESULT_ROUTE: &str = "/api/result";

pub fn router() -> Router {
    Router::new().route(RESULT_ROUTE, get(result))
}

async fn result() -> Json<ResultRecord> {
    log::info!("GET {RESULT_ROUTE}");
    Json(sample_record())
}

pub async fn serve(listener: TcpListener) -> std::io::Result<()> {
    if let Ok(addr) = listener.local_addr() {
        log::info!("Fixture endpoint listening on http://{addr}{RESULT_ROUTE}");
    }
    axum::serve(listener, router()).await
}

pub fn spawn_background(addr: SocketAddr) -> std::io::Result<SocketAddr> {
    let listener = std::net::TcpListener::bind(addr)?;
    listener.set_nonblocking(true)?;
    let bound = listener.local_addr()?;

    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()?;

    thread::Builder::new()
        .name("fixture-endpoint".to_string())
        .spawn(move || {
            runtime.block_on(async move {
                let served = match TcpListener::from_std(listener) {
                    Ok(listener) => serve(listener).await,
                    Err(err) => Err(err),
                };
                if let Err(err) = served {
                    log::error!("Fixture endpoint stopped: {err}");
                }
            })
        })?;

    Ok(bound)
}
