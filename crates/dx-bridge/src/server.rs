use std::future::Future;
use std::net::SocketAddr;
use std::sync::Arc;

use dx_backend::DataBackend;
use tokio::net::TcpListener;
use tracing::{error, info};

use crate::http_api::api_router;

/// Bind the listener. Port 0 picks a free port.
pub async fn bind(host: &str, port: u16) -> std::io::Result<TcpListener> {
    let listener = TcpListener::bind((host, port)).await?;
    info!(addr = %listener.local_addr()?, "bridge listening");
    Ok(listener)
}

/// Serve `backend` on `listener` until `shutdown` resolves.
pub async fn serve(
    listener: TcpListener,
    backend: Arc<dyn DataBackend>,
    shutdown: impl Future<Output = ()> + Send + 'static,
) -> std::io::Result<()> {
    let mode = backend.mode();
    let addr: Option<SocketAddr> = listener.local_addr().ok();
    info!(%mode, ?addr, "serving data backend");
    let result = axum::serve(listener, api_router(backend))
        .with_graceful_shutdown(shutdown)
        .await;
    if let Err(e) = &result {
        error!(error = %e, "bridge server error");
    }
    info!("bridge stopped");
    result
}
