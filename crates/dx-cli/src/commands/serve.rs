use tracing::info;

use super::Context;

/// Serve the active backend until ctrl-c.
pub async fn run(ctx: &Context, host: Option<String>, port: Option<u16>) -> anyhow::Result<()> {
    let host = host.unwrap_or_else(|| ctx.config.bridge.host.clone());
    let port = port.unwrap_or(ctx.config.bridge.port);
    let listener = dx_bridge::bind(&host, port).await?;
    info!("API: http://{}/api/v1", listener.local_addr()?);

    let shutdown = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %e, "failed to listen for ctrl-c");
            return;
        }
        info!("ctrl-c received, shutting down");
    };
    dx_bridge::serve(listener, ctx.backend.clone(), shutdown).await?;
    Ok(())
}
