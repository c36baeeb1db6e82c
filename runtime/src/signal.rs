use anyhow::Result;

#[cfg(unix)]
use tokio::signal::unix::SignalKind;

/// Resolves on the first `SIGINT` or `SIGTERM` (Ctrl-C on other platforms).
///
/// Signal handlers are installed when the returned future is first polled.
pub async fn wait_for_signal() -> Result<()> {
    #[cfg(unix)]
    {
        let mut interrupt = tokio::signal::unix::signal(SignalKind::interrupt())?;
        let mut terminate = tokio::signal::unix::signal(SignalKind::terminate())?;

        tokio::select! {
            _ = interrupt.recv() => {}
            _ = terminate.recv() => {}
        }
    }

    #[cfg(not(unix))]
    tokio::signal::ctrl_c().await?;

    Ok(())
}
