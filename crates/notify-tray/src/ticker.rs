//! Timer thread driving the "Timer" menu item.

use crate::{AppError, AppResult};

use std::{panic::Location, thread::JoinHandle, time::Duration};

use error_location::ErrorLocation;
use tokio::sync::watch;
use tracing::{debug, info};

/// Call `on_tick` every `interval` until shutdown.
///
/// Runs a tokio runtime on its own thread; the menu itself stays on the UI
/// thread and is only touched when the tick is handled there. The thread ends
/// when `shutdown_rx` turns `true`, its sender is dropped, or `on_tick`
/// returns `false`.
#[track_caller]
pub(crate) fn spawn_ticker<F>(
    interval: Duration,
    on_tick: F,
    mut shutdown_rx: watch::Receiver<bool>,
) -> AppResult<JoinHandle<()>>
where
    F: Fn() -> bool + Send + 'static,
{
    let rt = tokio::runtime::Builder::new_current_thread()
        .enable_time()
        .build()
        .map_err(|e| AppError::EventLoopError {
            reason: format!("Failed to create tokio runtime: {e}"),
            location: ErrorLocation::from(Location::caller()),
        })?;

    let handle = std::thread::Builder::new()
        .name("ticker".to_string())
        .spawn(move || {
            rt.block_on(async move {
                let mut ticks = tokio::time::interval(interval);
                // The first tick completes immediately.
                ticks.tick().await;

                loop {
                    tokio::select! {
                        _ = ticks.tick() => {
                            if !on_tick() {
                                debug!("Tick receiver closed, stopping ticker");
                                break;
                            }
                        }
                        changed = shutdown_rx.changed() => {
                            if changed.is_err() || *shutdown_rx.borrow() {
                                break;
                            }
                        }
                    }
                }

                info!("Ticker stopped");
            });
        })?;

    Ok(handle)
}
