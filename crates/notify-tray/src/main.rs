//! Notify-Tray: tray icon with live-updating popup menus.
//!
//! # Platform support
//!
//! Popup menus are drawn only on Windows, where the encoded template is
//! loaded with `LoadMenuIndirectW` and tracked with `TrackPopupMenuEx`. On
//! Linux and macOS the tray icon itself still shows, but a click only logs a
//! warning and the menu never opens. The menus are still decoded and kept
//! current there so their state shows up in the logs.

mod app;
mod backend;
mod config;
mod demo_menu;
mod error;
mod icons;
#[cfg(test)]
mod tests;
mod ticker;
mod user_event;

pub(crate) use {
    app::App,
    error::{AppError, Result as AppResult},
    user_event::UserEvent,
};

use crate::config::Config;

use std::panic::Location;

use error_location::ErrorLocation;
use tao::{
    event::{Event, StartCause},
    event_loop::{ControlFlow, EventLoop, EventLoopBuilder},
    window::{Window, WindowBuilder},
};
use tracing::error;
use tracing_subscriber::EnvFilter;
use tray_icon::TrayIconEvent;

/// Log filter used when `RUST_LOG` is not set.
const DEFAULT_LOG_FILTER: &str = "notify_tray=debug,notify_tray_core=debug";

/// Application entry point.
fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER)),
        )
        .init();

    let event_loop = EventLoopBuilder::<UserEvent>::with_user_event().build();
    let proxy = event_loop.create_proxy();

    {
        let proxy = proxy.clone();
        TrayIconEvent::set_event_handler(Some(move |event| {
            let _ = proxy.send_event(UserEvent::Tray(event));
        }));
    }

    let window = match create_owner_window(&event_loop) {
        Ok(w) => w,
        Err(e) => {
            error!("Failed to start: {:?}", e);
            std::process::exit(1);
        }
    };

    // Menus and tray icons are !Send and stay on this thread.
    let mut app: Option<App> = None;

    event_loop.run(move |event, _, control_flow| {
        *control_flow = ControlFlow::Wait;

        match event {
            Event::NewEvents(StartCause::Init) => {
                let config = match Config::load() {
                    Ok(c) => c,
                    Err(e) => {
                        error!("Failed to load config: {:?}", e);
                        std::process::exit(1);
                    }
                };

                app = match App::new(&window, &config, proxy.clone()) {
                    Ok(app) => Some(app),
                    Err(e) => {
                        error!("Failed to start: {:?}", e);
                        std::process::exit(1);
                    }
                };
            }
            Event::UserEvent(UserEvent::Tray(tray_event)) => {
                if let Some(app) = &app {
                    app.handle_tray_event(tray_event);
                }
            }
            Event::UserEvent(UserEvent::Tick) => {
                if let Some(app) = &app {
                    app.tick();
                }
            }
            Event::UserEvent(UserEvent::Shutdown) => {
                if let Some(app) = app.take() {
                    app.shutdown();
                }
                *control_flow = ControlFlow::ExitWithCode(0);
            }
            _ => {}
        }
    });
}

/// Hidden window that owns popup menus.
#[track_caller]
fn create_owner_window(event_loop: &EventLoop<UserEvent>) -> AppResult<Window> {
    WindowBuilder::new()
        .with_title("Notify-Tray")
        .with_visible(false)
        .build(event_loop)
        .map_err(|e| AppError::EventLoopError {
            reason: format!("Failed to create owner window: {e}"),
            location: ErrorLocation::from(Location::caller()),
        })
}
