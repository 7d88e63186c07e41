use crate::{
    AppResult, UserEvent,
    backend::DesktopBackend,
    config::Config,
    demo_menu::{DemoIcons, advance_timer, build_demo_menu},
    icons::{ALTERNATE_COLOR, PRIMARY_COLOR, load_icon},
    ticker::spawn_ticker,
};

use notify_tray_core::{MenuItem, NativeBackend, TrayIcon, TrayIconOptions};

use std::{rc::Rc, thread::JoinHandle};

use tao::{event_loop::EventLoopProxy, window::Window};
use tokio::sync::watch;
use tracing::{error, info, instrument, warn};
use tray_icon::TrayIconEvent;

/// Main application state.
///
/// Lives on the UI thread for the whole run. Owns the tray icon (and through
/// it the menu), the backend that talks to the platform and the ticker thread.
pub struct App {
    backend: Rc<DesktopBackend>,
    tray: TrayIcon,
    timer: MenuItem,
    shutdown_tx: watch::Sender<bool>,
    ticker: JoinHandle<()>,
}

impl App {
    /// Load icons, build the sample menu, show the tray icon and start ticking.
    #[track_caller]
    #[instrument(skip_all)]
    pub(crate) fn new(
        owner: &Window,
        config: &Config,
        proxy: EventLoopProxy<UserEvent>,
    ) -> AppResult<Self> {
        let backend = Rc::new(DesktopBackend::new(owner));

        let icons = DemoIcons {
            primary: backend.add_icon(load_icon(config.icons.primary.as_deref(), PRIMARY_COLOR)?),
            alternate: backend.add_icon(load_icon(
                config.icons.alternate.as_deref(),
                ALTERNATE_COLOR,
            )?),
        };

        let native: Rc<dyn NativeBackend> = backend.clone();
        let demo = {
            let proxy = proxy.clone();
            build_demo_menu(native.clone(), &config.links, icons, move || {
                let _ = proxy.send_event(UserEvent::Shutdown);
            })?
        };

        let tray = TrayIcon::new(
            native,
            TrayIconOptions::new()
                .menu(&demo.menu)
                .icon(icons.primary)
                .tooltip(config.tray.tooltip.clone()),
        )?;

        let (shutdown_tx, shutdown_rx) = watch::channel(false);
        let ticker = spawn_ticker(
            config.timer.interval(),
            move || proxy.send_event(UserEvent::Tick).is_ok(),
            shutdown_rx,
        )?;

        info!("Notify-Tray started");

        Ok(Self {
            backend,
            tray,
            timer: demo.timer,
            shutdown_tx,
            ticker,
        })
    }

    /// Route a tray event to the menus.
    pub(crate) fn handle_tray_event(&self, event: TrayIconEvent) {
        if let Err(e) = self.backend.handle_event(event) {
            error!(error = ?e, "Failed to handle tray event");
        }
    }

    /// Advance the timer item.
    pub(crate) fn tick(&self) {
        if let Err(e) = advance_timer(&self.timer) {
            error!(error = ?e, "Failed to update timer item");
        }
    }

    /// Stop the ticker, wait for its thread, then remove the tray icon.
    #[instrument(skip(self))]
    pub(crate) fn shutdown(self) {
        let _ = self.shutdown_tx.send(true);
        if self.ticker.join().is_err() {
            warn!("Ticker thread panicked");
        }
        info!(tray = ?self.tray.native_handle(), "Notify-Tray shut down");
        // Dropping the tray icon removes it and releases the menu.
    }
}
