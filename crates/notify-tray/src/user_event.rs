use tray_icon::TrayIconEvent;

/// Events delivered to the main UI thread through the tao event loop.
///
/// The main thread owns the menus and tray icons (they are `!Send`), so tray
/// clicks, timer ticks and shutdown requests all flow through this enum.
#[derive(Debug, Clone)]
pub enum UserEvent {
    /// A click or hover reported by `tray-icon`.
    Tray(TrayIconEvent),
    /// The timer interval elapsed.
    Tick,
    /// Shut down the application. The main thread will exit the event loop.
    Shutdown,
}
