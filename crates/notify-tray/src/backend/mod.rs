mod desktop_backend;
#[cfg(not(windows))]
mod headless_popup;
#[cfg(windows)]
mod win32_popup;

pub(crate) use desktop_backend::DesktopBackend;

#[cfg(not(windows))]
pub(crate) use headless_popup::PopupMenus;
#[cfg(windows)]
pub(crate) use win32_popup::PopupMenus;

#[cfg(all(test, not(windows)))]
pub(crate) use headless_popup::apply_delta;
