#[allow(clippy::module_inception)]
mod config;
mod icon_config;
mod timer_config;
mod tray_config;

pub(crate) use {
    config::Config, icon_config::IconConfig, timer_config::TimerConfig, tray_config::TrayConfig,
};

pub(crate) const DEFAULT_TOOLTIP: &str = "Example Tooltip Text";
pub(crate) const DEFAULT_TIMER_INTERVAL_SECS: u64 = 1;

pub(crate) fn default_tooltip() -> String {
    DEFAULT_TOOLTIP.to_string()
}

pub(crate) fn default_timer_interval_secs() -> u64 {
    DEFAULT_TIMER_INTERVAL_SECS
}
