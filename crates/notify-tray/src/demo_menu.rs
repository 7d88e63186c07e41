//! The sample menu shown by the tray icon.
//!
//! Exercises every kind of item: checkable, periodically renamed, disabled,
//! self-counting, tray-mutating, nested, config-driven links and exit.

use crate::AppResult;

use notify_tray_core::{
    CoreResult, IconHandle, IdAllocator, Menu, MenuItem, MenuItemProps, MenuNode, MenuSeparator,
    NativeBackend, TrayError, TrayIconOptions, nodes_from_toml,
};

use std::rc::Rc;

use toml::Value;
use tracing::{info, instrument};

/// User-data key holding a click or tick count.
pub(crate) const COUNT_KEY: &str = "count";

/// User-data key holding the target of a link item.
pub(crate) const OPEN_KEY: &str = "open";

/// Icons the "Toggle icon" item switches between.
#[derive(Debug, Clone, Copy)]
pub(crate) struct DemoIcons {
    /// Icon shown at startup.
    pub primary: IconHandle,
    /// Icon swapped in on toggle.
    pub alternate: IconHandle,
}

/// The registered menu plus the items the app drives from outside.
pub(crate) struct DemoMenu {
    /// Menu to attach to the tray icon.
    pub menu: Menu,
    /// Item renamed on every timer tick.
    pub timer: MenuItem,
}

/// Build and register the sample menu.
///
/// `links` are declarative entries; items carrying an `open` key launch that
/// target when clicked. `on_exit` runs when "Exit" is chosen.
#[track_caller]
#[instrument(skip(backend, links, on_exit), fields(links = links.len()))]
pub(crate) fn build_demo_menu<F>(
    backend: Rc<dyn NativeBackend>,
    links: &[Value],
    icons: DemoIcons,
    on_exit: F,
) -> AppResult<DemoMenu>
where
    F: Fn() + 'static,
{
    let mut ids = IdAllocator::default();

    let checkable = MenuItem::builder()
        .text("Checkable")
        .checked(true)
        .on_click(|event| {
            let item = event.item();
            info!(checked = item.checked(), "Checkable clicked");
            item.update(&MenuItemProps::new().checked(!item.checked()))
        })
        .build(&mut ids)?;

    let timer = MenuItem::builder()
        .text("Timer: 0")
        .disabled(true)
        .data(COUNT_KEY, 0i64)
        .build(&mut ids)?;

    let disabled = MenuItem::builder()
        .text("Disabled")
        .disabled(true)
        .build(&mut ids)?;

    let counter = counter_item(&mut ids)?;

    let change_tooltip = MenuItem::builder()
        .text("Change tooltip")
        .data(COUNT_KEY, 0i64)
        .on_click(|event| {
            let count = next_count(event.item());
            event
                .item()
                .apply_properties(&MenuItemProps::new().data(COUNT_KEY, count))?;
            event
                .tray_icon()
                .update(TrayIconOptions::new().tooltip(format!("Changed tooltip: {count}")))
        })
        .build(&mut ids)?;

    let toggle_icon = MenuItem::builder()
        .text("Toggle icon")
        .on_click(move |event| {
            let tray = event.tray_icon();
            let next = if tray.icon() == Some(icons.primary) {
                icons.alternate
            } else {
                icons.primary
            };
            tray.update(TrayIconOptions::new().icon(next))
        })
        .build(&mut ids)?;

    let submenu = MenuItem::builder()
        .text("Submenu")
        .submenu(vec![
            MenuNode::from(MenuItem::builder().text("Submenu item").build(&mut ids)?),
            counter_item(&mut ids)?.into(),
        ])
        .build(&mut ids)?;

    let exit = MenuItem::builder()
        .text("Exit")
        .on_click(move |_| {
            info!("Exit requested from tray menu");
            on_exit();
            Ok(())
        })
        .build(&mut ids)?;

    let mut nodes = vec![
        MenuNode::from(checkable),
        MenuSeparator.into(),
        timer.clone().into(),
        MenuSeparator.into(),
        disabled.into(),
        counter.into(),
        MenuSeparator.into(),
        change_tooltip.into(),
        toggle_icon.into(),
        MenuSeparator.into(),
        submenu.into(),
    ];

    if !links.is_empty() {
        let children = nodes_from_toml(links, &mut ids)?;
        attach_link_actions(&children)?;
        let links = MenuItem::builder()
            .text("Links")
            .submenu(children)
            .build(&mut ids)?;
        nodes.push(links.into());
    }

    nodes.push(MenuSeparator.into());
    nodes.push(exit.into());

    let menu = Menu::new(backend, nodes)?;
    Ok(DemoMenu { menu, timer })
}

/// Advance the timer item by one tick and show the new count.
#[track_caller]
pub(crate) fn advance_timer(timer: &MenuItem) -> CoreResult<()> {
    let count = next_count(timer);
    timer.update(
        &MenuItemProps::new()
            .text(format!("Timer: {count}"))
            .data(COUNT_KEY, count),
    )
}

fn counter_item(ids: &mut IdAllocator) -> CoreResult<MenuItem> {
    MenuItem::builder()
        .text("Counter")
        .data(COUNT_KEY, 0i64)
        .on_click(|event| {
            let item = event.item();
            let count = next_count(item);
            item.update(
                &MenuItemProps::new()
                    .text(format!("Counter: {count}"))
                    .data(COUNT_KEY, count),
            )
        })
        .build(ids)
}

fn next_count(item: &MenuItem) -> i64 {
    item.data(COUNT_KEY)
        .and_then(|value| value.as_integer())
        .unwrap_or_default()
        + 1
}

/// Give every leaf with an `open` key a callback that launches its target.
fn attach_link_actions(nodes: &[MenuNode]) -> CoreResult<()> {
    for item in nodes.iter().filter_map(MenuNode::as_item) {
        if let Some(children) = item.children() {
            attach_link_actions(&children)?;
            continue;
        }

        if let Some(Value::String(target)) = item.data(OPEN_KEY) {
            item.apply_properties(&MenuItemProps::new().on_click(move |_| {
                info!(target = %target, "Opening link");
                open::that(&target).map_err(TrayError::native)
            }))?;
        }
    }
    Ok(())
}
