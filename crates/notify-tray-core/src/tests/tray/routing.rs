use crate::{
    ClickButton, IdAllocator, Menu, MenuNode, TrayClick, TrayIcon, TrayIconOptions,
    tests::support::{RecordingBackend, item},
};

use std::rc::Rc;

const LEFT: TrayClick = TrayClick {
    button: ClickButton::Primary,
    x: 10,
    y: 20,
};
const RIGHT: TrayClick = TrayClick {
    button: ClickButton::Secondary,
    x: 30,
    y: 40,
};
const MIDDLE: TrayClick = TrayClick {
    button: ClickButton::Other,
    x: 50,
    y: 60,
};

#[allow(clippy::unwrap_used)]
fn menu(backend: &Rc<RecordingBackend>, ids: &mut IdAllocator, text: &str) -> Menu {
    Menu::new(backend.clone(), vec![MenuNode::from(item(ids, text))]).unwrap()
}

/// WHAT: With only a default menu, both buttons open it
/// WHY: The default menu catches every click without a specific menu
#[test]
#[allow(clippy::unwrap_used)]
fn given_only_default_menu_when_left_and_right_click_then_default_shown() {
    // Given: A tray icon with only a default menu
    let backend = RecordingBackend::new();
    let mut ids = IdAllocator::default();
    let default = menu(&backend, &mut ids, "Default");
    let tray = TrayIcon::new(backend.clone(), TrayIconOptions::new().menu(&default)).unwrap();

    // When: Clicking with each button
    tray.route(&LEFT).unwrap();
    tray.route(&RIGHT).unwrap();

    // Then: The default menu was shown twice
    assert_eq!(
        backend.shown_menus(),
        vec![default.handle(), default.handle()]
    );
}

/// WHAT: Right click prefers the right-click menu; left click falls back to default
/// WHY: Button-specific menus win only for their own button
#[test]
#[allow(clippy::unwrap_used)]
fn given_right_and_default_menus_when_clicking_then_routed_by_button() {
    // Given: A right-click menu and a default menu
    let backend = RecordingBackend::new();
    let mut ids = IdAllocator::default();
    let right = menu(&backend, &mut ids, "Right");
    let default = menu(&backend, &mut ids, "Default");
    let tray = TrayIcon::new(
        backend.clone(),
        TrayIconOptions::new()
            .right_click_menu(&right)
            .menu(&default),
    )
    .unwrap();

    // When: Right then left click
    tray.route(&RIGHT).unwrap();
    tray.route(&LEFT).unwrap();

    // Then: Right menu first, default menu second
    assert_eq!(backend.shown_menus(), vec![right.handle(), default.handle()]);
}

/// WHAT: A right click without a right-click menu skips the left-click menu
/// WHY: Fallback goes to the default menu only
#[test]
#[allow(clippy::unwrap_used)]
fn given_left_and_default_menus_when_right_click_then_default_shown() {
    // Given: A left-click menu and a default menu
    let backend = RecordingBackend::new();
    let mut ids = IdAllocator::default();
    let left = menu(&backend, &mut ids, "Left");
    let default = menu(&backend, &mut ids, "Default");
    let tray = TrayIcon::new(
        backend.clone(),
        TrayIconOptions::new().left_click_menu(&left).menu(&default),
    )
    .unwrap();

    // When: Right, left and middle clicks
    tray.route(&RIGHT).unwrap();
    tray.route(&LEFT).unwrap();
    tray.route(&MIDDLE).unwrap();

    // Then: Default, left, default
    assert_eq!(
        backend.shown_menus(),
        vec![default.handle(), left.handle(), default.handle()]
    );
}

/// WHAT: Without any menu a click does nothing
/// WHY: A tray icon may exist purely as an indicator
#[test]
#[allow(clippy::unwrap_used)]
fn given_no_menus_when_clicking_then_nothing_shown() {
    // Given: A tray icon with no menus
    let backend = RecordingBackend::new();
    let tray = TrayIcon::new(backend.clone(), TrayIconOptions::new().tooltip("Idle")).unwrap();

    // When: Clicking
    tray.route(&RIGHT).unwrap();

    // Then: No popup
    assert!(backend.shown_menus().is_empty());
}

/// WHAT: Native clicks reach the router through the registered handler
/// WHY: The backend only knows the handler, not the tray icon
#[test]
#[allow(clippy::unwrap_used)]
fn given_native_click_when_backend_reports_it_then_popup_shown_at_position() {
    // Given: A tray icon with a default menu
    let backend = RecordingBackend::new();
    let mut ids = IdAllocator::default();
    let default = menu(&backend, &mut ids, "Default");
    let tray = TrayIcon::new(backend.clone(), TrayIconOptions::new().menu(&default)).unwrap();

    // When: The backend reports a right click
    backend.click(tray.native_handle().unwrap(), RIGHT).unwrap();

    // Then: The default menu was shown
    assert_eq!(backend.shown_menus(), vec![default.handle()]);
}

/// WHAT: One menu can serve two tray icons
/// WHY: Menus are shared, not owned by a single icon
#[test]
#[allow(clippy::unwrap_used)]
fn given_shared_menu_when_both_icons_clicked_then_same_menu_shown() {
    // Given: Two tray icons sharing a menu
    let backend = RecordingBackend::new();
    let mut ids = IdAllocator::default();
    let shared = menu(&backend, &mut ids, "Shared");
    let first = TrayIcon::new(backend.clone(), TrayIconOptions::new().menu(&shared)).unwrap();
    let second = TrayIcon::new(backend.clone(), TrayIconOptions::new().menu(&shared)).unwrap();

    // When: Each is clicked
    first.route(&LEFT).unwrap();
    second.route(&LEFT).unwrap();

    // Then: The same native menu served both
    assert_eq!(backend.shown_menus(), vec![shared.handle(), shared.handle()]);
}
