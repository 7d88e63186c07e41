use crate::{
    IdAllocator, Menu, MenuItem, MenuNode, MenuSeparator,
    tests::support::{RecordingBackend, item},
};

/// Two submenus side by side with plain items before, between and after them.
#[allow(clippy::unwrap_used)]
fn multi_branch_tree(ids: &mut IdAllocator) -> Vec<MenuNode> {
    let before = item(ids, "Before");
    let first_child = item(ids, "First child");
    let first = MenuItem::builder()
        .text("First submenu")
        .submenu([first_child])
        .build(ids)
        .unwrap();
    let between = item(ids, "Between");
    let deep = item(ids, "Deep");
    let inner = MenuItem::builder()
        .text("Inner submenu")
        .submenu([deep])
        .build(ids)
        .unwrap();
    let second_child = item(ids, "Second child");
    let second = MenuItem::builder()
        .text("Second submenu")
        .submenu(vec![
            MenuNode::from(second_child),
            MenuSeparator.into(),
            inner.into(),
        ])
        .build(ids)
        .unwrap();
    let after = item(ids, "After");

    vec![
        MenuNode::from(before),
        first.into(),
        MenuSeparator.into(),
        between.into(),
        second.into(),
        after.into(),
    ]
}

fn collect_items(nodes: &[MenuNode], out: &mut Vec<MenuItem>) {
    for item in nodes.iter().filter_map(MenuNode::as_item) {
        out.push(item.clone());
        if let Some(children) = item.children() {
            collect_items(&children, out);
        }
    }
}

/// WHAT: Every item in the tree is found by its id
/// WHY: Searching must not stop at the first item that has a submenu
#[test]
#[allow(clippy::unwrap_used)]
fn given_multi_branch_tree_when_finding_each_id_then_same_item_returned() {
    // Given: A menu with several submenus and siblings after them
    let backend = RecordingBackend::new();
    let mut ids = IdAllocator::default();
    let menu = Menu::new(backend.clone(), multi_branch_tree(&mut ids)).unwrap();

    let mut all = Vec::new();
    collect_items(menu.items(), &mut all);
    assert_eq!(all.len(), 9);

    // When/Then: Each id resolves to that exact item
    for expected in &all {
        let found = menu.find_by_id(expected.id().get()).unwrap();
        assert_eq!(&found, expected, "lookup of {}", expected.text());
    }
}

/// WHAT: Sentinel and unknown ids resolve to nothing
/// WHY: 0 means dismissed and stray ids are ignored
#[test]
#[allow(clippy::unwrap_used)]
fn given_menu_when_finding_zero_or_unknown_id_then_none() {
    // Given: A populated menu
    let backend = RecordingBackend::new();
    let mut ids = IdAllocator::default();
    let menu = Menu::new(backend.clone(), multi_branch_tree(&mut ids)).unwrap();

    // When/Then: Lookups outside the tree miss
    assert!(menu.find_by_id(0).is_none());
    assert!(menu.find_by_id(10_000).is_none());
}

/// WHAT: A container itself can be found
/// WHY: Containers are items with ids like any other
#[test]
#[allow(clippy::unwrap_used)]
fn given_container_id_when_finding_then_container_returned() {
    // Given: A menu whose second entry is a submenu
    let backend = RecordingBackend::new();
    let mut ids = IdAllocator::default();
    let menu = Menu::new(backend.clone(), multi_branch_tree(&mut ids)).unwrap();
    let container = menu.items()[1].as_item().unwrap().clone();

    // When: Looking it up
    let found = menu.find_by_id(container.id().get()).unwrap();

    // Then: The container comes back
    assert!(found.is_submenu());
    assert_eq!(found, container);
}
