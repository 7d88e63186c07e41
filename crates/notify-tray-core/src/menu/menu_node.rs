use crate::{MenuItem, MenuItemId, template};

/// Horizontal divider between menu items.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MenuSeparator;

/// One entry of a menu.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MenuNode {
    /// Selectable item, possibly opening a submenu.
    Item(MenuItem),
    /// Divider.
    Separator(MenuSeparator),
}

impl MenuNode {
    /// The item, unless this is a separator.
    pub fn as_item(&self) -> Option<&MenuItem> {
        match self {
            MenuNode::Item(item) => Some(item),
            MenuNode::Separator(_) => None,
        }
    }

    /// Template records for this node and its submenu, flagged as the last
    /// entry of its list.
    pub fn encode(&self) -> Vec<u8> {
        let mut out = Vec::new();
        template::encode_node(&mut out, self, true);
        out
    }
}

impl From<MenuItem> for MenuNode {
    fn from(item: MenuItem) -> Self {
        MenuNode::Item(item)
    }
}

impl From<MenuSeparator> for MenuNode {
    fn from(separator: MenuSeparator) -> Self {
        MenuNode::Separator(separator)
    }
}

/// Depth-first search over every sibling at every level.
pub(crate) fn find_in(nodes: &[MenuNode], id: MenuItemId) -> Option<MenuItem> {
    for node in nodes {
        let MenuNode::Item(item) = node else {
            continue;
        };

        if item.id() == id {
            return Some(item.clone());
        }

        if let Some(children) = item.children()
            && let Some(found) = find_in(&children, id)
        {
            return Some(found);
        }
    }

    None
}

/// First item in the tree that some menu already owns.
pub(crate) fn first_bound(nodes: &[MenuNode]) -> Option<MenuItemId> {
    nodes.iter().filter_map(MenuNode::as_item).find_map(|item| {
        if item.is_bound() {
            Some(item.id())
        } else {
            item.children().and_then(|children| first_bound(&children))
        }
    })
}
