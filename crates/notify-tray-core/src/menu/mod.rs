mod declarative;
mod id_allocator;
#[allow(clippy::module_inception)]
mod menu;
mod menu_item;
pub(crate) mod menu_node;

pub(crate) use menu::MenuBinding;

pub use {
    declarative::nodes_from_toml,
    id_allocator::{IdAllocator, MenuItemId},
    menu::Menu,
    menu_item::{MenuItem, MenuItemBuilder, MenuItemProps, OnClick},
    menu_node::{MenuNode, MenuSeparator},
};
