use crate::{
    CoreResult, IdAllocator, MenuBinding, MenuItemDelta, MenuItemId, MenuNode, SelectionEvent,
    TrayError,
};

use std::{cell::RefCell, collections::BTreeMap, fmt, panic::Location, rc::Rc};

use error_location::ErrorLocation;
use tracing::{debug, instrument};

/// Click callback attached to a menu item.
pub type OnClick = Rc<dyn Fn(&SelectionEvent) -> CoreResult<()>>;

/// A partial set of item properties.
///
/// Fields left unset keep their current value when applied.
#[derive(Clone, Default)]
pub struct MenuItemProps {
    text: Option<String>,
    disabled: Option<bool>,
    checked: Option<bool>,
    on_click: Option<OnClick>,
    data: BTreeMap<String, toml::Value>,
}

impl MenuItemProps {
    /// Empty property set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the label.
    pub fn text(mut self, text: impl Into<String>) -> Self {
        self.text = Some(text.into());
        self
    }

    /// Set the disabled (greyed) state.
    pub fn disabled(mut self, disabled: bool) -> Self {
        self.disabled = Some(disabled);
        self
    }

    /// Set the check mark.
    pub fn checked(mut self, checked: bool) -> Self {
        self.checked = Some(checked);
        self
    }

    /// Set the click callback.
    pub fn on_click<F>(mut self, on_click: F) -> Self
    where
        F: Fn(&SelectionEvent) -> CoreResult<()> + 'static,
    {
        self.on_click = Some(Rc::new(on_click));
        self
    }

    /// Attach an arbitrary user value under `key`.
    pub fn data(mut self, key: impl Into<String>, value: impl Into<toml::Value>) -> Self {
        self.data.insert(key.into(), value.into());
        self
    }

    pub(crate) fn has_on_click(&self) -> bool {
        self.on_click.is_some()
    }

    /// The native-visible part of these properties.
    pub(crate) fn delta(&self) -> MenuItemDelta {
        MenuItemDelta {
            text: self.text.clone(),
            disabled: self.disabled,
            checked: self.checked,
        }
    }
}

impl fmt::Debug for MenuItemProps {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MenuItemProps")
            .field("text", &self.text)
            .field("disabled", &self.disabled)
            .field("checked", &self.checked)
            .field("on_click", &self.on_click.is_some())
            .field("data", &self.data)
            .finish()
    }
}

struct MenuItemState {
    id: MenuItemId,
    text: String,
    disabled: bool,
    checked: bool,
    on_click: Option<OnClick>,
    children: Option<Vec<MenuNode>>,
    data: BTreeMap<String, toml::Value>,
    binding: Option<MenuBinding>,
}

/// A selectable menu entry, optionally holding a submenu.
///
/// `MenuItem` is a handle: clones refer to the same item, so code can keep
/// one clone around and still update the item after a [`Menu`](crate::Menu)
/// took ownership of the tree.
#[derive(Clone)]
pub struct MenuItem {
    inner: Rc<RefCell<MenuItemState>>,
}

impl MenuItem {
    /// Start building an item.
    pub fn builder() -> MenuItemBuilder {
        MenuItemBuilder::default()
    }

    /// Id assigned at construction.
    pub fn id(&self) -> MenuItemId {
        self.inner.borrow().id
    }

    /// Current label.
    pub fn text(&self) -> String {
        self.inner.borrow().text.clone()
    }

    /// Whether the item is greyed out.
    pub fn disabled(&self) -> bool {
        self.inner.borrow().disabled
    }

    /// Whether the item shows a check mark.
    pub fn checked(&self) -> bool {
        self.inner.borrow().checked
    }

    /// User value stored under `key`.
    pub fn data(&self, key: &str) -> Option<toml::Value> {
        self.inner.borrow().data.get(key).cloned()
    }

    /// True when the item opens a submenu.
    pub fn is_submenu(&self) -> bool {
        self.inner.borrow().children.is_some()
    }

    /// Submenu entries, if this item is a container.
    pub fn children(&self) -> Option<Vec<MenuNode>> {
        self.inner.borrow().children.clone()
    }

    /// True once a menu owns this item.
    pub fn is_bound(&self) -> bool {
        self.inner.borrow().binding.is_some()
    }

    /// Merge `props` into this item without telling the native layer.
    #[track_caller]
    pub fn apply_properties(&self, props: &MenuItemProps) -> CoreResult<()> {
        let mut state = self.inner.borrow_mut();

        if props.on_click.is_some() && state.children.is_some() {
            return Err(TrayError::InvalidCallbackType {
                reason: format!("item {} opens a submenu and cannot be clicked", state.id),
                location: ErrorLocation::from(Location::caller()),
            });
        }

        if let Some(text) = &props.text {
            state.text.clone_from(text);
        }
        if let Some(disabled) = props.disabled {
            state.disabled = disabled;
        }
        if let Some(checked) = props.checked {
            state.checked = checked;
        }
        if let Some(on_click) = &props.on_click {
            state.on_click = Some(Rc::clone(on_click));
        }
        for (key, value) in &props.data {
            state.data.insert(key.clone(), value.clone());
        }

        Ok(())
    }

    /// Merge `props` into this item and push the change to the displayed menu.
    #[track_caller]
    #[instrument(skip(self, props), fields(id = %self.id()))]
    pub fn update(&self, props: &MenuItemProps) -> CoreResult<()> {
        let binding = self.binding().ok_or_else(|| TrayError::NotBound {
            id: self.id().get(),
            location: ErrorLocation::from(Location::caller()),
        })?;

        self.apply_properties(props)?;
        binding.native_update(self.id(), &props.delta())?;

        debug!("Menu item updated");
        Ok(())
    }

    pub(crate) fn on_click(&self) -> Option<OnClick> {
        self.inner.borrow().on_click.clone()
    }

    pub(crate) fn binding(&self) -> Option<MenuBinding> {
        self.inner.borrow().binding.clone()
    }

    /// Point this item and its whole subtree at the owning menu.
    pub(crate) fn bind(&self, binding: &MenuBinding) {
        let children = {
            let mut state = self.inner.borrow_mut();
            state.binding = Some(binding.clone());
            state.children.clone()
        };

        for child in children.iter().flatten() {
            if let MenuNode::Item(item) = child {
                item.bind(binding);
            }
        }
    }
}

impl PartialEq for MenuItem {
    fn eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.inner, &other.inner)
    }
}

impl Eq for MenuItem {}

impl fmt::Debug for MenuItem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let state = self.inner.borrow();
        f.debug_struct("MenuItem")
            .field("id", &state.id)
            .field("text", &state.text)
            .field("disabled", &state.disabled)
            .field("checked", &state.checked)
            .field("children", &state.children)
            .field("bound", &state.binding.is_some())
            .finish()
    }
}

/// Builder for [`MenuItem`].
#[derive(Debug, Default)]
pub struct MenuItemBuilder {
    props: MenuItemProps,
    children: Option<Vec<MenuNode>>,
}

impl MenuItemBuilder {
    /// Set the label.
    pub fn text(mut self, text: impl Into<String>) -> Self {
        self.props = self.props.text(text);
        self
    }

    /// Set the disabled (greyed) state.
    pub fn disabled(mut self, disabled: bool) -> Self {
        self.props = self.props.disabled(disabled);
        self
    }

    /// Set the check mark.
    pub fn checked(mut self, checked: bool) -> Self {
        self.props = self.props.checked(checked);
        self
    }

    /// Set the click callback. Not allowed together with [`submenu`](Self::submenu).
    pub fn on_click<F>(mut self, on_click: F) -> Self
    where
        F: Fn(&SelectionEvent) -> CoreResult<()> + 'static,
    {
        self.props = self.props.on_click(on_click);
        self
    }

    /// Attach an arbitrary user value under `key`.
    pub fn data(mut self, key: impl Into<String>, value: impl Into<toml::Value>) -> Self {
        self.props = self.props.data(key, value);
        self
    }

    /// Make this item open a submenu. An empty list is allowed and shows a
    /// disabled "Empty" placeholder.
    pub fn submenu<I, N>(mut self, children: I) -> Self
    where
        I: IntoIterator<Item = N>,
        N: Into<MenuNode>,
    {
        self.children = Some(children.into_iter().map(Into::into).collect());
        self
    }

    /// Apply a whole property set at once.
    pub fn props(mut self, props: MenuItemProps) -> Self {
        self.props = props;
        self
    }

    /// Validate and allocate the item's id.
    #[track_caller]
    pub fn build(self, ids: &mut IdAllocator) -> CoreResult<MenuItem> {
        if self.children.is_some() && self.props.has_on_click() {
            return Err(TrayError::InvalidCallbackType {
                reason: "an item that opens a submenu cannot be clicked".to_string(),
                location: ErrorLocation::from(Location::caller()),
            });
        }

        let id = ids.allocate()?;

        let item = MenuItem {
            inner: Rc::new(RefCell::new(MenuItemState {
                id,
                text: String::new(),
                disabled: false,
                checked: false,
                on_click: None,
                children: self.children,
                data: BTreeMap::new(),
                binding: None,
            })),
        };
        item.apply_properties(&self.props)?;

        Ok(item)
    }
}
