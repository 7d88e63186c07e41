use crate::{CoreResult, TrayError};

use std::{fmt, num::NonZeroU32, panic::Location};

use error_location::ErrorLocation;

/// Identity of a menu item. Never 0, which the native layer uses for
/// "nothing selected".
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct MenuItemId(NonZeroU32);

impl MenuItemId {
    /// Lowest id an allocator hands out.
    pub const MIN: Self = Self(NonZeroU32::MIN);

    /// Interpret a raw id reported by the native layer. `0` maps to `None`.
    pub fn from_raw(raw: u32) -> Option<Self> {
        NonZeroU32::new(raw).map(Self)
    }

    /// Raw value as written into menu templates.
    pub fn get(self) -> u32 {
        self.0.get()
    }
}

impl fmt::Display for MenuItemId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Hands out strictly increasing item ids.
///
/// Owned by whoever builds the menu tree. Use one allocator for every menu
/// shown by the same process so ids stay unique across menus.
#[derive(Debug)]
pub struct IdAllocator {
    next: Option<MenuItemId>,
}

impl IdAllocator {
    /// Start allocating from a known id.
    pub const fn with_next(next: MenuItemId) -> Self {
        Self { next: Some(next) }
    }

    /// Peek at the next id without consuming it.
    pub fn peek(&self) -> Option<MenuItemId> {
        self.next
    }

    /// Allocate the next id and advance.
    #[track_caller]
    pub fn allocate(&mut self) -> CoreResult<MenuItemId> {
        let current = self.next.ok_or_else(|| TrayError::IdsExhausted {
            location: ErrorLocation::from(Location::caller()),
        })?;
        self.next = current.0.checked_add(1).map(MenuItemId);
        Ok(current)
    }
}

impl Default for IdAllocator {
    fn default() -> Self {
        Self::with_next(MenuItemId::MIN)
    }
}
