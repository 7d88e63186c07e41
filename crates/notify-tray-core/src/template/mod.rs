//! MENUEX template encoding and decoding.
//!
//! The template is what `LoadMenuIndirectW` consumes. All integers are
//! little-endian.
//!
//! # Header (8 bytes)
//!
//! | Offset | Size | Field  | Value |
//! |--------|------|--------|-------|
//! | 0      | 2    | version| 1     |
//! | 2      | 2    | offset | 4     |
//! | 4      | 4    | helpId | 0     |
//!
//! # Item record (4-byte aligned)
//!
//! | Offset | Size | Field                                  |
//! |--------|------|----------------------------------------|
//! | 0      | 4    | type (`0x800` separator)               |
//! | 4      | 4    | state (`0x3` disabled, `0x8` checked)  |
//! | 8      | 4    | id (0 for separators and placeholders) |
//! | 12     | 2    | flags (`0x80` last, `0x01` popup)      |
//! | 14     | n    | UTF-16 text, NUL terminated            |
//! | ..     | 0-3  | zero padding                           |
//! | ..     | 4    | popups only: helpId 0, then children   |
//!
//! A list has no item count; its last record carries the `0x80` flag.

mod decoder;
mod encoder;

pub(crate) use encoder::encode_node;

pub use {
    decoder::{TemplateItem, parse_template},
    encoder::encode_template,
};

/// Template format version.
pub const TEMPLATE_VERSION: u16 = 1;
/// Offset from the end of this field to the first item.
pub const FIRST_ITEM_OFFSET: u16 = 4;
/// Size of the template header.
pub const HEADER_LEN: usize = 8;
/// Size of the fixed part of an item record.
pub const RECORD_FIXED_LEN: usize = 14;
/// Deepest submenu nesting the decoder accepts below the root popup.
pub const MAX_NESTING_DEPTH: usize = 64;

/// `MFT_SEPARATOR`.
pub const TYPE_SEPARATOR: u32 = 0x800;
/// `MFS_DISABLED | MFS_GRAYED`.
pub const STATE_DISABLED: u32 = 0x1 | 0x2;
/// `MFS_CHECKED`.
pub const STATE_CHECKED: u32 = 0x8;
/// Last record of its list.
pub const FLAG_LAST: u16 = 0x80;
/// Record is followed by a submenu.
pub const FLAG_POPUP: u16 = 0x01;

/// Label of the synthetic item wrapping the whole menu.
pub const ROOT_TEXT: &str = "root";
/// Label of the placeholder written for empty lists.
pub const EMPTY_TEXT: &str = "Empty";
