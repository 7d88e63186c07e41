use crate::{
    CoreResult, TrayError,
    template::{
        FLAG_LAST, FLAG_POPUP, HEADER_LEN, MAX_NESTING_DEPTH, RECORD_FIXED_LEN, STATE_CHECKED,
        STATE_DISABLED, TEMPLATE_VERSION, TYPE_SEPARATOR,
    },
};

use std::panic::Location;

use error_location::ErrorLocation;

/// One decoded template record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TemplateItem {
    /// Raw `type` field.
    pub kind: u32,
    /// Raw `state` field.
    pub state: u32,
    /// Item id, 0 for separators and placeholders.
    pub id: u32,
    /// Raw `flags` field.
    pub flags: u16,
    /// Label.
    pub text: String,
    /// Decoded submenu records.
    pub children: Vec<TemplateItem>,
    /// Bytes taken by this record, excluding its children.
    pub record_len: usize,
}

impl TemplateItem {
    /// Separator record.
    pub fn is_separator(&self) -> bool {
        self.kind & TYPE_SEPARATOR != 0
    }

    /// Greyed out.
    pub fn is_disabled(&self) -> bool {
        self.state & STATE_DISABLED != 0
    }

    /// Shows a check mark.
    pub fn is_checked(&self) -> bool {
        self.state & STATE_CHECKED != 0
    }

    /// Last record of its list.
    pub fn is_last(&self) -> bool {
        self.flags & FLAG_LAST != 0
    }

    /// Followed by a submenu.
    pub fn has_submenu(&self) -> bool {
        self.flags & FLAG_POPUP != 0
    }

    /// Depth-first walk over this record and every descendant.
    pub fn walk(&self) -> Vec<&TemplateItem> {
        let mut out = vec![self];
        for child in &self.children {
            out.extend(child.walk());
        }
        out
    }
}

/// Decode a MENUEX template into its root record.
#[track_caller]
pub fn parse_template(data: &[u8]) -> CoreResult<TemplateItem> {
    let version = read_u16(data, 0)?;
    if version != TEMPLATE_VERSION {
        return Err(malformed(0, format!("unsupported version {version}")));
    }

    let offset = read_u16(data, 2)? as usize;
    if data.len() < HEADER_LEN {
        return Err(malformed(data.len(), "header truncated"));
    }

    let (root, end) = parse_record(data, 4 + offset, 0)?;
    if end != data.len() {
        return Err(malformed(end, format!("{} trailing bytes", data.len() - end)));
    }

    Ok(root)
}

/// Parse the record at `pos` and, for popups, its whole child list.
/// Returns the record and the offset just past it.
///
/// `depth` counts the popups enclosing this record; past
/// [`MAX_NESTING_DEPTH`] the template is rejected.
#[track_caller]
fn parse_record(data: &[u8], pos: usize, depth: usize) -> CoreResult<(TemplateItem, usize)> {
    if depth > MAX_NESTING_DEPTH {
        return Err(malformed(pos, "menu nesting too deep"));
    }

    let kind = read_u32(data, pos)?;
    let state = read_u32(data, pos + 4)?;
    let id = read_u32(data, pos + 8)?;
    let flags = read_u16(data, pos + 12)?;

    let mut units = Vec::new();
    let mut cursor = pos + RECORD_FIXED_LEN;
    loop {
        let unit = read_u16(data, cursor)?;
        cursor += 2;
        if unit == 0 {
            break;
        }
        units.push(unit);
    }
    let text = String::from_utf16(&units)
        .map_err(|e| malformed(pos + RECORD_FIXED_LEN, format!("invalid UTF-16 text: {e}")))?;

    let padding = (4 - (cursor - pos) % 4) % 4;
    cursor += padding;
    if cursor > data.len() {
        return Err(malformed(data.len(), "record padding truncated"));
    }

    let mut item = TemplateItem {
        kind,
        state,
        id,
        flags,
        text,
        children: Vec::new(),
        record_len: 0,
    };

    if item.has_submenu() {
        read_u32(data, cursor)?; // helpId
        cursor += 4;
        item.record_len = cursor - pos;

        loop {
            let (child, next) = parse_record(data, cursor, depth + 1)?;
            cursor = next;
            let last = child.is_last();
            item.children.push(child);
            if last {
                break;
            }
        }
    } else {
        item.record_len = cursor - pos;
    }

    Ok((item, cursor))
}

#[track_caller]
fn read_u16(data: &[u8], pos: usize) -> CoreResult<u16> {
    data.get(pos..pos + 2)
        .and_then(|b| b.try_into().ok())
        .map(u16::from_le_bytes)
        .ok_or_else(|| malformed(pos, "unexpected end of template"))
}

#[track_caller]
fn read_u32(data: &[u8], pos: usize) -> CoreResult<u32> {
    data.get(pos..pos + 4)
        .and_then(|b| b.try_into().ok())
        .map(u32::from_le_bytes)
        .ok_or_else(|| malformed(pos, "unexpected end of template"))
}

#[track_caller]
fn malformed(offset: usize, reason: impl Into<String>) -> TrayError {
    TrayError::MalformedTemplate {
        offset,
        reason: reason.into(),
        location: ErrorLocation::from(Location::caller()),
    }
}
