//! Menus described as TOML values.
//!
//! ```toml
//! [[links]]
//! text = "Docs"
//! open = "https://example.com"
//!
//! [[links]]
//! type = "separator"
//! ```
//!
//! Keys other than `type`, `text`, `disabled`, `checked` and `items` are kept
//! as item user data.

use crate::{CoreResult, IdAllocator, MenuItem, MenuItemProps, MenuNode, MenuSeparator, TrayError};

use std::panic::Location;

use error_location::ErrorLocation;
use toml::Value;

/// Build menu entries from a list of TOML tables.
#[track_caller]
pub fn nodes_from_toml(entries: &[Value], ids: &mut IdAllocator) -> CoreResult<Vec<MenuNode>> {
    entries.iter().map(|entry| node_from_toml(entry, ids)).collect()
}

#[track_caller]
fn node_from_toml(entry: &Value, ids: &mut IdAllocator) -> CoreResult<MenuNode> {
    let Value::Table(table) = entry else {
        return Err(TrayError::InvalidItemType {
            found: format!("a {} value", entry.type_str()),
            location: ErrorLocation::from(Location::caller()),
        });
    };

    match table.get("type") {
        None => {}
        Some(Value::String(kind)) if kind == "item" => {}
        Some(Value::String(kind)) if kind == "separator" => {
            return Ok(MenuSeparator.into());
        }
        Some(other) => {
            return Err(TrayError::InvalidItemType {
                found: format!("type {other}"),
                location: ErrorLocation::from(Location::caller()),
            });
        }
    }

    let mut props = MenuItemProps::new();
    let mut children = None;

    for (key, value) in table {
        match key.as_str() {
            "type" => {}
            "text" => props = props.text(stringify(value)),
            "disabled" => props = props.disabled(truthy(value)),
            "checked" => props = props.checked(truthy(value)),
            "items" => {
                let Value::Array(items) = value else {
                    return Err(TrayError::InvalidItemType {
                        found: format!("items as a {} value", value.type_str()),
                        location: ErrorLocation::from(Location::caller()),
                    });
                };
                children = Some(nodes_from_toml(items, ids)?);
            }
            _ => props = props.data(key.clone(), value.clone()),
        }
    }

    let mut builder = MenuItem::builder().props(props);
    if let Some(children) = children {
        builder = builder.submenu(children);
    }

    Ok(builder.build(ids)?.into())
}

fn stringify(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

fn truthy(value: &Value) -> bool {
    match value {
        Value::Boolean(b) => *b,
        Value::Integer(i) => *i != 0,
        Value::Float(f) => *f != 0.0 && !f.is_nan(),
        Value::String(s) => !s.is_empty(),
        Value::Datetime(_) | Value::Array(_) | Value::Table(_) => true,
    }
}
