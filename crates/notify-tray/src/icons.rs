//! Tray icon images.
//!
//! Icons come from the configured image files. A missing or unreadable file
//! falls back to a generated square so the app always has something to show.

use crate::{AppError, AppResult};

use std::{panic::Location, path::Path};

use error_location::ErrorLocation;
use tracing::{instrument, warn};
use tray_icon::Icon;

/// Edge length of generated icons in pixels.
pub(crate) const FALLBACK_ICON_SIZE: u32 = 32;

/// Fill colour of the generated primary icon.
pub(crate) const PRIMARY_COLOR: [u8; 4] = [0x2d, 0x7d, 0xd2, 0xff];

/// Fill colour of the generated alternate icon.
pub(crate) const ALTERNATE_COLOR: [u8; 4] = [0xe8, 0xa3, 0x17, 0xff];

/// Transparent margin around generated icons.
const FALLBACK_MARGIN: u32 = 3;

/// Load the icon at `path`, or generate one in `fallback` colour.
#[track_caller]
#[instrument]
pub(crate) fn load_icon(path: Option<&Path>, fallback: [u8; 4]) -> AppResult<Icon> {
    if let Some(path) = path {
        match decode_file(path) {
            Ok(icon) => return Ok(icon),
            Err(e) => warn!(path = ?path, error = ?e, "Falling back to generated icon"),
        }
    }

    let rgba = solid_rgba(FALLBACK_ICON_SIZE, fallback);
    to_icon(rgba, FALLBACK_ICON_SIZE, FALLBACK_ICON_SIZE)
}

/// Square RGBA image filled with `color` inside a transparent margin.
pub(crate) fn solid_rgba(size: u32, color: [u8; 4]) -> Vec<u8> {
    let inside = |v: u32| v >= FALLBACK_MARGIN && v + FALLBACK_MARGIN < size;

    (0..size)
        .flat_map(|y| (0..size).map(move |x| (x, y)))
        .flat_map(|(x, y)| {
            if inside(x) && inside(y) {
                color
            } else {
                [0, 0, 0, 0]
            }
        })
        .collect()
}

#[track_caller]
fn decode_file(path: &Path) -> AppResult<Icon> {
    let img = image::open(path).map_err(|e| AppError::IconError {
        reason: format!("Failed to decode icon {}: {}", path.display(), e),
        location: ErrorLocation::from(Location::caller()),
    })?;

    let rgba = img.into_rgba8();
    let (width, height) = (rgba.width(), rgba.height());
    to_icon(rgba.into_raw(), width, height)
}

#[track_caller]
fn to_icon(rgba: Vec<u8>, width: u32, height: u32) -> AppResult<Icon> {
    Icon::from_rgba(rgba, width, height).map_err(|e| AppError::IconError {
        reason: format!("Failed to create icon from RGBA: {}", e),
        location: ErrorLocation::from(Location::caller()),
    })
}
