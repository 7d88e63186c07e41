use error_location::ErrorLocation;
use thiserror::Error;

/// Menu and tray errors with source location tracking.
#[derive(Error, Debug)]
pub enum TrayError {
    /// A click callback was attached where no callback may live.
    #[error("Invalid click callback: {reason} {location}")]
    InvalidCallbackType {
        /// Why the callback was rejected.
        reason: String,
        /// Source location where error occurred.
        location: ErrorLocation,
    },

    /// A declarative menu entry is neither an item nor a separator.
    #[error("Menu entries must be items or separators, found {found} {location}")]
    InvalidItemType {
        /// Description of the offending entry.
        found: String,
        /// Source location where error occurred.
        location: ErrorLocation,
    },

    /// `update` was called on an item no menu owns yet.
    #[error("Menu item {id} is not bound to a menu {location}")]
    NotBound {
        /// Id of the unbound item.
        id: u32,
        /// Source location where error occurred.
        location: ErrorLocation,
    },

    /// A menu was built from an item another menu already owns.
    #[error("Menu item {id} is already bound to a menu {location}")]
    AlreadyBound {
        /// Id of the item.
        id: u32,
        /// Source location where error occurred.
        location: ErrorLocation,
    },

    /// The id allocator ran out of `u32` values.
    #[error("Menu item ids exhausted {location}")]
    IdsExhausted {
        /// Source location where error occurred.
        location: ErrorLocation,
    },

    /// A menu template could not be decoded.
    #[error("Malformed menu template at offset {offset}: {reason} {location}")]
    MalformedTemplate {
        /// Byte offset of the failure.
        offset: usize,
        /// Description of the problem.
        reason: String,
        /// Source location where error occurred.
        location: ErrorLocation,
    },

    /// The native layer reported a failure.
    #[error("Native tray operation failed: {source} {location}")]
    Native {
        /// Underlying error from the backend.
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
        /// Source location where error occurred.
        location: ErrorLocation,
    },
}

impl TrayError {
    /// Wrap a backend failure, recording the caller's location.
    #[track_caller]
    pub fn native<E>(source: E) -> Self
    where
        E: Into<Box<dyn std::error::Error + Send + Sync>>,
    {
        TrayError::Native {
            source: source.into(),
            location: ErrorLocation::from(std::panic::Location::caller()),
        }
    }
}

/// Result type alias using [`TrayError`].
pub type Result<T> = std::result::Result<T, TrayError>;
