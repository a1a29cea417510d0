//! # picket Row Models (picket_rows)
//!
//! Row-level widget models built on the `picket_core` engine.
//!
//! ## Philosophy
//!
//! A row model is the state a form row needs and nothing a renderer needs:
//! no views, no layout, no gestures. Hosts feed input events in (keystrokes,
//! taps, wheel picks) and read state back out; every operation is total, so
//! raw user input can be forwarded without validation.
//!
//! - **Engine**: `picket_core` owns filtering, selection, and subscriptions
//! - **Rows**: `picket_rows` layers titles, modes, and editing state on top
//!
//! ## Example
//!
//! ```rust
//! use picket_core::OptionPicker;
//! use picket_rows::{PickerMode, PickerRow};
//!
//! let picker = OptionPicker::searchable()
//!     .options(["Rust".to_string(), "Go".into()])
//!     .build();
//! let mut row = PickerRow::new(PickerMode::Inline, picker).title("Language");
//!
//! row.toggle_expanded();
//! row.filter_changed(Some("ru"));
//! assert_eq!(row.selection(), Some(&"Rust".to_string()));
//! ```
//!
//! ## Rows
//!
//! - **PickerRow** - searchable option picker in plain, inline, or keyboard
//!   presentation
//! - **DateRow** - date, time, datetime, and countdown values with bounds and
//!   minute intervals

pub mod config;
pub mod date_row;
pub mod picker_row;

pub use config::RowConfig;
pub use date_row::{
    DateFieldKind, DateFormat, DateRow, HighlightListenerId, ValueListenerId,
};
pub use picker_row::{PickerMode, PickerRow};

/// Prelude for convenient imports
pub mod prelude {
    pub use crate::config::RowConfig;
    pub use crate::date_row::{DateFieldKind, DateFormat, DateRow};
    pub use crate::picker_row::{PickerMode, PickerRow};
    // Re-export the engine types rows hand out
    pub use picket_core::{NewEntry, OptionPicker, SearchMatch};
}
