//! Picket Core Engine
//!
//! This crate provides the headless engine behind picket's form-row widgets:
//!
//! - **Option Picker**: master option list + live text filter + selection,
//!   recomputed deterministically on every input event
//! - **Match Predicate**: the case-insensitive shorter-in-longer containment
//!   rule used for filtering, plus a trait for values that match themselves
//! - **Event Subscriptions**: reload/selection listeners with handle-based
//!   removal, so hosts can detach cleanly at teardown
//!
//! Nothing here renders. A host owns the widgets and the event loop; it feeds
//! keystrokes, taps, and list replacements into an [`OptionPicker`] and reads
//! the filtered view, selection, and active index back out. Every operation
//! is total: empty lists, stale indices, and duplicate filter terms are
//! defined no-ops, never panics.
//!
//! # Example
//!
//! ```rust
//! use picket_core::OptionPicker;
//!
//! let mut picker = OptionPicker::searchable()
//!     .options(["One".to_string(), "Two".into(), "Thirteen".into()])
//!     .build();
//!
//! picker.apply_filter(Some("thir"));
//! assert_eq!(picker.filtered(), ["Thirteen".to_string()]);
//! // Narrowing to a single candidate selects it automatically.
//! assert_eq!(picker.selection(), Some(&"Thirteen".to_string()));
//! ```

pub mod events;
pub mod picker;
pub mod search;

pub use events::{
    PickerListeners, ReloadFn, ReloadListenerId, SelectionFn, SelectionListenerId,
};
pub use picker::{DisplayFn, MatchFn, NewEntry, NewEntryFn, OptionPicker, PickerBuilder};
pub use search::{term_matches, SearchMatch};
