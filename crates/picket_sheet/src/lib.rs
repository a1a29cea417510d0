//! # picket Sheet Model (picket_sheet)
//!
//! Headless model for a bottom-sheet modal: an option list folded into a
//! resolved configuration, clamped presentation geometry, and a small
//! lifecycle state machine. Hosts own the views, the animations, and the
//! gestures; this crate answers what size the sheet is, where it sits,
//! whether a tap should dismiss it, and which lifecycle state it is in.
//!
//! ## Example
//!
//! ```rust
//! use picket_sheet::{Point, SheetConfig, SheetOption, SheetState, Sheet, Size};
//!
//! let config = SheetConfig::from_options([
//!     SheetOption::PercentHeight(0.5),
//!     SheetOption::DismissOnBackdropTap,
//! ]);
//! let mut sheet = Sheet::new(config);
//!
//! sheet.present(Size::new(400.0, 800.0));
//! sheet.transition_finished();
//! assert_eq!(sheet.state(), SheetState::Presented);
//!
//! // A tap above the sheet starts dismissal.
//! assert!(sheet.backdrop_tapped(Point::new(200.0, 100.0)));
//! ```

pub mod geometry;
pub mod options;
pub mod sheet;

pub use geometry::{Point, Rect, Size};
pub use options::{Axis, SheetConfig, SheetOption, SheetWarning};
pub use sheet::{DismissFn, DismissListenerId, Sheet, SheetEvent, SheetState};
