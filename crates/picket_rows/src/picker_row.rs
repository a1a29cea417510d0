//! Searchable picker rows.
//!
//! One row model serves every picker variant; a [`PickerMode`] tag tells the
//! host how to present it instead of each variant being its own type. All
//! filtering, selection, and subscription behavior lives in the wrapped
//! [`OptionPicker`]; the row layers titles, enable/disable, inline expansion,
//! and keyboard-editor visibility on top.

use std::fmt;

use picket_core::OptionPicker;
use serde::{Deserialize, Serialize};

use crate::config::RowConfig;

// =============================================================================
// PickerMode
// =============================================================================

/// How a host presents a picker row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PickerMode {
    /// A wheel that is always visible next to the row.
    Plain,
    /// A wheel revealed beneath the row while it is expanded.
    Inline,
    /// A wheel presented where the keyboard would be while the row edits.
    Keyboard,
}

// =============================================================================
// PickerRow
// =============================================================================

/// Row model wrapping an [`OptionPicker`] with row chrome.
///
/// Mode-specific operations are defined in every mode: calling an inline
/// operation on a plain row is a no-op, not an error. The wrapped picker is
/// reachable through [`picker`](Self::picker) / [`picker_mut`](Self::picker_mut)
/// for anything the row does not re-export, listener registration included.
pub struct PickerRow<T: Clone + PartialEq> {
    config: RowConfig,
    mode: PickerMode,
    picker: OptionPicker<T>,
    /// Hint text for the filter field. Keyboard-mode rows have no filter
    /// field and ignore it.
    filter_placeholder: Option<String>,
    expanded: bool,
    editor_visible: bool,
    bound: bool,
}

impl<T: Clone + PartialEq> PickerRow<T> {
    /// Wrap a picker in a row presented in `mode`.
    pub fn new(mode: PickerMode, picker: OptionPicker<T>) -> Self {
        Self {
            config: RowConfig::default(),
            mode,
            picker,
            filter_placeholder: None,
            expanded: false,
            editor_visible: false,
            bound: false,
        }
    }

    /// Set the row title.
    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.config.title = Some(title.into());
        self
    }

    /// Enable or disable the row.
    pub fn disabled(mut self, disabled: bool) -> Self {
        self.config.disabled = disabled;
        self
    }

    /// Set the filter field hint text.
    pub fn filter_placeholder(mut self, hint: impl Into<String>) -> Self {
        self.filter_placeholder = Some(hint.into());
        self
    }

    /// Set the detail text shown while nothing is selected.
    pub fn no_value_text(mut self, text: impl Into<String>) -> Self {
        self.config.no_value_display_text = Some(text.into());
        self
    }

    // -------------------------------------------------------------------------
    // Input events
    // -------------------------------------------------------------------------

    /// Keystroke callback from the filter field.
    ///
    /// Routed through the picker's short-circuit, so repeated callbacks with
    /// unchanged text cost nothing.
    pub fn filter_changed(&mut self, term: Option<&str>) {
        self.picker.apply_filter(term);
    }

    /// Replace the option list.
    pub fn set_options(&mut self, options: impl IntoIterator<Item = T>) {
        self.picker.set_options(options);
    }

    /// Select the option at `index` in the filtered view.
    pub fn select_at(&mut self, index: usize) {
        self.picker.select_at(index);
    }

    // -------------------------------------------------------------------------
    // Inline mode
    // -------------------------------------------------------------------------

    /// Whether the inline wheel is currently revealed.
    pub fn expanded(&self) -> bool {
        self.expanded
    }

    /// Toggle the inline wheel and return the new state.
    ///
    /// Only inline rows expand, and never while disabled. Collapsing leaves
    /// the filter and selection as they were.
    pub fn toggle_expanded(&mut self) -> bool {
        if self.mode != PickerMode::Inline || self.config.disabled {
            return self.expanded;
        }
        self.expanded = !self.expanded;
        self.config.highlighted = self.expanded;
        self.expanded
    }

    // -------------------------------------------------------------------------
    // Keyboard mode
    // -------------------------------------------------------------------------

    /// Whether the keyboard-replacing wheel is up.
    pub fn editor_visible(&self) -> bool {
        self.editor_visible
    }

    /// True when the row would accept focus.
    pub fn can_become_editor(&self) -> bool {
        self.mode == PickerMode::Keyboard && !self.config.disabled
    }

    /// Show the keyboard-replacing wheel. Returns whether it is now visible.
    pub fn begin_editing(&mut self) -> bool {
        if !self.can_become_editor() {
            return false;
        }
        self.editor_visible = true;
        self.config.highlighted = true;
        true
    }

    /// Hide the keyboard-replacing wheel.
    pub fn end_editing(&mut self) {
        self.editor_visible = false;
        self.config.highlighted = false;
    }

    // -------------------------------------------------------------------------
    // Lifecycle
    // -------------------------------------------------------------------------

    /// Mark the row attached to a host.
    pub fn bind(&mut self) {
        self.bound = true;
    }

    /// Whether the row is attached.
    pub fn is_bound(&self) -> bool {
        self.bound
    }

    /// Detach from the host: drops every picker listener and resets editing
    /// state. Data accessors keep answering afterwards.
    pub fn teardown(&mut self) {
        self.picker.detach_listeners();
        self.expanded = false;
        self.editor_visible = false;
        self.config.highlighted = false;
        self.bound = false;
        tracing::debug!("picker row detached: {:?}", self.config.title);
    }

    // -------------------------------------------------------------------------
    // Outputs
    // -------------------------------------------------------------------------

    /// Detail text: the selection's display text, else the configured
    /// no-value text.
    pub fn display_value(&self) -> Option<String> {
        self.picker
            .selection_display()
            .or_else(|| self.config.no_value_display_text.clone())
    }

    /// The current selection.
    pub fn selection(&self) -> Option<&T> {
        self.picker.selection()
    }

    /// The filtered view.
    pub fn filtered(&self) -> &[T] {
        self.picker.filtered()
    }

    /// The index a wheel should highlight.
    pub fn active_index(&self) -> Option<usize> {
        self.picker.active_index()
    }

    /// Row chrome.
    pub fn config(&self) -> &RowConfig {
        &self.config
    }

    /// Presentation mode tag.
    pub fn mode(&self) -> PickerMode {
        self.mode
    }

    /// Filter field hint text.
    pub fn filter_hint(&self) -> Option<&str> {
        self.filter_placeholder.as_deref()
    }

    /// The wrapped picker.
    pub fn picker(&self) -> &OptionPicker<T> {
        &self.picker
    }

    /// The wrapped picker, mutably. Listener registration goes through here.
    pub fn picker_mut(&mut self) -> &mut OptionPicker<T> {
        &mut self.picker
    }
}

impl<T: Clone + PartialEq + fmt::Debug> fmt::Debug for PickerRow<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PickerRow")
            .field("config", &self.config)
            .field("mode", &self.mode)
            .field("picker", &self.picker)
            .field("expanded", &self.expanded)
            .field("editor_visible", &self.editor_visible)
            .field("bound", &self.bound)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    fn languages() -> OptionPicker<String> {
        OptionPicker::searchable()
            .options(["Rust".to_string(), "Ruby".into(), "Go".into()])
            .display(|s: &String| Some(s.clone()))
            .build()
    }

    #[test]
    fn test_inline_row_expands_and_highlights() {
        let mut row = PickerRow::new(PickerMode::Inline, languages()).title("Language");

        assert!(!row.expanded());
        assert!(row.toggle_expanded());
        assert!(row.config().highlighted);

        assert!(!row.toggle_expanded());
        assert!(!row.config().highlighted);
    }

    #[test]
    fn test_collapsing_keeps_filter_and_selection() {
        let mut row = PickerRow::new(PickerMode::Inline, languages());
        assert!(row.toggle_expanded());
        row.filter_changed(Some("ru"));
        row.select_at(1);

        assert!(!row.toggle_expanded());

        assert_eq!(row.picker().filter_term(), Some("ru"));
        assert_eq!(row.filtered(), ["Rust".to_string(), "Ruby".into()]);
        assert_eq!(row.selection(), Some(&"Ruby".to_string()));
        assert_eq!(row.display_value().as_deref(), Some("Ruby"));
    }

    #[test]
    fn test_disabled_inline_row_never_expands() {
        let mut row = PickerRow::new(PickerMode::Inline, languages()).disabled(true);
        assert!(!row.toggle_expanded());
        assert!(!row.expanded());
    }

    #[test]
    fn test_expansion_is_inline_only() {
        let mut plain = PickerRow::new(PickerMode::Plain, languages());
        assert!(!plain.toggle_expanded());

        let mut keyboard = PickerRow::new(PickerMode::Keyboard, languages());
        assert!(!keyboard.toggle_expanded());
    }

    #[test]
    fn test_keyboard_row_editing() {
        let mut row = PickerRow::new(PickerMode::Keyboard, languages());

        assert!(row.can_become_editor());
        assert!(row.begin_editing());
        assert!(row.editor_visible());
        assert!(row.config().highlighted);

        row.end_editing();
        assert!(!row.editor_visible());
        assert!(!row.config().highlighted);
    }

    #[test]
    fn test_disabled_row_refuses_editor() {
        let mut row = PickerRow::new(PickerMode::Keyboard, languages()).disabled(true);
        assert!(!row.can_become_editor());
        assert!(!row.begin_editing());
        assert!(!row.editor_visible());
    }

    #[test]
    fn test_selection_updates_display_value_immediately() {
        let mut row = PickerRow::new(PickerMode::Keyboard, languages()).no_value_text("pick one");
        assert_eq!(row.display_value().as_deref(), Some("pick one"));

        row.select_at(0);
        assert_eq!(row.display_value().as_deref(), Some("Rust"));
    }

    #[test]
    fn test_filter_changed_short_circuits_duplicates() {
        let reloads = Arc::new(AtomicUsize::new(0));
        let mut row = PickerRow::new(PickerMode::Inline, languages());
        {
            let reloads = reloads.clone();
            row.picker_mut().on_view_reload(move || {
                reloads.fetch_add(1, Ordering::SeqCst);
            });
        }

        row.filter_changed(Some("ru"));
        row.filter_changed(Some("ru"));
        assert_eq!(reloads.load(Ordering::SeqCst), 1);
        assert_eq!(row.filtered(), ["Rust".to_string(), "Ruby".into()]);
    }

    #[test]
    fn test_teardown_drops_listeners_and_collapses() {
        let reloads = Arc::new(AtomicUsize::new(0));
        let mut row = PickerRow::new(PickerMode::Inline, languages());
        row.bind();
        row.toggle_expanded();
        {
            let reloads = reloads.clone();
            row.picker_mut().on_view_reload(move || {
                reloads.fetch_add(1, Ordering::SeqCst);
            });
        }

        row.teardown();

        assert!(!row.is_bound());
        assert!(!row.expanded());
        row.filter_changed(Some("go"));
        assert_eq!(reloads.load(Ordering::SeqCst), 0);
        // Data accessors still answer after teardown.
        assert_eq!(row.filtered(), ["Go".to_string()]);
        assert_eq!(row.selection(), Some(&"Go".to_string()));
    }
}
