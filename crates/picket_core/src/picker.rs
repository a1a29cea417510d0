//! Searchable option picker engine.
//!
//! [`OptionPicker`] owns a master option list, the last applied filter term,
//! the filtered view derived from them, and the current selection. Hosts feed
//! list replacements, filter edits, and selection taps in, and read back the
//! filtered view, the selection, and the active (highlight) index after
//! every recomputation.
//!
//! The filtered view is always recomputed in full as a pure function of
//! (options, term, creation policy); it is never patched incrementally.
//! Recomputation runs on the caller's thread and completes before the call
//! returns, so a single-threaded UI event loop needs no synchronization.
//!
//! # Example
//!
//! ```rust
//! use picket_core::{NewEntry, OptionPicker};
//!
//! let mut picker = OptionPicker::searchable()
//!     .options(["Rust".to_string(), "Ruby".into(), "Python".into()])
//!     .new_entry(|term| Some(NewEntry::new(term.to_string(), format!("Create '{term}'"))))
//!     .build();
//!
//! picker.apply_filter(Some("ru"));
//! assert_eq!(picker.filtered().len(), 3); // "Create 'ru'", "Rust", "Ruby"
//! assert!(picker.is_new_entry(0));
//!
//! picker.select_at(1);
//! assert_eq!(picker.selection(), Some(&"Rust".to_string()));
//! ```

use std::fmt;
use std::sync::Arc;

use smallvec::SmallVec;

use crate::events::{PickerListeners, ReloadListenerId, SelectionListenerId};
use crate::search::{term_matches, SearchMatch};

// =============================================================================
// Callback Types
// =============================================================================

/// Host-supplied display-string function for an option.
pub type DisplayFn<T> = Arc<dyn Fn(&T) -> Option<String> + Send + Sync>;

/// Resolved match predicate applied to each option during filtering.
pub type MatchFn<T> = Arc<dyn Fn(&T, &str) -> bool + Send + Sync>;

/// Creation policy for the synthesized "create new" entry.
///
/// Called with the current non-empty filter term; returning `Some` prepends
/// the produced option at index 0 of the filtered view.
pub type NewEntryFn<T> = Arc<dyn Fn(&str) -> Option<NewEntry<T>> + Send + Sync>;

/// An option synthesized from typed text, with the display text the view
/// should show for it (e.g. `Create 'Bob'` rather than just `Bob`).
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct NewEntry<T> {
    /// The selectable value.
    pub option: T,
    /// Display text for the synthesized row.
    pub display: String,
}

impl<T> NewEntry<T> {
    /// Pair a synthesized option with its display text.
    pub fn new(option: T, display: impl Into<String>) -> Self {
        Self {
            option,
            display: display.into(),
        }
    }
}

/// Deferred notifications collected while a recomputation mutates state.
enum Notice {
    Reload,
    SelectionChanged,
}

type Notices = SmallVec<[Notice; 2]>;

// =============================================================================
// OptionPicker
// =============================================================================

/// Headless state for a searchable option picker.
///
/// Two states exist: *unfiltered* (no term applied, the view mirrors the
/// master list) and *filtered* (a term is applied, including the empty
/// string). [`set_options`](Self::set_options) never changes state; it forces
/// a fresh pass through the current term because the candidate pool changed.
///
/// No method fails or panics: out-of-range indices, duplicate terms, and
/// empty lists are defined no-ops. A widget fed by raw user input must never
/// crash on it.
pub struct OptionPicker<T: Clone + PartialEq> {
    options: Vec<T>,
    last_filter: Option<String>,
    filtered: Vec<T>,
    /// Display text for index 0 when it is the synthesized entry.
    new_entry_display: Option<String>,
    selection: Option<T>,
    active_index: Option<usize>,
    match_fn: MatchFn<T>,
    display_fn: Option<DisplayFn<T>>,
    new_entry_fn: Option<NewEntryFn<T>>,
    listeners: PickerListeners<T>,
}

impl<T: Clone + PartialEq + SearchMatch> OptionPicker<T> {
    /// Start a picker whose options match themselves via [`SearchMatch`].
    pub fn searchable() -> PickerBuilder<T> {
        PickerBuilder::with_matcher(|option: &T, term: &str| option.matches(term))
    }
}

impl<T: Clone + PartialEq> OptionPicker<T> {
    /// Start a picker that matches against a display-string function.
    ///
    /// The function doubles as the match source: an option whose display
    /// string is `None` never matches a non-empty term.
    pub fn with_display(
        display: impl Fn(&T) -> Option<String> + Send + Sync + 'static,
    ) -> PickerBuilder<T>
    where
        T: 'static,
    {
        let display: DisplayFn<T> = Arc::new(display);
        let match_source = Arc::clone(&display);
        let mut builder = PickerBuilder::with_matcher(move |option: &T, term: &str| {
            match_source(option)
                .map(|text| term_matches(&text, term))
                .unwrap_or(false)
        });
        builder.display_fn = Some(display);
        builder
    }

    /// Start a picker with a fully custom match predicate.
    pub fn with_matcher(
        matcher: impl Fn(&T, &str) -> bool + Send + Sync + 'static,
    ) -> PickerBuilder<T> {
        PickerBuilder::with_matcher(matcher)
    }

    // -------------------------------------------------------------------------
    // Inputs
    // -------------------------------------------------------------------------

    /// Replace the master option list.
    ///
    /// Always recomputes the filtered view through the current term, even
    /// when the term is unchanged, because the candidate pool is new. An
    /// empty list is valid and yields an empty view; the selection is left
    /// as it was.
    pub fn set_options(&mut self, options: impl IntoIterator<Item = T>) {
        self.options = options.into_iter().collect();
        let term = self.last_filter.clone();
        self.update_results(term.as_deref(), true);
    }

    /// Apply a filter term. `None` clears the filter; `Some("")` is a real
    /// (match-everything) term, not a cleared one.
    ///
    /// Re-applying the identical term is a complete no-op: no recomputation,
    /// no events. Duplicate keystroke callbacks with unchanged text are
    /// expected and cheap.
    pub fn apply_filter(&mut self, term: Option<&str>) {
        self.update_results(term, false);
    }

    /// Apply a filter term, bypassing the duplicate-term short-circuit.
    pub fn apply_filter_forced(&mut self, term: Option<&str>) {
        self.update_results(term, true);
    }

    /// Select the option at `index` in the filtered view.
    ///
    /// Out-of-range indices (including any index into an empty view) are
    /// silent no-ops; a tap raced against a recomputation must not crash or
    /// mis-select. Emits a selection-changed event only when the value
    /// actually changed.
    pub fn select_at(&mut self, index: usize) {
        let mut notices = Notices::new();
        self.select_index(index, &mut notices);
        self.drain(notices);
    }

    /// Replace the creation policy for synthesized entries.
    ///
    /// Takes effect on the next recomputation; the current view is not
    /// refreshed.
    pub fn set_new_entry_fn(&mut self, f: Option<NewEntryFn<T>>) {
        self.new_entry_fn = f;
    }

    // -------------------------------------------------------------------------
    // Outputs
    // -------------------------------------------------------------------------

    /// The master option list.
    pub fn options(&self) -> &[T] {
        &self.options
    }

    /// The filtered view, including the synthesized entry at index 0 when
    /// present.
    pub fn filtered(&self) -> &[T] {
        &self.filtered
    }

    /// The last applied filter term. `None` means unfiltered.
    pub fn filter_term(&self) -> Option<&str> {
        self.last_filter.as_deref()
    }

    /// The current selection.
    pub fn selection(&self) -> Option<&T> {
        self.selection.as_ref()
    }

    /// Display text for the current selection, via the display function.
    pub fn selection_display(&self) -> Option<String> {
        let selection = self.selection.as_ref()?;
        self.display_fn.as_ref().and_then(|f| f(selection))
    }

    /// The index a picker widget should highlight, when any.
    pub fn active_index(&self) -> Option<usize> {
        self.active_index
    }

    /// True when `index` is the synthesized "create new" entry.
    pub fn is_new_entry(&self, index: usize) -> bool {
        index == 0 && self.new_entry_display.is_some()
    }

    /// Display text for a row of the filtered view: the synthesized display
    /// at index 0 when present, otherwise the display function's answer.
    pub fn display_at(&self, index: usize) -> Option<String> {
        if index >= self.filtered.len() {
            return None;
        }
        if index == 0 {
            if let Some(display) = &self.new_entry_display {
                return Some(display.clone());
            }
        }
        self.display_fn
            .as_ref()
            .and_then(|f| f(&self.filtered[index]))
    }

    // -------------------------------------------------------------------------
    // Listeners
    // -------------------------------------------------------------------------

    /// Register a listener fired after every recomputation.
    pub fn on_view_reload(&mut self, f: impl Fn() + Send + Sync + 'static) -> ReloadListenerId {
        self.listeners.add_reload(f)
    }

    /// Register a listener fired when the selection changes, receiving the
    /// new selection by parameter.
    pub fn on_selection_changed(
        &mut self,
        f: impl Fn(Option<&T>) + Send + Sync + 'static,
    ) -> SelectionListenerId {
        self.listeners.add_selection(f)
    }

    /// Remove a reload listener by id.
    pub fn remove_reload_listener(&mut self, id: ReloadListenerId) -> bool {
        self.listeners.remove_reload(id)
    }

    /// Remove a selection listener by id.
    pub fn remove_selection_listener(&mut self, id: SelectionListenerId) -> bool {
        self.listeners.remove_selection(id)
    }

    /// Drop every listener. Call at teardown so a discarded widget cannot
    /// call back into a dead host.
    pub fn detach_listeners(&mut self) {
        self.listeners.clear();
    }

    // -------------------------------------------------------------------------
    // Recomputation
    // -------------------------------------------------------------------------

    fn update_results(&mut self, term: Option<&str>, forced: bool) {
        if !forced && self.last_filter.as_deref() == term {
            return;
        }

        self.last_filter = term.map(str::to_owned);

        let (filtered, new_entry_display) = match self.last_filter.as_deref() {
            Some(term) => {
                let mut list: Vec<T> = self
                    .options
                    .iter()
                    .filter(|&option| (self.match_fn)(option, term))
                    .cloned()
                    .collect();

                let mut created = None;
                if !term.is_empty() {
                    if let Some(make) = self.new_entry_fn.as_ref() {
                        if let Some(entry) = make(term) {
                            list.insert(0, entry.option);
                            created = Some(entry.display);
                        }
                    }
                }

                (list, created)
            }
            None => (self.options.clone(), None),
        };
        self.filtered = filtered;
        self.new_entry_display = new_entry_display;

        tracing::debug!(
            "filter {:?} (forced: {}) -> {} of {} options",
            self.last_filter,
            forced,
            self.filtered.len(),
            self.options.len()
        );

        let mut notices = Notices::new();
        notices.push(Notice::Reload);

        if self.filtered.len() == 1 {
            // Narrowed to a single candidate: it becomes the selection.
            self.select_index(0, &mut notices);
        } else if self.filtered.len() > 1 {
            let tracked = self
                .selection
                .as_ref()
                .and_then(|selection| self.filtered.iter().position(|o| o == selection));
            match tracked {
                Some(position) => self.active_index = Some(position),
                // Selection hidden (or absent): the highlight stays where the
                // wheel was, pulled into the new view's bounds.
                None => {
                    self.active_index = self.active_index.map(|i| i.min(self.filtered.len() - 1))
                }
            }
        } else {
            self.active_index = None;
        }

        self.drain(notices);
    }

    fn select_index(&mut self, index: usize, notices: &mut Notices) {
        if index >= self.filtered.len() {
            return;
        }
        self.active_index = Some(index);
        let next = self.filtered[index].clone();
        if self.selection.as_ref() != Some(&next) {
            self.selection = Some(next);
            notices.push(Notice::SelectionChanged);
        }
    }

    fn drain(&mut self, notices: Notices) {
        for notice in notices {
            match notice {
                Notice::Reload => self.listeners.notify_reload(),
                Notice::SelectionChanged => {
                    self.listeners.notify_selection(self.selection.as_ref())
                }
            }
        }
    }
}

impl<T: Clone + PartialEq + fmt::Debug> fmt::Debug for OptionPicker<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("OptionPicker")
            .field("options", &self.options.len())
            .field("filter", &self.last_filter)
            .field("filtered", &self.filtered)
            .field("selection", &self.selection)
            .field("active_index", &self.active_index)
            .field("listeners", &self.listeners)
            .finish()
    }
}

// =============================================================================
// PickerBuilder
// =============================================================================

/// Builder for [`OptionPicker`].
///
/// `build()` pushes the initial option list through
/// [`set_options`](OptionPicker::set_options), so construction-time options
/// behave exactly like a later replacement, auto-selection on a singleton
/// view included.
pub struct PickerBuilder<T: Clone + PartialEq> {
    options: Vec<T>,
    match_fn: MatchFn<T>,
    display_fn: Option<DisplayFn<T>>,
    new_entry_fn: Option<NewEntryFn<T>>,
}

impl<T: Clone + PartialEq> PickerBuilder<T> {
    fn with_matcher(matcher: impl Fn(&T, &str) -> bool + Send + Sync + 'static) -> Self {
        Self {
            options: Vec::new(),
            match_fn: Arc::new(matcher),
            display_fn: None,
            new_entry_fn: None,
        }
    }

    /// Add a single option.
    pub fn option(mut self, option: T) -> Self {
        self.options.push(option);
        self
    }

    /// Add multiple options.
    pub fn options(mut self, options: impl IntoIterator<Item = T>) -> Self {
        self.options.extend(options);
        self
    }

    /// Set the display-string function used for rendering.
    ///
    /// This does not change the match source chosen at construction;
    /// a picker started with [`OptionPicker::with_display`] keeps matching
    /// through its original display function.
    pub fn display(mut self, f: impl Fn(&T) -> Option<String> + Send + Sync + 'static) -> Self {
        self.display_fn = Some(Arc::new(f));
        self
    }

    /// Configure the creation policy for the synthesized "create new" entry.
    pub fn new_entry(
        mut self,
        f: impl Fn(&str) -> Option<NewEntry<T>> + Send + Sync + 'static,
    ) -> Self {
        self.new_entry_fn = Some(Arc::new(f));
        self
    }

    /// Build the picker and run the initial recomputation.
    pub fn build(self) -> OptionPicker<T> {
        let mut picker = OptionPicker {
            options: Vec::new(),
            last_filter: None,
            filtered: Vec::new(),
            new_entry_display: None,
            selection: None,
            active_index: None,
            match_fn: self.match_fn,
            display_fn: self.display_fn,
            new_entry_fn: self.new_entry_fn,
            listeners: PickerListeners::new(),
        };
        picker.set_options(self.options);
        picker
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    fn number_names() -> Vec<String> {
        [
            "One", "Two", "Three", "Four", "Five", "Six", "Seven", "Eight", "Nine", "Ten",
            "Eleven", "Twelve", "Thirteen", "Fourteen", "Fifteen", "Sixteen", "Seventeen",
            "Eighteen", "Nineteen", "Twenty",
        ]
        .iter()
        .map(|s| s.to_string())
        .collect()
    }

    fn searchable(options: Vec<String>) -> OptionPicker<String> {
        OptionPicker::searchable().options(options).build()
    }

    #[test]
    fn test_filter_preserves_master_order() {
        let mut picker = searchable(number_names());
        picker.apply_filter(Some("t"));

        let expected: Vec<String> = number_names()
            .into_iter()
            .filter(|n| n.to_lowercase().contains('t'))
            .collect();
        assert_eq!(picker.filtered(), expected.as_slice());
    }

    #[test]
    fn test_clearing_filter_restores_full_list() {
        let mut picker = searchable(number_names());
        picker.apply_filter(Some("thir"));
        picker.apply_filter(None);
        assert_eq!(picker.filtered(), number_names().as_slice());
        assert_eq!(picker.filter_term(), None);
    }

    #[test]
    fn test_singleton_narrowing_selects_automatically() {
        let mut picker = searchable(number_names());
        picker.apply_filter(Some("thir"));

        assert_eq!(picker.filtered(), ["Thirteen".to_string()]);
        assert_eq!(picker.selection(), Some(&"Thirteen".to_string()));
        assert_eq!(picker.active_index(), Some(0));
    }

    #[test]
    fn test_empty_term_matches_everything_without_synthesis() {
        let mut picker = OptionPicker::searchable()
            .options(["One".to_string(), "Two".into(), "Three".into()])
            .new_entry(|term| Some(NewEntry::new(term.to_string(), format!("Create '{term}'"))))
            .build();

        picker.apply_filter(Some(""));

        assert_eq!(
            picker.filtered(),
            ["One".to_string(), "Two".into(), "Three".into()]
        );
        assert!(!picker.is_new_entry(0));
        assert_eq!(picker.filter_term(), Some(""));
    }

    #[test]
    fn test_synthesized_singleton_is_auto_selected() {
        let mut picker = OptionPicker::searchable()
            .options(["One".to_string(), "Two".into()])
            .new_entry(|term| Some(NewEntry::new(term.to_string(), format!("Create '{term}'"))))
            .build();

        picker.apply_filter(Some("New"));

        assert_eq!(picker.filtered(), ["New".to_string()]);
        assert!(picker.is_new_entry(0));
        assert_eq!(picker.display_at(0).as_deref(), Some("Create 'New'"));
        assert_eq!(picker.selection(), Some(&"New".to_string()));
    }

    #[test]
    fn test_synthesized_entry_prepends_to_matches() {
        let mut picker = searchable(vec!["New York".into(), "Newark".into(), "Boston".into()]);
        picker.set_new_entry_fn(Some(Arc::new(|term: &str| {
            Some(NewEntry::new(term.to_string(), format!("Create '{term}'")))
        })));

        picker.apply_filter(Some("New"));

        assert_eq!(
            picker.filtered(),
            ["New".to_string(), "New York".into(), "Newark".into()]
        );
        assert!(picker.is_new_entry(0));
        assert!(!picker.is_new_entry(1));
        // Three candidates: nothing is auto-selected.
        assert_eq!(picker.selection(), None);
    }

    #[test]
    fn test_creation_policy_can_decline() {
        let mut picker = OptionPicker::searchable()
            .options(["One".to_string(), "Two".into()])
            .new_entry(|term| {
                (term.len() > 2).then(|| NewEntry::new(term.to_string(), term.to_string()))
            })
            .build();

        picker.apply_filter(Some("Tw"));
        assert_eq!(picker.filtered(), ["Two".to_string()]);
        assert!(!picker.is_new_entry(0));
    }

    #[test]
    fn test_empty_options_keep_selection_and_reject_taps() {
        let mut picker = searchable(vec!["One".into(), "Two".into()]);
        picker.apply_filter(Some("one"));
        assert_eq!(picker.selection(), Some(&"One".to_string()));

        picker.set_options(Vec::<String>::new());

        assert!(picker.filtered().is_empty());
        assert_eq!(picker.selection(), Some(&"One".to_string()));
        assert_eq!(picker.active_index(), None);

        picker.select_at(0);
        assert_eq!(picker.selection(), Some(&"One".to_string()));
    }

    #[test]
    fn test_select_at_ignores_stale_indices() {
        let mut picker = searchable(number_names());
        picker.select_at(500);
        assert_eq!(picker.selection(), None);

        picker.select_at(2);
        assert_eq!(picker.selection(), Some(&"Three".to_string()));
        assert_eq!(picker.active_index(), Some(2));
    }

    #[test]
    fn test_duplicate_term_short_circuits() {
        let reloads = Arc::new(AtomicUsize::new(0));
        let mut picker = searchable(number_names());
        {
            let reloads = reloads.clone();
            picker.on_view_reload(move || {
                reloads.fetch_add(1, Ordering::SeqCst);
            });
        }

        picker.apply_filter(Some("teen"));
        let view_after_first: Vec<String> = picker.filtered().to_vec();
        let selection_after_first = picker.selection().cloned();
        let active_after_first = picker.active_index();
        assert_eq!(reloads.load(Ordering::SeqCst), 1);

        // Same term again: nothing recomputes, nothing fires.
        picker.apply_filter(Some("teen"));
        assert_eq!(reloads.load(Ordering::SeqCst), 1);
        assert_eq!(picker.filtered(), view_after_first.as_slice());
        assert_eq!(picker.selection().cloned(), selection_after_first);
        assert_eq!(picker.active_index(), active_after_first);

        // Forcing bypasses the short-circuit.
        picker.apply_filter_forced(Some("teen"));
        assert_eq!(reloads.load(Ordering::SeqCst), 2);
    }

    #[test]
    fn test_set_options_forces_recompute_with_unchanged_term() {
        let mut picker = searchable(vec!["Alpha".into(), "Beta".into()]);
        picker.apply_filter(Some("zzz"));
        assert!(picker.filtered().is_empty());

        picker.set_options(vec!["zzz-compliant".to_string(), "Beta".into()]);

        // Same term, new pool: the view refreshes and narrows to one.
        assert_eq!(picker.filtered(), ["zzz-compliant".to_string()]);
        assert_eq!(picker.selection(), Some(&"zzz-compliant".to_string()));
    }

    #[test]
    fn test_active_index_tracks_selection_across_recompute() {
        let mut picker = searchable(vec![
            "One".to_string(),
            "Two".into(),
            "Three".into(),
            "Four".into(),
            "Five".into(),
        ]);
        picker.select_at(4);
        assert_eq!(picker.selection(), Some(&"Five".to_string()));

        picker.apply_filter(Some("f"));

        assert_eq!(picker.filtered(), ["Four".to_string(), "Five".into()]);
        assert_eq!(picker.selection(), Some(&"Five".to_string()));
        assert_eq!(picker.active_index(), Some(1));
    }

    #[test]
    fn test_hidden_selection_clamps_highlight_into_view() {
        let mut picker = searchable(vec![
            "Red".to_string(),
            "Green".into(),
            "Blue".into(),
            "Grey".into(),
        ]);
        picker.select_at(2);
        assert_eq!(picker.active_index(), Some(2));

        picker.apply_filter(Some("gre"));

        // "Blue" is filtered out; the highlight stays in bounds, the
        // selection is untouched.
        assert_eq!(picker.filtered(), ["Green".to_string(), "Grey".into()]);
        assert_eq!(picker.selection(), Some(&"Blue".to_string()));
        assert_eq!(picker.active_index(), Some(1));
    }

    #[test]
    fn test_selection_events_fire_only_on_change() {
        let changes = Arc::new(AtomicUsize::new(0));
        let mut picker = searchable(number_names());
        {
            let changes = changes.clone();
            picker.on_selection_changed(move |_| {
                changes.fetch_add(1, Ordering::SeqCst);
            });
        }

        picker.select_at(3);
        picker.select_at(3);
        assert_eq!(changes.load(Ordering::SeqCst), 1);

        picker.select_at(4);
        assert_eq!(changes.load(Ordering::SeqCst), 2);
    }

    #[test]
    fn test_single_option_list_selects_at_build() {
        let picker = searchable(vec!["Solo".into()]);
        assert_eq!(picker.selection(), Some(&"Solo".to_string()));
        assert_eq!(picker.active_index(), Some(0));
    }

    #[test]
    fn test_display_based_matching() {
        #[derive(Clone, Debug, PartialEq)]
        struct City {
            id: u32,
            name: &'static str,
        }

        let mut picker = OptionPicker::with_display(|city: &City| Some(city.name.to_string()))
            .options([
                City { id: 1, name: "Lisbon" },
                City { id: 2, name: "London" },
                City { id: 3, name: "Porto" },
            ])
            .build();

        picker.apply_filter(Some("on"));
        assert_eq!(picker.filtered().len(), 2);
        assert_eq!(picker.display_at(1).as_deref(), Some("London"));

        picker.apply_filter(Some("london"));
        assert_eq!(
            picker.selection(),
            Some(&City { id: 2, name: "London" })
        );
        assert_eq!(picker.selection_display().as_deref(), Some("London"));
    }

    #[test]
    fn test_display_at_out_of_range_is_none() {
        let picker = searchable(vec!["One".into()]);
        assert_eq!(picker.display_at(7), None);
        assert!(!picker.is_new_entry(7));
    }

    #[test]
    fn test_detach_listeners_silences_events() {
        let reloads = Arc::new(AtomicUsize::new(0));
        let mut picker = searchable(number_names());
        {
            let reloads = reloads.clone();
            picker.on_view_reload(move || {
                reloads.fetch_add(1, Ordering::SeqCst);
            });
        }

        picker.apply_filter(Some("one"));
        assert_eq!(reloads.load(Ordering::SeqCst), 1);

        picker.detach_listeners();
        picker.apply_filter(Some("two"));
        assert_eq!(reloads.load(Ordering::SeqCst), 1);
    }
}
