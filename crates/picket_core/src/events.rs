//! Listener registries for picker events.
//!
//! Hosts subscribe callbacks and hold on to the returned ids; removing by id
//! (or [`PickerListeners::clear`] at teardown) is the resource-release
//! contract that keeps a discarded widget from calling back into a dead host.
//!
//! Two channels exist:
//!
//! - **view-needs-reload**: fired after every recomputation of the filtered
//!   view, whether or not its contents changed
//! - **selection-changed**: fired only when the selected value actually
//!   changed, with the new selection passed by parameter

use std::sync::Arc;

use slotmap::{new_key_type, SlotMap};

new_key_type! {
    /// Handle to a registered view-reload listener.
    pub struct ReloadListenerId;
    /// Handle to a registered selection-changed listener.
    pub struct SelectionListenerId;
}

/// Callback invoked when the filtered view must be re-read by the host.
pub type ReloadFn = Arc<dyn Fn() + Send + Sync>;

/// Callback invoked with the new selection when it changes.
///
/// The selection is passed by parameter rather than captured, so listeners
/// never need a reference back to the picker that owns them.
pub type SelectionFn<T> = Arc<dyn Fn(Option<&T>) + Send + Sync>;

/// Listener registry for a single picker.
pub struct PickerListeners<T> {
    reload: SlotMap<ReloadListenerId, ReloadFn>,
    selection: SlotMap<SelectionListenerId, SelectionFn<T>>,
}

impl<T> Default for PickerListeners<T> {
    fn default() -> Self {
        Self {
            reload: SlotMap::with_key(),
            selection: SlotMap::with_key(),
        }
    }
}

impl<T> PickerListeners<T> {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a view-reload listener.
    pub fn add_reload(&mut self, f: impl Fn() + Send + Sync + 'static) -> ReloadListenerId {
        self.reload.insert(Arc::new(f))
    }

    /// Register a selection-changed listener.
    pub fn add_selection(
        &mut self,
        f: impl Fn(Option<&T>) + Send + Sync + 'static,
    ) -> SelectionListenerId {
        self.selection.insert(Arc::new(f))
    }

    /// Remove a reload listener. Returns false if the id was already gone.
    pub fn remove_reload(&mut self, id: ReloadListenerId) -> bool {
        self.reload.remove(id).is_some()
    }

    /// Remove a selection listener. Returns false if the id was already gone.
    pub fn remove_selection(&mut self, id: SelectionListenerId) -> bool {
        self.selection.remove(id).is_some()
    }

    /// Drop every registration. Safe to call repeatedly.
    pub fn clear(&mut self) {
        self.reload.clear();
        self.selection.clear();
    }

    /// Number of live registrations across both channels.
    pub fn len(&self) -> usize {
        self.reload.len() + self.selection.len()
    }

    /// True when no listeners are registered.
    pub fn is_empty(&self) -> bool {
        self.reload.is_empty() && self.selection.is_empty()
    }

    /// Notify every reload listener.
    pub fn notify_reload(&self) {
        for f in self.reload.values() {
            f();
        }
    }

    /// Notify every selection listener with the new selection.
    pub fn notify_selection(&self, selection: Option<&T>) {
        for f in self.selection.values() {
            f(selection);
        }
    }
}

impl<T> std::fmt::Debug for PickerListeners<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PickerListeners")
            .field("reload", &self.reload.len())
            .field("selection", &self.selection.len())
            .finish()
    }
}
