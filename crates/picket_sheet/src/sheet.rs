//! Sheet presentation lifecycle.
//!
//! [`SheetState`] is a four-state machine driven by host events: the host
//! reports when it starts presenting, when its transition animation lands,
//! and when something asks for dismissal. Events that have no transition
//! from the current state are ignored, so double-taps and stale animation
//! callbacks are harmless.

use std::fmt;
use std::sync::Arc;

use slotmap::{new_key_type, SlotMap};

use crate::geometry::{Point, Rect, Size};
use crate::options::SheetConfig;

// =============================================================================
// SheetState
// =============================================================================

/// Presentation lifecycle states.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum SheetState {
    /// Not on screen.
    #[default]
    Dismissed,
    /// Animating in.
    Presenting,
    /// On screen and settled.
    Presented,
    /// Animating out.
    Dismissing,
}

/// Lifecycle inputs a host forwards into the state machine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SheetEvent {
    Present,
    TransitionFinished,
    Dismiss,
}

impl SheetState {
    /// Handle an event and return the new state, or None if no transition.
    pub fn on_event(&self, event: SheetEvent) -> Option<Self> {
        match (self, event) {
            (SheetState::Dismissed, SheetEvent::Present) => Some(SheetState::Presenting),
            (SheetState::Presenting, SheetEvent::TransitionFinished) => Some(SheetState::Presented),
            // Dismissal during presentation interrupts the incoming animation.
            (SheetState::Presenting, SheetEvent::Dismiss) => Some(SheetState::Dismissing),
            (SheetState::Presented, SheetEvent::Dismiss) => Some(SheetState::Dismissing),
            (SheetState::Dismissing, SheetEvent::TransitionFinished) => Some(SheetState::Dismissed),
            _ => None,
        }
    }
}

// =============================================================================
// Sheet
// =============================================================================

new_key_type! {
    /// Handle for a registered dismissal listener.
    pub struct DismissListenerId;
}

/// Dismissal listener, fired once per completed dismissal.
pub type DismissFn = Arc<dyn Fn() + Send + Sync>;

/// A configured sheet plus its lifecycle state and container.
///
/// The sheet caches the container size from [`present`](Self::present)
/// onward and recomputes its frame from it on demand, so a container resize
/// mid-presentation only needs [`container_resized`](Self::container_resized).
pub struct Sheet {
    config: SheetConfig,
    state: SheetState,
    container: Option<Size>,
    dismissed_listeners: SlotMap<DismissListenerId, DismissFn>,
}

impl Sheet {
    pub fn new(config: SheetConfig) -> Self {
        Self {
            config,
            state: SheetState::Dismissed,
            container: None,
            dismissed_listeners: SlotMap::with_key(),
        }
    }

    /// Current lifecycle state.
    pub fn state(&self) -> SheetState {
        self.state
    }

    /// The presentation configuration.
    pub fn config(&self) -> &SheetConfig {
        &self.config
    }

    /// Begin presenting over a container. Ignored unless dismissed.
    pub fn present(&mut self, container: Size) -> SheetState {
        if let Some(next) = self.state.on_event(SheetEvent::Present) {
            self.container = Some(container);
            self.transition(next);
        }
        self.state
    }

    /// The host's presentation or dismissal animation landed.
    pub fn transition_finished(&mut self) -> SheetState {
        if let Some(next) = self.state.on_event(SheetEvent::TransitionFinished) {
            self.transition(next);
            if next == SheetState::Dismissed {
                self.container = None;
                for listener in self.dismissed_listeners.values() {
                    listener();
                }
            }
        }
        self.state
    }

    /// Ask the sheet to leave. Ignored while already dismissing or off
    /// screen.
    pub fn dismiss(&mut self) -> SheetState {
        if let Some(next) = self.state.on_event(SheetEvent::Dismiss) {
            self.transition(next);
        }
        self.state
    }

    /// Backdrop tap at `point`. Returns whether it started a dismissal.
    pub fn backdrop_tapped(&mut self, point: Point) -> bool {
        let Some(frame) = self.frame() else {
            return false;
        };
        if !self.config.backdrop_should_dismiss(point, frame) {
            return false;
        }
        let before = self.state;
        self.dismiss() != before
    }

    /// The container changed size (rotation, window resize) while the sheet
    /// is attached. Ignored when off screen.
    pub fn container_resized(&mut self, container: Size) {
        if self.container.is_some() {
            self.container = Some(container);
        }
    }

    /// The sheet's frame over the current container; `None` while off
    /// screen.
    pub fn frame(&self) -> Option<Rect> {
        self.container
            .map(|container| self.config.presented_frame(container))
    }

    /// Register a listener fired after each completed dismissal.
    pub fn on_dismissed(&mut self, f: impl Fn() + Send + Sync + 'static) -> DismissListenerId {
        self.dismissed_listeners.insert(Arc::new(f))
    }

    /// Remove a dismissal listener by id.
    pub fn remove_dismiss_listener(&mut self, id: DismissListenerId) -> bool {
        self.dismissed_listeners.remove(id).is_some()
    }

    /// Drop every listener.
    pub fn detach_listeners(&mut self) {
        self.dismissed_listeners.clear();
    }

    fn transition(&mut self, next: SheetState) {
        tracing::debug!("sheet {:?} -> {:?}", self.state, next);
        self.state = next;
    }
}

impl fmt::Debug for Sheet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Sheet")
            .field("config", &self.config)
            .field("state", &self.state)
            .field("container", &self.container)
            .field("dismissed_listeners", &self.dismissed_listeners.len())
            .finish()
    }
}
