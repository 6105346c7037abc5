use crate::ScrollState;

/// What the engine must do after the tracker observed a centered item.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct SelectionUpdate {
    /// The selection before this observation (`None` when nothing was selected).
    pub previous: Option<usize>,
    /// The selected index changed; the previous view must be unmarked and the new one marked.
    pub changed: bool,
    /// A selection-changed notification must fire now.
    pub notify: bool,
}

/// Selection state machine.
///
/// It owns the current selection, the last reported scroll state and the "notify when idle"
/// flag used when notifications are suppressed during motion. It does not touch views; the
/// engine feeds it the index of the centered item and applies the returned [`SelectionUpdate`].
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct SelectionTracker {
    current: Option<usize>,
    scroll_state: ScrollState,
    notify_on_idle: bool,
}

impl SelectionTracker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn current(&self) -> Option<usize> {
        self.current
    }

    pub fn scroll_state(&self) -> ScrollState {
        self.scroll_state
    }

    /// A notification was deferred and will fire when the scroll state reaches idle.
    pub fn has_pending_notification(&self) -> bool {
        self.notify_on_idle
    }

    /// Observes the centered item after a scroll-position update.
    pub fn on_scrolled(
        &mut self,
        centered: usize,
        suppress_during_motion: bool,
    ) -> SelectionUpdate {
        if self.current == Some(centered) {
            return SelectionUpdate {
                previous: self.current,
                ..SelectionUpdate::default()
            };
        }

        let previous = self.current.replace(centered);
        if suppress_during_motion && !self.scroll_state.is_idle() {
            self.notify_on_idle = true;
            return SelectionUpdate {
                previous,
                changed: true,
                notify: false,
            };
        }

        self.notify_on_idle = false;
        SelectionUpdate {
            previous,
            changed: true,
            notify: true,
        }
    }

    pub fn set_scroll_state(&mut self, state: ScrollState) {
        self.scroll_state = state;
    }

    /// Observes the centered item once the scroll state is idle.
    ///
    /// A deferred notification fires here even when the index did not change again.
    pub fn on_idle(&mut self, centered: usize, suppress_during_motion: bool) -> SelectionUpdate {
        if self.current != Some(centered) {
            let previous = self.current.replace(centered);
            self.notify_on_idle = false;
            return SelectionUpdate {
                previous,
                changed: true,
                notify: true,
            };
        }

        let notify = suppress_during_motion && self.notify_on_idle;
        if notify {
            self.notify_on_idle = false;
        }
        SelectionUpdate {
            previous: self.current,
            changed: false,
            notify,
        }
    }

    /// Clears the selection and any deferred notification. Returns the cleared selection.
    pub fn reset(&mut self) -> Option<usize> {
        self.notify_on_idle = false;
        self.current.take()
    }
}
