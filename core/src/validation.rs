use std::collections::HashSet;

use crate::error::SessionInvariantViolation;
use crate::{Backspace, CompletionEvent, DownPressed, SessionStarted, Typed, UpPressed};

/// Replays one completion session and checks every recorded event against
/// the state the events before it already committed to.
///
/// Navigation events carry the position the UI claims the cursor landed on;
/// the validator recomputes the expected position from its own tracked state,
/// so off-by-one bugs and duplicated or reordered events both surface as a
/// mismatch. A failed check condemns the session permanently, but state keeps
/// updating so later events are still absorbed without panicking.
#[derive(Debug, Clone)]
pub struct SessionValidator {
    item_count: usize,
    current_position: usize,
    visible: Vec<u32>,
    visible_set: HashSet<u32>,
    violation: Option<SessionInvariantViolation>,
}

impl SessionValidator {
    /// Starts tracking the session described by a `session_started` event.
    pub fn new(started: &SessionStarted) -> Self {
        Self {
            item_count: started.item_ids.len(),
            current_position: 0,
            visible: started.item_ids.clone(),
            visible_set: started.item_ids.iter().copied().collect(),
            violation: None,
        }
    }

    /// Folds one event into the tracked state.
    pub fn accept(&mut self, event: &CompletionEvent) {
        match event {
            CompletionEvent::SessionStarted(_) => {
                self.invalidate(SessionInvariantViolation::DuplicateSessionStart);
            }
            CompletionEvent::SessionCancelled(_) => {}
            CompletionEvent::UpPressed(e) => self.on_up(e),
            CompletionEvent::DownPressed(e) => self.on_down(e),
            CompletionEvent::Typed(e) => self.on_typed(e),
            CompletionEvent::Backspace(e) => self.on_backspace(e),
            CompletionEvent::ExplicitSelect(e) => self.on_select(e.selected_position),
            CompletionEvent::TypedSelect(e) => self.on_select(e.selected_position),
        }
    }

    /// Cumulative validity as of the most recently accepted event.
    pub fn is_session_valid(&self) -> bool {
        self.violation.is_none()
    }

    /// The breach that condemned the session, if any. Only the first one is
    /// kept.
    pub fn first_violation(&self) -> Option<&SessionInvariantViolation> {
        self.violation.as_ref()
    }

    pub fn current_position(&self) -> usize {
        self.current_position
    }

    pub fn visible_item_ids(&self) -> &[u32] {
        &self.visible
    }

    fn invalidate(&mut self, violation: SessionInvariantViolation) {
        if self.violation.is_none() {
            self.violation = Some(violation);
        }
    }

    fn on_up(&mut self, event: &UpPressed) {
        if self.item_count == 0 {
            self.invalidate(SessionInvariantViolation::NavigationOnEmptyList);
        } else {
            let expected = (self.current_position + self.item_count - 1) % self.item_count;
            if event.new_position != expected {
                self.invalidate(SessionInvariantViolation::UpMovedOutOfStep {
                    expected,
                    actual: event.new_position,
                });
            }
        }
        self.current_position = event.new_position;
    }

    fn on_down(&mut self, event: &DownPressed) {
        if self.item_count == 0 {
            self.invalidate(SessionInvariantViolation::NavigationOnEmptyList);
        } else {
            let expected = (self.current_position + 1) % self.item_count;
            if event.new_position != expected {
                self.invalidate(SessionInvariantViolation::DownMovedOutOfStep {
                    expected,
                    actual: event.new_position,
                });
            }
        }
        self.current_position = event.new_position;
    }

    /// Typing may only narrow the visible list. Whatever survives filtering
    /// must have been visible before, unless it is declared in
    /// `added_item_ids`; declared additions must be genuinely new and must
    /// actually appear in the new list.
    fn on_typed(&mut self, event: &Typed) {
        let added: HashSet<u32> = event.added_item_ids.iter().copied().collect();
        let shown: HashSet<u32> = event.visible_item_ids.iter().copied().collect();

        for &item_id in &event.added_item_ids {
            if self.visible_set.contains(&item_id) {
                self.invalidate(SessionInvariantViolation::AddedItemAlreadyVisible { item_id });
            } else if !shown.contains(&item_id) {
                self.invalidate(SessionInvariantViolation::AddedItemNotShown { item_id });
            }
        }

        for &item_id in &event.visible_item_ids {
            if !added.contains(&item_id) && !self.visible_set.contains(&item_id) {
                self.invalidate(SessionInvariantViolation::ListWidenedOnTyping { item_id });
            }
        }

        self.replace_visible(&event.visible_item_ids, event.new_position);
    }

    /// Backspace un-filters: the list may widen arbitrarily.
    fn on_backspace(&mut self, event: &Backspace) {
        self.replace_visible(&event.visible_item_ids, event.new_position);
    }

    /// Selections are checked against the tracked cursor, not against any id
    /// the selection event itself carries.
    fn on_select(&mut self, selected_position: usize) {
        if selected_position != self.current_position {
            self.invalidate(SessionInvariantViolation::SelectedWrongPosition {
                expected: self.current_position,
                actual: selected_position,
            });
        }
    }

    fn replace_visible(&mut self, item_ids: &[u32], new_position: usize) {
        self.visible = item_ids.to_vec();
        self.visible_set = item_ids.iter().copied().collect();
        self.current_position = new_position;
    }
}

/// Validate a full per-session event sequence in one call.
pub fn validate_session(
    started: &SessionStarted,
    events: &[CompletionEvent],
) -> Result<(), SessionInvariantViolation> {
    let mut validator = SessionValidator::new(started);
    for event in events {
        validator.accept(event);
    }
    match validator.first_violation() {
        Some(violation) => Err(violation.clone()),
        None => Ok(()),
    }
}
