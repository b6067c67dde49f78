use thiserror::Error;

/// Contract breaches detected while replaying a completion session log.
///
/// A breach condemns the session; it is recorded, never thrown from the
/// validator's accept path.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SessionInvariantViolation {
    #[error("session_started can only appear once per session")]
    DuplicateSessionStart,
    #[error("cursor navigation on an empty completion list")]
    NavigationOnEmptyList,
    #[error("up moved the cursor to {actual}, expected {expected}")]
    UpMovedOutOfStep { expected: usize, actual: usize },
    #[error("down moved the cursor to {actual}, expected {expected}")]
    DownMovedOutOfStep { expected: usize, actual: usize },
    #[error("typing widened the completion list with undeclared item {item_id}")]
    ListWidenedOnTyping { item_id: u32 },
    #[error("item {item_id} was declared added but was already visible")]
    AddedItemAlreadyVisible { item_id: u32 },
    #[error("item {item_id} was declared added but is missing from the new list")]
    AddedItemNotShown { item_id: u32 },
    #[error("selection at position {actual}, cursor was at {expected}")]
    SelectedWrongPosition { expected: usize, actual: usize },
    #[error("session does not begin with session_started")]
    MissingSessionStart,
    #[error("events were recorded after the session was finalized")]
    EventAfterFinalization,
}
