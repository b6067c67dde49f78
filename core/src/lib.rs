use serde::{Deserialize, Serialize};

pub mod error;
pub mod validation;

pub use error::SessionInvariantViolation;
pub use validation::{SessionValidator, validate_session};

/// Opens a completion session: the popup was shown with `item_ids` as the
/// full candidate list and the cursor on the first entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, bon::Builder)]
pub struct SessionStarted {
    #[builder(into)]
    pub session_uid: String,
    pub sequence: u64,
    /// Language of the file the popup was invoked in (carried for analytics,
    /// never validated).
    #[builder(into)]
    pub language: String,
    /// Ids of every candidate shown, in display order.
    pub item_ids: Vec<u32>,
}

/// The popup was dismissed without selecting anything.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionCancelled {
    pub session_uid: String,
    pub sequence: u64,
}

/// Cursor moved one slot up, wrapping at the top of the list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UpPressed {
    pub session_uid: String,
    pub sequence: u64,
    /// Position the UI claims the cursor landed on.
    pub new_position: usize,
}

/// Cursor moved one slot down, wrapping at the bottom of the list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DownPressed {
    pub session_uid: String,
    pub sequence: u64,
    /// Position the UI claims the cursor landed on.
    pub new_position: usize,
}

/// The user typed a character and the candidate list was re-filtered.
///
/// Typing may only narrow the list; anything genuinely new must be declared
/// in `added_item_ids` (case-insensitive re-matching is the usual source).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, bon::Builder)]
pub struct Typed {
    #[builder(into)]
    pub session_uid: String,
    pub sequence: u64,
    pub visible_item_ids: Vec<u32>,
    pub added_item_ids: Vec<u32>,
    pub new_position: usize,
}

/// The user erased a character; previously filtered candidates may return.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, bon::Builder)]
pub struct Backspace {
    #[builder(into)]
    pub session_uid: String,
    pub sequence: u64,
    pub visible_item_ids: Vec<u32>,
    pub added_item_ids: Vec<u32>,
    pub new_position: usize,
}

/// The highlighted candidate was committed with Enter/Tab.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExplicitSelect {
    pub session_uid: String,
    pub sequence: u64,
    pub selected_position: usize,
    /// Id of the committed candidate (carried for analytics, never validated).
    pub selected_item_id: u32,
}

/// A candidate was committed by typing its full text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TypedSelect {
    pub session_uid: String,
    pub sequence: u64,
    pub selected_position: usize,
    /// Id of the committed candidate (carried for analytics, never validated).
    pub selected_item_id: u32,
}

/// Everything a completion popup can report over one session, in the order
/// the UI recorded it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum CompletionEvent {
    SessionStarted(SessionStarted),
    SessionCancelled(SessionCancelled),
    UpPressed(UpPressed),
    DownPressed(DownPressed),
    Typed(Typed),
    Backspace(Backspace),
    ExplicitSelect(ExplicitSelect),
    TypedSelect(TypedSelect),
}

impl CompletionEvent {
    pub fn session_uid(&self) -> &str {
        match self {
            Self::SessionStarted(e) => &e.session_uid,
            Self::SessionCancelled(e) => &e.session_uid,
            Self::UpPressed(e) => &e.session_uid,
            Self::DownPressed(e) => &e.session_uid,
            Self::Typed(e) => &e.session_uid,
            Self::Backspace(e) => &e.session_uid,
            Self::ExplicitSelect(e) => &e.session_uid,
            Self::TypedSelect(e) => &e.session_uid,
        }
    }

    pub fn sequence(&self) -> u64 {
        match self {
            Self::SessionStarted(e) => e.sequence,
            Self::SessionCancelled(e) => e.sequence,
            Self::UpPressed(e) => e.sequence,
            Self::DownPressed(e) => e.sequence,
            Self::Typed(e) => e.sequence,
            Self::Backspace(e) => e.sequence,
            Self::ExplicitSelect(e) => e.sequence,
            Self::TypedSelect(e) => e.sequence,
        }
    }

    /// Whether this event ends the session. No events are expected after a
    /// terminal one; enforcing that is the caller's job, not the validator's.
    pub fn is_terminal(&self) -> bool {
        matches!(
            self,
            Self::SessionCancelled(_) | Self::ExplicitSelect(_) | Self::TypedSelect(_)
        )
    }
}
