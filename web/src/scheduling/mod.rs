//! Panel state machines driven by the calendar selection.
//!
//! The admin `AvailabilityEditor` and the client `SlotPicker` hold no
//! reactive handles: components keep them in signals, hand the returned
//! `RequestTicket` to an async task and feed the outcome back in.

pub mod availability_editor;
pub mod request;
pub mod slot_picker;

pub use availability_editor::{AvailabilityEditor, WindowField};
pub use request::{RequestTicket, RequestTracker};
pub use slot_picker::{ContactDetails, SlotPicker, SlotPickerStep};

/// Outcome message a panel shows to the user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub intent: NoticeIntent,
    pub message: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeIntent {
    Success,
    Error,
}

impl Notice {
    pub fn success(message: impl Into<String>) -> Self {
        Self {
            intent: NoticeIntent::Success,
            message: message.into(),
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            intent: NoticeIntent::Error,
            message: message.into(),
        }
    }

    pub fn is_error(&self) -> bool {
        self.intent == NoticeIntent::Error
    }
}
