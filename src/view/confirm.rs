//! Confirmation step in front of every destructive action. Declining
//! performs no network call and leaves page state untouched.

pub const STUDENT_DELETE_PROMPT: &str = "Are you sure you want to delete this student?";
pub const TEACHER_DELETE_PROMPT: &str = "Are you sure you want to delete this teacher?";
// The class prompt must spell out the cascade-set-null side effect.
pub const CLASS_DELETE_PROMPT: &str =
    "Are you sure you want to delete this class? Students will be unassigned.";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingDelete {
    pub id: i64,
    pub prompt: &'static str,
}

/// At most one deletion awaits confirmation at a time.
#[derive(Debug, Default)]
pub struct ConfirmGate {
    pending: Option<PendingDelete>,
}

impl ConfirmGate {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn request(&mut self, id: i64, prompt: &'static str) {
        self.pending = Some(PendingDelete { id, prompt });
    }

    pub fn pending(&self) -> Option<&PendingDelete> {
        self.pending.as_ref()
    }

    /// User confirmed: yields the id exactly once.
    pub fn confirm(&mut self) -> Option<i64> {
        self.pending.take().map(|p| p.id)
    }

    /// User declined: clears the pending action, nothing else happens.
    pub fn decline(&mut self) {
        self.pending = None;
    }
}
