//! Edit session state machine
//!
//! ```text
//! Idle --begin_edit--> Editing
//! Editing --cancel--> Idle
//! {Idle, Editing} --submit--> Submitting
//! Submitting --success--> Idle
//! Submitting --failure--> previous state
//! ```

use crate::error::{SyncError, SyncResult};

#[derive(Debug, Clone, PartialEq)]
pub enum SessionState<T> {
    Idle,
    Editing(T),
    /// `resume` is the edit target to return to if the submission fails
    Submitting { resume: Option<T> },
}

impl<T> Default for SessionState<T> {
    fn default() -> Self {
        SessionState::Idle
    }
}

impl<T: Clone> SessionState<T> {
    pub fn editing(&self) -> Option<&T> {
        match self {
            SessionState::Editing(item) => Some(item),
            _ => None,
        }
    }

    pub fn is_submitting(&self) -> bool {
        matches!(self, SessionState::Submitting { .. })
    }

    /// Replaces any previous edit target.
    pub(crate) fn begin_edit(&mut self, item: T) -> SyncResult<()> {
        if self.is_submitting() {
            return Err(SyncError::Busy);
        }
        *self = SessionState::Editing(item);
        Ok(())
    }

    pub(crate) fn cancel(&mut self) -> SyncResult<()> {
        if self.is_submitting() {
            return Err(SyncError::Busy);
        }
        *self = SessionState::Idle;
        Ok(())
    }

    pub(crate) fn start_submit(&mut self) -> SyncResult<()> {
        let resume = match self {
            SessionState::Submitting { .. } => return Err(SyncError::Busy),
            SessionState::Idle => None,
            SessionState::Editing(item) => Some(item.clone()),
        };
        *self = SessionState::Submitting { resume };
        Ok(())
    }

    /// Leave `Submitting`, either clearing the session or restoring the
    /// state that preceded the submission.
    pub(crate) fn finish(&mut self, clear: bool) {
        if let SessionState::Submitting { resume } = self {
            *self = match (clear, resume.take()) {
                (false, Some(item)) => SessionState::Editing(item),
                _ => SessionState::Idle,
            };
        }
    }

    /// Edit target kept through an in-flight submission
    pub(crate) fn target(&self) -> Option<&T> {
        match self {
            SessionState::Editing(item) => Some(item),
            SessionState::Submitting { resume } => resume.as_ref(),
            SessionState::Idle => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_edit_then_cancel() {
        let mut session = SessionState::default();
        session.begin_edit("c1").unwrap();
        assert_eq!(session.editing(), Some(&"c1"));
        session.cancel().unwrap();
        assert_eq!(session, SessionState::Idle);
    }

    #[test]
    fn test_failed_submit_restores_edit_target() {
        let mut session = SessionState::Editing("c1");
        session.start_submit().unwrap();
        assert!(session.is_submitting());
        assert_eq!(session.editing(), None);
        assert_eq!(session.target(), Some(&"c1"));
        session.finish(false);
        assert_eq!(session, SessionState::Editing("c1"));
    }

    #[test]
    fn test_successful_submit_clears_session() {
        let mut session = SessionState::Editing("c1");
        session.start_submit().unwrap();
        session.finish(true);
        assert_eq!(session, SessionState::Idle);
    }

    #[test]
    fn test_submitting_rejects_other_transitions() {
        let mut session: SessionState<&str> = SessionState::Idle;
        session.start_submit().unwrap();
        assert_eq!(session.start_submit(), Err(SyncError::Busy));
        assert_eq!(session.begin_edit("c2"), Err(SyncError::Busy));
        assert_eq!(session.cancel(), Err(SyncError::Busy));
        session.finish(false);
        assert_eq!(session, SessionState::Idle);
    }
}
