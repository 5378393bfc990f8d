use std::fmt;

use edupanel_shared::models::Id;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormMode {
    Create,
    Edit(Id),
}

/// Lifecycle of one CRUD screen. Every flow ends back in `Idle`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PageState {
    #[default]
    Idle,
    Modal(FormMode),
    Submitting(FormMode),
    ConfirmingDelete(Id),
}

impl fmt::Display for PageState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PageState::Idle => f.write_str("idle"),
            PageState::Modal(FormMode::Create) => f.write_str("editing a new record"),
            PageState::Modal(FormMode::Edit(id)) => write!(f, "editing #{}", id),
            PageState::Submitting(_) => f.write_str("submitting"),
            PageState::ConfirmingDelete(id) => write!(f, "confirming deletion of #{}", id),
        }
    }
}

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
#[error("cannot {action} while {state}")]
pub struct InvalidTransition {
    pub state: PageState,
    pub action: &'static str,
}

impl PageState {
    fn reject(self, action: &'static str) -> InvalidTransition {
        InvalidTransition { state: self, action }
    }

    pub fn open(self, mode: FormMode) -> Result<Self, InvalidTransition> {
        match self {
            PageState::Idle => Ok(PageState::Modal(mode)),
            other => Err(other.reject("open a form")),
        }
    }

    /// Dismiss an open form without submitting.
    pub fn close(self) -> Result<Self, InvalidTransition> {
        match self {
            PageState::Modal(_) => Ok(PageState::Idle),
            other => Err(other.reject("close the form")),
        }
    }

    pub fn submit(self) -> Result<Self, InvalidTransition> {
        match self {
            PageState::Modal(mode) => Ok(PageState::Submitting(mode)),
            other => Err(other.reject("submit")),
        }
    }

    /// The request finished, successfully or not.
    pub fn finish(self) -> Result<Self, InvalidTransition> {
        match self {
            PageState::Submitting(_) => Ok(PageState::Idle),
            other => Err(other.reject("finish a submission")),
        }
    }

    pub fn request_delete(self, id: Id) -> Result<Self, InvalidTransition> {
        match self {
            PageState::Idle => Ok(PageState::ConfirmingDelete(id)),
            other => Err(other.reject("delete")),
        }
    }

    pub fn resolve_delete(self) -> Result<Self, InvalidTransition> {
        match self {
            PageState::ConfirmingDelete(_) => Ok(PageState::Idle),
            other => Err(other.reject("resolve a deletion")),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn create_flow_returns_to_idle() {
        let state = PageState::Idle.open(FormMode::Create).unwrap();
        assert_eq!(state, PageState::Modal(FormMode::Create));
        let state = state.submit().unwrap();
        assert_eq!(state, PageState::Submitting(FormMode::Create));
        assert_eq!(state.finish().unwrap(), PageState::Idle);
    }

    #[test]
    fn cancelled_form_returns_to_idle() {
        let state = PageState::Idle.open(FormMode::Edit(3)).unwrap();
        assert_eq!(state.close().unwrap(), PageState::Idle);
    }

    #[test]
    fn delete_flow() {
        let state = PageState::Idle.request_delete(9).unwrap();
        assert_eq!(state, PageState::ConfirmingDelete(9));
        assert_eq!(state.resolve_delete().unwrap(), PageState::Idle);
    }

    #[test]
    fn invalid_transitions_are_rejected() {
        let submitting = PageState::Submitting(FormMode::Create);
        assert!(submitting.open(FormMode::Create).is_err());
        assert!(submitting.request_delete(1).is_err());
        assert!(PageState::Idle.submit().is_err());
        assert!(PageState::Idle.finish().is_err());

        let err = PageState::ConfirmingDelete(4).open(FormMode::Create).unwrap_err();
        assert_eq!(err.to_string(), "cannot open a form while confirming deletion of #4");
    }
}
