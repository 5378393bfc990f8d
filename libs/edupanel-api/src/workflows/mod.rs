pub mod grant;

pub use grant::{GrantContext, GrantError, GrantOutcome, GrantWorkflow};
