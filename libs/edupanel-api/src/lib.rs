pub mod client;
pub mod error;
pub mod messages;
pub mod resource;
pub mod services;
pub mod session;
pub mod workflows;

pub use client::ApiClient;
pub use error::{ApiError, Result};
pub use resource::{Resource, ResourceService};
pub use services::Services;
pub use session::{Session, SessionStore};
