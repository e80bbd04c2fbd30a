//! Registration logic for gym members, shared by every client.

/// The registration form and what gets sent from it.
pub mod form;
pub use form::{FormState, SubmissionPayload, ValidationError};

/// User-facing messages about how things went.
pub mod notification;
pub use notification::{Level, Notification};

/// Which view the user is on.
pub mod route;
pub use route::Route;

/// Talk to the account service.
pub mod api;

/// One registration attempt, start to finish.
pub mod submission;
pub use submission::{send, submit, Outcome};
