/// Things that can go wrong in the API
pub mod error;
pub use error::{Error, Result};

/// Client for the account service
pub mod client;
pub use client::Client;

/// Create a new account
pub mod register;
pub use register::register;
