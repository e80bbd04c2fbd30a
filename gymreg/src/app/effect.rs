use super::Action;
use crate::config::Config;
use gymreg_core::{api::Client, send, SubmissionPayload};

/// Connections to external services that effects use. We keep these around to
/// have some level of connection sharing for the app as a whole.
pub struct EffectContext {
    /// an HTTP client with reqwest
    http: reqwest::Client,

    /// The account service
    client: Client,
}

impl EffectContext {
    /// Get a new `EffectContext` talking to the configured server
    pub fn new(config: &Config) -> Self {
        Self {
            http: reqwest::Client::new(),
            client: Client::new(config.server.clone()),
        }
    }
}

/// Things that can happen as a result of user input. Side effects!
#[derive(Debug, PartialEq, Eq)]
pub enum Effect {
    /// Create a new account on the server
    Register(SubmissionPayload),
}

impl Effect {
    /// Perform the side-effectful portions of this effect, returning the next
    /// `Action` the application needs to handle. Failures are part of the
    /// returned action rather than an error, since every one of them ends up
    /// in front of the user.
    pub async fn run(self, conn: &EffectContext) -> Action {
        match self {
            Self::Register(payload) => {
                Action::Registered(send(&conn.http, &conn.client, &payload).await)
            }
        }
    }
}
