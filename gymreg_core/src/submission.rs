use crate::{
    api::{self, register, Client},
    form::{FormState, SubmissionPayload, ValidationError},
    notification::Notification,
    route::Route,
};

/// Shown after the account was created.
pub const REGISTERED: &str = "Registration successful! Please log in.";

/// Shown when the server said no but didn't say why.
pub const REJECTED_FALLBACK: &str = "Registration failed. Please try again.";

/// Shown when we couldn't talk to the server at all.
pub const NETWORK_FAILED: &str = "Unable to reach the server. Please try again later.";

/// How a single registration attempt ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// The form didn't pass validation, so nothing was sent.
    RejectedLocally(ValidationError),

    /// The account was created.
    Registered,

    /// The server refused, possibly with a reason.
    ServerRejected(Option<String>),

    /// The request never completed.
    NetworkFailed,
}

impl Outcome {
    /// Interpret the result of calling the register endpoint.
    pub fn from_response(result: api::Result<register::Resp>) -> Self {
        match result {
            Ok(register::Resp) => {
                tracing::info!("registered");
                Self::Registered
            }
            Err(api::Error::Rejected { status, detail }) => {
                tracing::warn!(%status, ?detail, "registration rejected");
                Self::ServerRejected(detail)
            }
            Err(api::Error::Transport(err)) => {
                tracing::error!(?err, "could not reach server");
                Self::NetworkFailed
            }
            Err(api::Error::UrlParse(err)) => {
                tracing::error!(?err, "server URL is invalid");
                Self::NetworkFailed
            }
        }
    }

    /// The one notification the user sees for this outcome.
    pub fn notification(&self) -> Notification {
        match self {
            Self::RejectedLocally(err) => Notification::error(err.to_string()),
            Self::Registered => Notification::success(REGISTERED),
            Self::ServerRejected(Some(detail)) => Notification::error(detail.clone()),
            Self::ServerRejected(None) => Notification::error(REJECTED_FALLBACK),
            Self::NetworkFailed => Notification::error(NETWORK_FAILED),
        }
    }

    /// Where to send the user, if anywhere. Every failure leaves them on the
    /// form so they can fix it.
    pub fn route(&self) -> Option<Route> {
        match self {
            Self::Registered => Some(Route::Login),
            _ => None,
        }
    }
}

/// Validate the form and, if it passes, send it to the server. Makes at most
/// one request and never retries.
///
/// This is the whole registration flow for callers that don't need to keep
/// their UI responsive in the meantime. An event loop that validates up front
/// (so it can refuse a second submit) can call [`send`] from its own task
/// instead.
pub async fn submit(http: &reqwest::Client, client: &Client, form: &FormState) -> Outcome {
    let payload = match form.validate() {
        Ok(payload) => payload,
        Err(err) => {
            tracing::debug!(%err, "form failed validation");
            return Outcome::RejectedLocally(err);
        }
    };

    send(http, client, &payload).await
}

/// Send an already-validated payload and interpret whatever comes back.
pub async fn send(
    http: &reqwest::Client,
    client: &Client,
    payload: &SubmissionPayload,
) -> Outcome {
    tracing::info!(server = %client.server, "registering");

    Outcome::from_response(client.register(http, payload).await)
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::notification::Level;
    use crate::test::{jane, mismatched_form, unused_address, MockServer};
    use axum::http::StatusCode;
    use proptest::prelude::*;
    use serde_json::json;
    use tokio::runtime::Runtime;

    #[test_log::test(tokio::test)]
    async fn success_notifies_once_and_goes_to_login() {
        let server = MockServer::start(StatusCode::OK, r#"{"id": 7}"#).await;

        let outcome = submit(
            &reqwest::Client::new(),
            &Client::new(server.url.clone()),
            &jane(),
        )
        .await;

        assert_eq!(outcome, Outcome::Registered);
        assert_eq!(outcome.notification(), Notification::success(REGISTERED));
        assert_eq!(outcome.route(), Some(Route::Login));
        assert_eq!(server.requests().len(), 1);
    }

    #[test_log::test(tokio::test)]
    async fn sends_exactly_the_payload() {
        let server = MockServer::start(StatusCode::OK, "{}").await;

        submit(
            &reqwest::Client::new(),
            &Client::new(server.url.clone()),
            &jane(),
        )
        .await;

        let requests = server.requests();
        assert_eq!(requests.len(), 1);
        assert_eq!(
            requests[0].body,
            json!({
                "name": "Jane Doe",
                "email": "jane@x.com",
                "password": "abc123",
                "role": "member",
                "phone": "5551234",
                "branch": "Pune Branch",
            })
        );
    }

    #[test_log::test(tokio::test)]
    async fn server_detail_is_shown_verbatim() {
        let server =
            MockServer::start(StatusCode::BAD_REQUEST, r#"{"detail": "Email already exists"}"#)
                .await;

        let outcome = submit(
            &reqwest::Client::new(),
            &Client::new(server.url.clone()),
            &jane(),
        )
        .await;

        let notification = outcome.notification();
        assert_eq!(notification.level, Level::Error);
        assert_eq!(notification.message, "Email already exists");
        assert_eq!(outcome.route(), None);
    }

    #[test_log::test(tokio::test)]
    async fn missing_detail_falls_back() {
        let server = MockServer::start(StatusCode::UNPROCESSABLE_ENTITY, r#"{"oops": true}"#).await;

        let outcome = submit(
            &reqwest::Client::new(),
            &Client::new(server.url.clone()),
            &jane(),
        )
        .await;

        assert_eq!(outcome, Outcome::ServerRejected(None));
        assert_eq!(outcome.notification(), Notification::error(REJECTED_FALLBACK));
        assert_eq!(outcome.route(), None);
    }

    #[test_log::test(tokio::test)]
    async fn transport_failure_is_generic() {
        let outcome = submit(
            &reqwest::Client::new(),
            &Client::new(format!("http://{}", unused_address().await)),
            &jane(),
        )
        .await;

        assert_eq!(outcome, Outcome::NetworkFailed);
        assert_eq!(outcome.notification(), Notification::error(NETWORK_FAILED));
        assert_eq!(outcome.route(), None);
    }

    #[test_log::test(tokio::test)]
    async fn mismatch_is_caught_before_sending() {
        let server = MockServer::start(StatusCode::OK, "{}").await;
        let mut form = jane();
        form.confirm_password = "abc12".to_string();

        let outcome = submit(
            &reqwest::Client::new(),
            &Client::new(server.url.clone()),
            &form,
        )
        .await;

        assert_eq!(
            outcome.notification(),
            Notification::error("Passwords do not match")
        );
        assert_eq!(outcome.route(), None);
        assert!(server.requests().is_empty());
    }

    #[test_log::test(tokio::test)]
    async fn send_skips_validation_and_reports_the_rejection() {
        let server =
            MockServer::start(StatusCode::CONFLICT, r#"{"detail": "Email already exists"}"#).await;
        let payload = jane().validate().unwrap();

        let outcome = send(
            &reqwest::Client::new(),
            &Client::new(server.url.clone()),
            &payload,
        )
        .await;

        assert_eq!(
            outcome,
            Outcome::ServerRejected(Some("Email already exists".to_string()))
        );
        assert_eq!(server.requests().len(), 1);
    }

    #[test]
    fn mismatched_passwords_never_reach_the_server() {
        let runtime = Runtime::new().unwrap();
        let server = runtime.block_on(MockServer::start(StatusCode::OK, "{}"));
        let http = reqwest::Client::new();
        let client = Client::new(server.url.clone());

        proptest!(ProptestConfig::with_cases(64), |(form in mismatched_form())| {
            let outcome = runtime.block_on(submit(&http, &client, &form));

            prop_assert_eq!(
                outcome,
                Outcome::RejectedLocally(ValidationError::PasswordMismatch)
            );
        });

        assert!(server.requests().is_empty());
    }
}
