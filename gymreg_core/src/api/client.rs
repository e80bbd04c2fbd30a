use super::error::{self, Error, ErrorResp};
use super::register;

/// Client for the account service
#[derive(Debug, Clone)]
pub struct Client {
    /// The server to connect to. Should only be the protocol and domain, e.g.
    /// `https://gym.your-domain.com`.
    pub server: String,
}

impl Client {
    /// Construct a new client
    pub fn new(server: String) -> Self {
        Self { server }
    }

    /// Create a new account on the server.
    ///
    /// ## Errors
    ///
    /// Errors are the same as `handle_response`.
    pub async fn register(
        &self,
        client: &reqwest::Client,
        req: &register::Req,
    ) -> error::Result<register::Resp> {
        register::register(client, &self.server, req).await
    }
}

/// Send a request and interpret the response status. The body of a successful
/// response is ignored.
///
/// ## Errors
///
/// - `Error::Transport` if the request could not be completed
/// - `Error::Rejected` if the server returned anything but a success (2xx),
///   carrying the server's `detail` message if the body had one
pub(crate) async fn handle_response(req: reqwest::RequestBuilder) -> error::Result<()> {
    let resp = req.send().await?;

    let status = resp.status();

    if status.is_success() {
        return Ok(());
    }

    let detail = match resp.bytes().await {
        Ok(body) => ErrorResp::message_from_body(&body),
        Err(err) => {
            tracing::warn!(?err, %status, "could not read error body");
            None
        }
    };

    Err(Error::Rejected { status, detail })
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::form::FormState;
    use crate::test::{jane, unused_address, MockServer};
    use axum::http::{Method, StatusCode};
    use serde_json::json;

    #[test_log::test(tokio::test)]
    async fn posts_json_payload_to_register_path() {
        let server = MockServer::start(StatusCode::CREATED, r#"{"id": 1}"#).await;
        let client = Client::new(server.url.clone());

        let resp = client
            .register(&reqwest::Client::new(), &jane().validate().unwrap())
            .await
            .unwrap();

        assert_eq!(resp, register::Resp);

        let requests = server.requests();
        assert_eq!(requests.len(), 1);
        assert_eq!(requests[0].method, Method::POST);
        assert_eq!(
            requests[0].content_type.as_deref(),
            Some("application/json")
        );
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
    async fn ignores_success_body() {
        let server = MockServer::start(StatusCode::OK, "not even json").await;
        let client = Client::new(server.url.clone());

        let resp = client
            .register(&reqwest::Client::new(), &jane().validate().unwrap())
            .await;

        assert!(resp.is_ok(), "{resp:?}");
    }

    #[test_log::test(tokio::test)]
    async fn rejection_carries_detail() {
        let server =
            MockServer::start(StatusCode::BAD_REQUEST, r#"{"detail": "Email already exists"}"#)
                .await;
        let client = Client::new(server.url.clone());

        let err = client
            .register(&reqwest::Client::new(), &jane().validate().unwrap())
            .await
            .unwrap_err();

        match err {
            Error::Rejected { status, detail } => {
                assert_eq!(status, reqwest::StatusCode::BAD_REQUEST);
                assert_eq!(detail.as_deref(), Some("Email already exists"));
            }
            other => panic!("expected a rejection, got {other:?}"),
        }
    }

    #[test_log::test(tokio::test)]
    async fn rejection_without_detail() {
        let server = MockServer::start(StatusCode::INTERNAL_SERVER_ERROR, "{}").await;
        let client = Client::new(server.url.clone());

        let err = client
            .register(&reqwest::Client::new(), &jane().validate().unwrap())
            .await
            .unwrap_err();

        assert!(
            matches!(err, Error::Rejected { detail: None, .. }),
            "{err:?}"
        );
    }

    #[test_log::test(tokio::test)]
    async fn unreachable_server_is_a_transport_error() {
        let client = Client::new(format!("http://{}", unused_address().await));

        let err = client
            .register(
                &reqwest::Client::new(),
                &FormState::default().validate().unwrap(),
            )
            .await
            .unwrap_err();

        assert!(matches!(err, Error::Transport(_)), "{err:?}");
    }

    #[test_log::test(tokio::test)]
    async fn bad_server_url() {
        let client = Client::new("not a url".to_string());

        let err = client
            .register(
                &reqwest::Client::new(),
                &FormState::default().validate().unwrap(),
            )
            .await
            .unwrap_err();

        assert!(matches!(err, Error::UrlParse(_)), "{err:?}");
    }
}
