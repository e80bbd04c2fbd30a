use super::{client::handle_response, error::Result};
use crate::form::SubmissionPayload;
use reqwest::Url;

/// The request to register a new account.
pub type Req = SubmissionPayload;

/// Confirmation that the account was created. The server sends the new
/// account back, but we don't need anything from it.
#[derive(Debug, PartialEq, Eq)]
pub struct Resp;

/// Where the register endpoint lives.
pub const PATH: &str = "/register";

/// Register with the server.
///
/// ## Errors
///
/// Errors are the same as `handle_response`.
pub async fn register(client: &reqwest::Client, server: &str, req: &Req) -> Result<Resp> {
    let url = Url::parse(server)?.join(PATH)?;

    handle_response(client.post(url).json(req))
        .await
        .map(|()| Resp)
}
