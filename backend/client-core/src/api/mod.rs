use crate::config::AppConfig;
use crate::error::ClientError;

use common::BearerToken;
use models::{Credentials, DocumentList, TokenGrant};

use log::{debug, warn};
use reqwest::{Client, Response};
use serde_json::Value;
use url::Url;

/// HTTP client for the authentication and document-listing endpoints.
///
/// Cheap to clone; clones share the connection pool.
#[derive(Clone)]
pub struct ApiClient {
    auth_url: Url,
    documents_url: Url,
    client: Client,
}

impl ApiClient {
    pub fn new(config: &AppConfig) -> Result<Self, ClientError> {
        let auth_url = Url::parse(&config.endpoints.auth_url)?;
        let documents_url = Url::parse(&config.endpoints.documents_url)?;

        let mut builder = Client::builder();
        if let Some(timeout) = config.request_timeout() {
            builder = builder.timeout(timeout);
        }
        let client = builder.build()?;

        Ok(Self {
            auth_url,
            documents_url,
            client,
        })
    }

    /// Exchange credentials for a bearer token.
    ///
    /// # Errors
    /// - [`ClientError::Transport`] on network failure or non-2xx status
    /// - [`ClientError::Authentication`] when the body carries no `access_token`
    pub async fn request_token(&self, credentials: &Credentials) -> Result<BearerToken, ClientError> {
        debug!("Requesting token for {}", credentials.username());

        let response = self
            .client
            .post(self.auth_url.clone())
            .form(&[
                ("username", credentials.username()),
                ("password", credentials.password()),
            ])
            .send()
            .await?;

        let body = success_body(response).await?;

        // Any body that is not an object with a token is a missing-token failure.
        let value = serde_json::from_slice::<Value>(&body).unwrap_or(Value::Null);

        TokenGrant::from_value(value).into_token().ok_or_else(|| {
            warn!("Authentication response carried no access_token");
            ClientError::missing_token()
        })
    }

    /// Fetch the document list for the holder of `token`.
    ///
    /// # Errors
    /// - [`ClientError::Transport`] on network failure or non-2xx status
    /// - [`ClientError::Decode`] when the body does not match the listing schema
    pub async fn list_documents(&self, token: &BearerToken) -> Result<DocumentList, ClientError> {
        let response = self
            .client
            .get(self.documents_url.clone())
            .bearer_auth(token.as_str())
            .send()
            .await?;

        let body = success_body(response).await?;

        let list: DocumentList = serde_json::from_slice(&body)
            .map_err(|e| ClientError::decode(format!("Invalid document list: {e}")))?;

        debug!("Received {} documents", list.len());
        Ok(list)
    }
}

/// Read the body of a 2xx response, or turn any other status into a
/// [`ClientError::Transport`] carrying the server's message if it sent one.
async fn success_body(response: Response) -> Result<Vec<u8>, ClientError> {
    let status = response.status();
    let body = response.bytes().await?;

    if !status.is_success() {
        warn!("HTTP {} from remote service", status.as_u16());
        return Err(ClientError::from_response(status.as_u16(), &body));
    }

    Ok(body.to_vec())
}
