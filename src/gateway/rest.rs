//! REST adapter for an identity-toolkit-style provider API.
//!
//! Three endpoints, one per gateway operation. The provider reports failures
//! as an HTTP error status with a JSON body carrying a string code
//! (`EMAIL_EXISTS`, `INVALID_LOGIN_CREDENTIALS`, ...); [`classify`] folds
//! those into the [`GatewayError`] vocabulary and everything unknown is kept
//! as an unclassified code for the message table to absorb.

use reqwest::Client;
use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize};
use tracing::debug;
use url::Url;

use super::{FederatedOptions, FederatedProvider, GatewayError, ProviderGateway, ProviderPayload};
use crate::identity::ProviderTag;

const SIGN_IN_PATH: &str = "v1/accounts:signInWithPassword";
const SIGN_UP_PATH: &str = "v1/accounts:signUp";
const SIGN_IN_WITH_IDP_PATH: &str = "v1/accounts:signInWithIdp";

/// HTTP implementation of [`ProviderGateway`].
#[derive(Clone, Debug)]
pub struct RestGateway {
    client: Client,
    base_url: Url,
    api_key: String,
}

impl RestGateway {
    /// Builds a gateway against `base_url`, authenticating each request with
    /// the project `api_key`.
    pub fn new(base_url: Url, api_key: impl Into<String>) -> Result<Self, GatewayError> {
        let client = Client::builder().user_agent(crate::APP_USER_AGENT).build()?;

        Ok(Self {
            client,
            base_url,
            api_key: api_key.into(),
        })
    }

    fn endpoint(&self, path: &str) -> Result<Url, GatewayError> {
        let mut url = self.base_url.join(path)?;
        url.query_pairs_mut().append_pair("key", &self.api_key);
        Ok(url)
    }

    async fn post_account<B: Serialize + Sync>(
        &self,
        path: &str,
        body: &B,
        provider: ProviderTag,
    ) -> Result<ProviderPayload, GatewayError> {
        let url = self.endpoint(path)?;
        let response = self.client.post(url).json(body).send().await?;

        let status = response.status();
        if status.is_success() {
            let account: AccountResponse = response.json().await?;
            return Ok(account.into_payload(provider));
        }

        match response.json::<ErrorResponse>().await {
            Ok(error) => {
                debug!(code = %error.error.message, %status, "provider rejected the request");
                Err(classify(&error.error.message))
            }
            Err(_) => Err(GatewayError::Provider(format!("http {status}"))),
        }
    }
}

#[async_trait::async_trait]
impl ProviderGateway for RestGateway {
    async fn authenticate_with_password(
        &self,
        email: &str,
        password: &SecretString,
    ) -> Result<ProviderPayload, GatewayError> {
        let body = PasswordRequest {
            email,
            password: password.expose_secret(),
            return_secure_token: true,
        };
        self.post_account(SIGN_IN_PATH, &body, ProviderTag::Password)
            .await
    }

    async fn register_with_password(
        &self,
        email: &str,
        password: &SecretString,
    ) -> Result<ProviderPayload, GatewayError> {
        let body = PasswordRequest {
            email,
            password: password.expose_secret(),
            return_secure_token: true,
        };
        self.post_account(SIGN_UP_PATH, &body, ProviderTag::Password)
            .await
    }

    async fn authenticate_with_federated(
        &self,
        provider: FederatedProvider,
        options: FederatedOptions,
    ) -> Result<ProviderPayload, GatewayError> {
        let body = FederatedRequest {
            provider_id: provider.idp_id(),
            prompt: options.force_account_selection.then_some("select_account"),
            return_secure_token: true,
        };
        self.post_account(SIGN_IN_WITH_IDP_PATH, &body, provider.tag())
            .await
    }
}

/// Folds a provider string code into the known error vocabulary.
fn classify(code: &str) -> GatewayError {
    match code {
        "INVALID_LOGIN_CREDENTIALS" | "INVALID_PASSWORD" | "EMAIL_NOT_FOUND"
        | "INVALID_CREDENTIAL" => GatewayError::InvalidCredential,
        "EMAIL_EXISTS" => GatewayError::EmailAlreadyInUse,
        "USER_CANCELLED" | "POPUP_CLOSED_BY_USER" => GatewayError::PopupClosed,
        "CANCELLED_POPUP_REQUEST" => GatewayError::CancelledPopupRequest,
        other => GatewayError::Provider(other.to_string()),
    }
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct PasswordRequest<'a> {
    email: &'a str,
    password: &'a str,
    return_secure_token: bool,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct FederatedRequest<'a> {
    provider_id: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    prompt: Option<&'a str>,
    return_secure_token: bool,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct AccountResponse {
    local_id: String,
    #[serde(default)]
    email: Option<String>,
    #[serde(default)]
    display_name: Option<String>,
    #[serde(default)]
    email_verified: bool,
    #[serde(default)]
    photo_url: Option<String>,
    #[serde(default)]
    federated_id: Option<String>,
}

impl AccountResponse {
    fn into_payload(self, provider: ProviderTag) -> ProviderPayload {
        ProviderPayload {
            uid: self.local_id,
            email: self.email,
            display_name: self.display_name,
            email_verified: self.email_verified,
            provider,
            photo_url: self.photo_url,
            federated_uid: self.federated_id,
        }
    }
}

#[derive(Deserialize)]
struct ErrorResponse {
    error: ErrorBody,
}

#[derive(Deserialize)]
struct ErrorBody {
    message: String,
}
