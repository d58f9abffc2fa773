//! Capability boundary to the external identity provider.
//!
//! The flows never talk to the provider directly; they go through
//! [`ProviderGateway`], which exposes exactly three operations: password
//! log-in, password sign-up, and federated sign-in. Credential verification,
//! token issuance and account storage are the provider's concern behind this
//! trait. [`rest::RestGateway`] is the bundled HTTP implementation; tests
//! script their own.

use async_trait::async_trait;
use secrecy::SecretString;
use thiserror::Error;

use crate::identity::ProviderTag;

pub mod rest;

/// Federated providers supported by the entry flows.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum FederatedProvider {
    Google,
}

impl FederatedProvider {
    /// Provider identifier on the wire.
    #[must_use]
    pub fn idp_id(&self) -> &'static str {
        match self {
            Self::Google => "google.com",
        }
    }

    #[must_use]
    pub fn tag(&self) -> ProviderTag {
        match self {
            Self::Google => ProviderTag::Google,
        }
    }
}

/// Options for the interactive federated consent flow.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct FederatedOptions {
    /// Force the account chooser even when a single account is signed in.
    pub force_account_selection: bool,
}

/// Success payload returned by the provider, before normalization.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ProviderPayload {
    pub uid: String,
    pub email: Option<String>,
    pub display_name: Option<String>,
    pub email_verified: bool,
    pub provider: ProviderTag,
    pub photo_url: Option<String>,
    /// Provider-assigned id within the federated account system.
    pub federated_uid: Option<String>,
}

/// Provider-level failures, classified.
///
/// Anything the provider reports that is not part of the known vocabulary
/// lands in `Provider` with the raw code; the message table in
/// [`crate::messages`] guarantees that raw code never reaches the user.
#[derive(Debug, Error)]
pub enum GatewayError {
    #[error("invalid credential")]
    InvalidCredential,
    #[error("email already in use")]
    EmailAlreadyInUse,
    #[error("sign-in window closed by the user")]
    PopupClosed,
    #[error("another sign-in attempt is already in progress")]
    CancelledPopupRequest,
    #[error("unclassified provider code: {0}")]
    Provider(String),
    #[error("transport error: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("invalid endpoint: {0}")]
    Endpoint(#[from] url::ParseError),
}

/// The narrow interface the flows drive.
///
/// Each call is a single suspend point that resolves exactly once, with
/// either a payload or an error. Federated authentication makes no
/// sign-up/log-in distinction upstream, so there is one federated operation
/// for both entry points.
#[async_trait]
pub trait ProviderGateway: Send + Sync {
    /// Verify existing password credentials.
    async fn authenticate_with_password(
        &self,
        email: &str,
        password: &SecretString,
    ) -> Result<ProviderPayload, GatewayError>;

    /// Create a new password-backed account. Fails with
    /// [`GatewayError::EmailAlreadyInUse`] when the email is registered.
    async fn register_with_password(
        &self,
        email: &str,
        password: &SecretString,
    ) -> Result<ProviderPayload, GatewayError>;

    /// Open the interactive consent flow for a federated provider.
    ///
    /// A user-dismissed consent surfaces as [`GatewayError::PopupClosed`]
    /// through the normal failure path, not as a separate channel.
    async fn authenticate_with_federated(
        &self,
        provider: FederatedProvider,
        options: FederatedOptions,
    ) -> Result<ProviderPayload, GatewayError>;
}
