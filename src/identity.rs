//! Normalized authenticated identity.
//!
//! Whatever the provider returns, the flows hand the caller a single
//! [`AuthIdentity`] shape. The success half of the result mapper lives here;
//! the failure half is the message table in [`crate::messages`].

use serde::{Deserialize, Serialize};

use crate::gateway::ProviderPayload;

/// Display name used when the provider does not supply one.
pub const DEFAULT_DISPLAY_NAME: &str = "User";

/// Which kind of provider authenticated the user.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProviderTag {
    /// Email/password credentials verified by the provider.
    Password,
    /// Federated sign-in through a Google account.
    Google,
}

impl ProviderTag {
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Password => "password",
            Self::Google => "google",
        }
    }
}

/// The normalized result of a successful authentication.
///
/// Immutable once produced within a flow instance; `uid` and `provider` are
/// always present.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct AuthIdentity {
    /// Provider-assigned unique identifier.
    pub uid: String,
    /// May be empty for providers that withhold the address.
    pub email: String,
    pub display_name: String,
    pub provider: ProviderTag,
    /// Profile photo, when the federated provider supplies one.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub photo_url: Option<String>,
    /// Secondary provider-assigned id (e.g. the Google account id).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub federated_uid: Option<String>,
}

impl AuthIdentity {
    /// Normalizes a provider success payload.
    ///
    /// For password sign-up the caller passes the locally entered full name
    /// and it takes precedence over whatever the payload carries. In every
    /// other case the payload's display name is used, falling back to
    /// [`DEFAULT_DISPLAY_NAME`].
    #[must_use]
    pub fn from_payload(payload: &ProviderPayload, local_full_name: Option<&str>) -> Self {
        let display_name = match local_full_name {
            Some(name) => name.to_string(),
            None => payload
                .display_name
                .clone()
                .filter(|name| !name.is_empty())
                .unwrap_or_else(|| DEFAULT_DISPLAY_NAME.to_string()),
        };

        Self {
            uid: payload.uid.clone(),
            email: payload.email.clone().unwrap_or_default(),
            display_name,
            provider: payload.provider,
            photo_url: payload.photo_url.clone(),
            federated_uid: payload.federated_uid.clone(),
        }
    }
}
