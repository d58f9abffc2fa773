//! Flow controllers for the two entry points.
//!
//! Flow Overview: a submit clears the previous attempt, validates locally,
//! enters the busy state, drives a single gateway call, maps the outcome, and
//! leaves the busy state. Invalid input never reaches the gateway; every
//! gateway resolution, including transport failures and timeouts, clears the
//! busy flag through the same path.
//!
//! Callers observe [`FlowState`] snapshots, either by polling
//! `state()` or through an observer invoked after every transition.

use std::time::Duration;

use secrecy::SecretString;
use serde::Serialize;
use tracing::warn;

use crate::gateway::{FederatedOptions, FederatedProvider, ProviderGateway, ProviderPayload};
use crate::identity::AuthIdentity;
use crate::messages::{self, FlowAction};

pub mod login;
pub mod signup;

pub use login::LoginFlow;
pub use signup::SignupFlow;

/// Snapshot of a flow instance, re-published after every transition.
///
/// `error_message` and `result` are mutually exclusive for a given attempt,
/// and `result` is only ever set after `busy` has returned to false.
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct FlowState {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error_message: Option<String>,
    pub busy: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub result: Option<AuthIdentity>,
}

/// Callback invoked with a snapshot after every state transition.
pub type StateObserver = Box<dyn Fn(&FlowState) + Send + Sync>;

/// Tuning knobs shared by both flows.
#[derive(Clone, Copy, Debug)]
pub struct FlowConfig {
    timeout: Duration,
    federated_provider: FederatedProvider,
    reselect_account_on_signup: bool,
}

impl FlowConfig {
    /// Default config: 30s gateway timeout, Google as the federated provider,
    /// forced account reselection on the sign-up federated path.
    #[must_use]
    pub fn new() -> Self {
        Self {
            timeout: Duration::from_secs(30),
            federated_provider: FederatedProvider::Google,
            reselect_account_on_signup: true,
        }
    }

    #[must_use]
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    #[must_use]
    pub fn with_federated_provider(mut self, provider: FederatedProvider) -> Self {
        self.federated_provider = provider;
        self
    }

    #[must_use]
    pub fn with_reselect_account_on_signup(mut self, reselect: bool) -> Self {
        self.reselect_account_on_signup = reselect;
        self
    }

    #[must_use]
    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    #[must_use]
    pub fn federated_provider(&self) -> FederatedProvider {
        self.federated_provider
    }

    #[must_use]
    pub fn reselect_account_on_signup(&self) -> bool {
        self.reselect_account_on_signup
    }
}

impl Default for FlowConfig {
    fn default() -> Self {
        Self::new()
    }
}

/// One submit kind, dispatched to the matching gateway operation.
pub(crate) enum GatewayRequest<'a> {
    PasswordLogIn {
        email: &'a str,
        password: &'a SecretString,
    },
    PasswordSignUp {
        email: &'a str,
        password: &'a SecretString,
    },
    Federated {
        provider: FederatedProvider,
        options: FederatedOptions,
    },
}

impl GatewayRequest<'_> {
    fn action(&self) -> FlowAction {
        match self {
            Self::PasswordLogIn { .. } => FlowAction::PasswordLogIn,
            Self::PasswordSignUp { .. } => FlowAction::PasswordSignUp,
            Self::Federated { .. } => FlowAction::FederatedSignIn,
        }
    }
}

/// Bounds the single suspend point and maps the resolution.
///
/// Resolves exactly once: payload, classified failure message, or the
/// action's generic fallback when the call errors out or exceeds `timeout`.
pub(crate) async fn call_gateway<G: ProviderGateway>(
    gateway: &G,
    timeout: Duration,
    request: GatewayRequest<'_>,
) -> Result<ProviderPayload, &'static str> {
    let action = request.action();
    let call = async {
        match request {
            GatewayRequest::PasswordLogIn { email, password } => {
                gateway.authenticate_with_password(email, password).await
            }
            GatewayRequest::PasswordSignUp { email, password } => {
                gateway.register_with_password(email, password).await
            }
            GatewayRequest::Federated { provider, options } => {
                gateway.authenticate_with_federated(provider, options).await
            }
        }
    };

    match tokio::time::timeout(timeout, call).await {
        Ok(Ok(payload)) => Ok(payload),
        Ok(Err(error)) => {
            warn!(?action, %error, "gateway call failed");
            Err(messages::failure_message(action, &error))
        }
        Err(_) => {
            warn!(?action, timeout_ms = timeout.as_millis() as u64, "gateway call timed out");
            Err(messages::generic_fallback(action))
        }
    }
}
