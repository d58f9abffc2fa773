//! Sign-up flow controller.

use secrecy::SecretString;
use tracing::debug;

use super::{call_gateway, FlowConfig, FlowState, GatewayRequest, StateObserver};
use crate::gateway::{FederatedOptions, ProviderGateway};
use crate::identity::AuthIdentity;
use crate::messages::{self, FlowKind};
use crate::validate::{validate_signup, SignupForm};

/// One sign-up flow instance.
///
/// Password sign-up keeps the locally entered full name as the display name;
/// the federated path makes no sign-up/log-in distinction upstream and, by
/// default, forces the account chooser so an already signed-in browser
/// session cannot silently pick the wrong account.
pub struct SignupFlow<G> {
    gateway: G,
    config: FlowConfig,
    form: SignupForm,
    state: FlowState,
    observer: Option<StateObserver>,
}

impl<G: ProviderGateway> SignupFlow<G> {
    pub fn new(gateway: G) -> Self {
        Self::with_config(gateway, FlowConfig::default())
    }

    pub fn with_config(gateway: G, config: FlowConfig) -> Self {
        Self {
            gateway,
            config,
            form: SignupForm::default(),
            state: FlowState::default(),
            observer: None,
        }
    }

    /// Registers a callback invoked with a snapshot after every transition.
    #[must_use]
    pub fn with_observer(mut self, observer: impl Fn(&FlowState) + Send + Sync + 'static) -> Self {
        self.observer = Some(Box::new(observer));
        self
    }

    #[must_use]
    pub fn state(&self) -> &FlowState {
        &self.state
    }

    #[must_use]
    pub fn form(&self) -> &SignupForm {
        &self.form
    }

    /// Ignored while busy; inputs are disabled during a gateway call.
    pub fn set_full_name(&mut self, full_name: impl Into<String>) {
        if !self.state.busy {
            self.form.full_name = full_name.into();
        }
    }

    /// Ignored while busy.
    pub fn set_email(&mut self, email: impl Into<String>) {
        if !self.state.busy {
            self.form.email = email.into();
        }
    }

    /// Ignored while busy.
    pub fn set_password(&mut self, password: SecretString) {
        if !self.state.busy {
            self.form.password = password;
        }
    }

    /// Ignored while busy.
    pub fn set_confirm_password(&mut self, confirm_password: SecretString) {
        if !self.state.busy {
            self.form.confirm_password = confirm_password;
        }
    }

    /// Discards the current instance state, restarting the flow.
    pub fn reset(&mut self) {
        self.form = SignupForm::default();
        self.state = FlowState::default();
        self.notify();
    }

    /// Submits the form to create a password-backed account.
    pub async fn submit_password(&mut self) -> &FlowState {
        if !self.begin_attempt() {
            return &self.state;
        }

        if let Err(error) = validate_signup(&self.form) {
            self.state.error_message =
                Some(messages::validation_message(FlowKind::SignUp, error).to_string());
            self.notify();
            return &self.state;
        }

        self.state.busy = true;
        self.notify();
        debug!(email = %self.form.email, "dispatching password sign-up");

        let outcome = call_gateway(
            &self.gateway,
            self.config.timeout(),
            GatewayRequest::PasswordSignUp {
                email: &self.form.email,
                password: &self.form.password,
            },
        )
        .await;

        self.state.busy = false;
        match outcome {
            Ok(payload) => {
                // The account is fresh; the provider has no display name yet,
                // so the locally entered full name wins.
                self.state.result =
                    Some(AuthIdentity::from_payload(&payload, Some(&self.form.full_name)));
            }
            Err(message) => self.state.error_message = Some(message.to_string()),
        }
        self.notify();
        &self.state
    }

    /// Continues with the configured federated provider. No local validation
    /// applies; the consent flow collects the account itself.
    pub async fn submit_federated(&mut self) -> &FlowState {
        if !self.begin_attempt() {
            return &self.state;
        }

        self.state.busy = true;
        self.notify();
        debug!(provider = self.config.federated_provider().idp_id(), "dispatching federated sign-up");

        let options = FederatedOptions {
            force_account_selection: self.config.reselect_account_on_signup(),
        };
        let outcome = call_gateway(
            &self.gateway,
            self.config.timeout(),
            GatewayRequest::Federated {
                provider: self.config.federated_provider(),
                options,
            },
        )
        .await;

        self.state.busy = false;
        match outcome {
            Ok(payload) => {
                debug!(uid = %payload.uid, "federated sign-up account");
                self.state.result = Some(AuthIdentity::from_payload(&payload, None));
            }
            Err(message) => self.state.error_message = Some(message.to_string()),
        }
        self.notify();
        &self.state
    }

    /// Clears the previous attempt. Returns false when the submit must be
    /// ignored: a call is in flight, or the flow already succeeded.
    fn begin_attempt(&mut self) -> bool {
        if self.state.busy || self.state.result.is_some() {
            return false;
        }
        self.state.error_message = None;
        self.state.result = None;
        self.notify();
        true
    }

    fn notify(&self) {
        if let Some(observer) = &self.observer {
            observer(&self.state);
        }
    }
}
