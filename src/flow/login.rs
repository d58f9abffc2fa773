//! Log-in flow controller.

use secrecy::SecretString;
use tracing::debug;

use super::{call_gateway, FlowConfig, FlowState, GatewayRequest, StateObserver};
use crate::gateway::{FederatedOptions, ProviderGateway};
use crate::identity::AuthIdentity;
use crate::messages::{self, FlowKind};
use crate::validate::{validate_login, LoginForm};

/// One log-in flow instance: the form fields, the attempt state and the
/// gateway it dispatches to.
///
/// At most one gateway call is in flight per instance; a submit while busy is
/// a no-op, as is any submit after the flow has succeeded (until [`reset`]).
///
/// [`reset`]: LoginFlow::reset
pub struct LoginFlow<G> {
    gateway: G,
    config: FlowConfig,
    form: LoginForm,
    state: FlowState,
    observer: Option<StateObserver>,
}

impl<G: ProviderGateway> LoginFlow<G> {
    pub fn new(gateway: G) -> Self {
        Self::with_config(gateway, FlowConfig::default())
    }

    pub fn with_config(gateway: G, config: FlowConfig) -> Self {
        Self {
            gateway,
            config,
            form: LoginForm::default(),
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
    pub fn form(&self) -> &LoginForm {
        &self.form
    }

    /// Ignored while busy; inputs are disabled during a gateway call.
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

    /// Discards the current instance state, restarting the flow.
    pub fn reset(&mut self) {
        self.form = LoginForm::default();
        self.state = FlowState::default();
        self.notify();
    }

    /// Submits the entered credentials for password authentication.
    pub async fn submit_password(&mut self) -> &FlowState {
        if !self.begin_attempt() {
            return &self.state;
        }

        if let Err(error) = validate_login(&self.form) {
            self.state.error_message =
                Some(messages::validation_message(FlowKind::LogIn, error).to_string());
            self.notify();
            return &self.state;
        }

        self.state.busy = true;
        self.notify();
        debug!(email = %self.form.email, "dispatching password log-in");

        let outcome = call_gateway(
            &self.gateway,
            self.config.timeout(),
            GatewayRequest::PasswordLogIn {
                email: &self.form.email,
                password: &self.form.password,
            },
        )
        .await;

        self.state.busy = false;
        match outcome {
            Ok(payload) => {
                self.state.result = Some(AuthIdentity::from_payload(&payload, None));
            }
            Err(message) => self.state.error_message = Some(message.to_string()),
        }
        self.notify();
        &self.state
    }

    /// Continues with the configured federated provider. No validation
    /// applies; the consent flow collects the account itself.
    pub async fn submit_federated(&mut self) -> &FlowState {
        if !self.begin_attempt() {
            return &self.state;
        }

        self.state.busy = true;
        self.notify();
        debug!(provider = self.config.federated_provider().idp_id(), "dispatching federated log-in");

        let outcome = call_gateway(
            &self.gateway,
            self.config.timeout(),
            GatewayRequest::Federated {
                provider: self.config.federated_provider(),
                options: FederatedOptions::default(),
            },
        )
        .await;

        self.state.busy = false;
        match outcome {
            Ok(payload) => {
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

#[cfg(test)]
mod tests {
    use std::sync::{Arc, Mutex};
    use std::time::Duration;

    use secrecy::SecretString;

    use super::*;
    use crate::flow::testing::{google_payload, password_payload, StalledGateway, StubGateway};
    use crate::gateway::GatewayError;
    use crate::identity::ProviderTag;

    fn filled(mut flow: LoginFlow<StubGateway>) -> LoginFlow<StubGateway> {
        flow.set_email("a@b.com");
        flow.set_password(SecretString::from("secret1"));
        flow
    }

    fn recording_observer(seen: &Arc<Mutex<Vec<FlowState>>>) -> impl Fn(&FlowState) + Send + Sync {
        let sink = Arc::clone(seen);
        move |state: &FlowState| {
            sink.lock().expect("snapshot lock").push(state.clone());
        }
    }

    #[tokio::test]
    async fn password_login_success_normalizes_identity() {
        let mut flow = filled(LoginFlow::new(StubGateway::succeeding(password_payload())));
        let state = flow.submit_password().await;

        let identity = state.result.as_ref().expect("identity");
        assert_eq!(identity.uid, "u1");
        assert_eq!(identity.email, "a@b.com");
        assert_eq!(identity.display_name, "User");
        assert_eq!(identity.provider, ProviderTag::Password);
        assert_eq!(state.error_message, None);
        assert!(!state.busy);
    }

    #[tokio::test]
    async fn bad_credentials_map_to_the_exact_message() {
        let mut flow = filled(LoginFlow::new(StubGateway::failing(
            GatewayError::InvalidCredential,
        )));
        let state = flow.submit_password().await;

        assert_eq!(state.error_message.as_deref(), Some("Invalid email or password"));
        assert_eq!(state.result, None);
        assert!(!state.busy);
    }

    #[tokio::test]
    async fn missing_fields_short_circuit_before_the_gateway() {
        let gateway = StubGateway::succeeding(password_payload());
        let seen = Arc::new(Mutex::new(Vec::new()));
        let mut flow = LoginFlow::new(gateway).with_observer(recording_observer(&seen));
        flow.set_email("a@b.com");

        let state = flow.submit_password().await;
        assert_eq!(
            state.error_message.as_deref(),
            Some("Email and password are required")
        );
        assert!(!state.busy);

        // busy never became true and no call was dispatched
        assert!(seen.lock().expect("snapshots").iter().all(|s| !s.busy));
    }

    #[tokio::test]
    async fn no_gateway_call_when_validation_fails() {
        let mut flow = LoginFlow::new(StubGateway::succeeding(password_payload()));
        flow.submit_password().await;
        assert_eq!(flow.gateway.calls(), 0);
    }

    #[tokio::test]
    async fn busy_spans_the_gateway_call() {
        let seen = Arc::new(Mutex::new(Vec::new()));
        let mut flow = filled(
            LoginFlow::new(StubGateway::succeeding(password_payload()))
                .with_observer(recording_observer(&seen)),
        );
        flow.submit_password().await;

        let seen = seen.lock().expect("snapshots");
        // attempt cleared, busy entered, resolution with busy cleared
        assert_eq!(seen.len(), 3);
        assert!(!seen[0].busy);
        assert!(seen[1].busy && seen[1].result.is_none());
        assert!(!seen[2].busy && seen[2].result.is_some());
    }

    #[tokio::test]
    async fn submit_while_busy_is_ignored() {
        let mut flow = filled(LoginFlow::new(StubGateway::succeeding(password_payload())));
        flow.state.busy = true;

        flow.submit_password().await;
        flow.submit_federated().await;
        assert_eq!(flow.gateway.calls(), 0);
        assert!(flow.state.busy);
    }

    #[tokio::test]
    async fn success_is_terminal_until_reset() {
        let mut flow = filled(LoginFlow::new(StubGateway::new(vec![
            Ok(password_payload()),
            Ok(password_payload()),
        ])));
        flow.submit_password().await;
        assert_eq!(flow.gateway.calls(), 1);

        flow.submit_password().await;
        assert_eq!(flow.gateway.calls(), 1);

        flow.reset();
        assert_eq!(flow.state().result, None);
        flow.set_email("a@b.com");
        flow.set_password(SecretString::from("secret1"));
        flow.submit_password().await;
        assert_eq!(flow.gateway.calls(), 2);
    }

    #[tokio::test]
    async fn field_edits_are_ignored_while_busy() {
        let mut flow = filled(LoginFlow::new(StubGateway::succeeding(password_payload())));
        flow.state.busy = true;
        flow.set_email("other@b.com");
        assert_eq!(flow.form().email, "a@b.com");
    }

    #[tokio::test]
    async fn federated_login_does_not_force_account_reselection() {
        let mut flow = LoginFlow::new(StubGateway::succeeding(google_payload()));
        let state = flow.submit_federated().await;

        let identity = state.result.as_ref().expect("identity");
        assert_eq!(identity.provider, ProviderTag::Google);
        assert_eq!(identity.display_name, "Ada Lovelace");
        assert_eq!(identity.federated_uid.as_deref(), Some("google-123"));

        let (provider, options) = flow.gateway.federated_options().expect("options");
        assert_eq!(provider, crate::gateway::FederatedProvider::Google);
        assert!(!options.force_account_selection);
    }

    #[tokio::test]
    async fn cancelled_consent_surfaces_through_the_failure_path() {
        let mut flow = LoginFlow::new(StubGateway::failing(GatewayError::PopupClosed));
        let state = flow.submit_federated().await;

        assert_eq!(
            state.error_message.as_deref(),
            Some("Sign in was cancelled. Please try again.")
        );
        assert!(!state.busy);
        assert_eq!(state.result, None);
    }

    #[tokio::test(start_paused = true)]
    async fn timeout_maps_to_the_generic_fallback() {
        let config = FlowConfig::new().with_timeout(Duration::from_millis(50));
        let mut flow = LoginFlow::with_config(StalledGateway, config);
        flow.set_email("a@b.com");
        flow.set_password(SecretString::from("secret1"));

        let state = flow.submit_password().await;
        assert_eq!(
            state.error_message.as_deref(),
            Some("Login failed. Please try again.")
        );
        assert!(!state.busy);
    }

    #[tokio::test]
    async fn a_new_attempt_clears_the_previous_error() {
        let mut flow = filled(LoginFlow::new(StubGateway::new(vec![
            Err(GatewayError::InvalidCredential),
            Ok(password_payload()),
        ])));
        flow.submit_password().await;
        assert!(flow.state().error_message.is_some());

        let state = flow.submit_password().await;
        assert_eq!(state.error_message, None);
        assert!(state.result.is_some());
    }
}
