//! User-facing message tables.
//!
//! Every string shown to the user on a failed attempt comes from here, keyed
//! by the action that failed. Provider errors outside the known vocabulary
//! always fall through to the action's generic fallback; the raw provider
//! code never leaks into the message.

use crate::gateway::GatewayError;
use crate::validate::ValidationError;

/// Which flow a validation failure belongs to.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum FlowKind {
    LogIn,
    SignUp,
}

/// Which gateway dispatch failed; the generic fallback differs per action.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum FlowAction {
    PasswordLogIn,
    PasswordSignUp,
    FederatedSignIn,
}

pub fn validation_message(kind: FlowKind, error: ValidationError) -> &'static str {
    match error {
        ValidationError::MissingFields => match kind {
            FlowKind::LogIn => "Email and password are required",
            FlowKind::SignUp => "All fields are required",
        },
        ValidationError::PasswordMismatch => "Passwords do not match",
        ValidationError::PasswordTooShort => "Password should be at least 6 characters long",
    }
}

/// Generic fallback for anything not in the failure table, including
/// transport failures and timeouts.
#[must_use]
pub fn generic_fallback(action: FlowAction) -> &'static str {
    match action {
        FlowAction::PasswordLogIn => "Login failed. Please try again.",
        FlowAction::PasswordSignUp => "Failed to create account. Please try again.",
        FlowAction::FederatedSignIn => "Failed to sign in with Google. Please try again.",
    }
}

/// Deterministic failure table.
///
/// Invalid-credential is only meaningful on log-in and email-already-in-use
/// only on sign-up; on any other action those codes take the fallback. The
/// consent-window rows apply to every action.
pub fn failure_message(action: FlowAction, error: &GatewayError) -> &'static str {
    match (action, error) {
        (_, GatewayError::PopupClosed) => "Sign in was cancelled. Please try again.",
        (_, GatewayError::CancelledPopupRequest) => {
            "Please wait for the current sign in to complete."
        }
        (FlowAction::PasswordLogIn, GatewayError::InvalidCredential) => "Invalid email or password",
        (FlowAction::PasswordSignUp, GatewayError::EmailAlreadyInUse) => {
            "This email is already registered."
        }
        _ => generic_fallback(action),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn login_invalid_credential_has_exact_message() {
        assert_eq!(
            failure_message(FlowAction::PasswordLogIn, &GatewayError::InvalidCredential),
            "Invalid email or password"
        );
    }

    #[test]
    fn signup_duplicate_email_has_exact_message() {
        assert_eq!(
            failure_message(FlowAction::PasswordSignUp, &GatewayError::EmailAlreadyInUse),
            "This email is already registered."
        );
    }

    #[test]
    fn consent_window_messages_apply_to_every_action() {
        for action in [
            FlowAction::PasswordLogIn,
            FlowAction::PasswordSignUp,
            FlowAction::FederatedSignIn,
        ] {
            assert_eq!(
                failure_message(action, &GatewayError::PopupClosed),
                "Sign in was cancelled. Please try again."
            );
            assert_eq!(
                failure_message(action, &GatewayError::CancelledPopupRequest),
                "Please wait for the current sign in to complete."
            );
        }
    }

    #[test]
    fn codes_outside_their_flow_take_the_fallback() {
        assert_eq!(
            failure_message(FlowAction::PasswordSignUp, &GatewayError::InvalidCredential),
            "Failed to create account. Please try again."
        );
        assert_eq!(
            failure_message(FlowAction::PasswordLogIn, &GatewayError::EmailAlreadyInUse),
            "Login failed. Please try again."
        );
    }

    #[test]
    fn unclassified_codes_never_reach_the_user() {
        let err = GatewayError::Provider("OPERATION_NOT_ALLOWED".to_string());
        let message = failure_message(FlowAction::FederatedSignIn, &err);
        assert_eq!(message, "Failed to sign in with Google. Please try again.");
        assert!(!message.contains("OPERATION_NOT_ALLOWED"));
    }

    #[test]
    fn validation_messages_match_flow_kind() {
        assert_eq!(
            validation_message(FlowKind::LogIn, ValidationError::MissingFields),
            "Email and password are required"
        );
        assert_eq!(
            validation_message(FlowKind::SignUp, ValidationError::MissingFields),
            "All fields are required"
        );
        assert_eq!(
            validation_message(FlowKind::SignUp, ValidationError::PasswordMismatch),
            "Passwords do not match"
        );
        assert_eq!(
            validation_message(FlowKind::SignUp, ValidationError::PasswordTooShort),
            "Password should be at least 6 characters long"
        );
    }
}
