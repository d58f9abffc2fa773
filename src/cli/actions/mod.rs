pub mod login;
pub mod signup;

use anyhow::{anyhow, Result};
use secrecy::SecretString;

use crate::flow::FlowState;

/// Entry-flow actions parsed from the command line.
#[derive(Debug)]
pub enum Action {
    LogIn {
        email: String,
        password: SecretString,
        google: bool,
    },
    SignUp {
        full_name: String,
        email: String,
        password: SecretString,
        confirm_password: SecretString,
        google: bool,
    },
}

/// Prints the identity as JSON on success, or surfaces the flow's user
/// message as the process error.
pub(crate) fn render(state: &FlowState) -> Result<()> {
    if let Some(identity) = &state.result {
        println!("{}", serde_json::to_string_pretty(identity)?);
        return Ok(());
    }

    match &state.error_message {
        Some(message) => Err(anyhow!("{message}")),
        None => Err(anyhow!("flow finished without a result")),
    }
}
