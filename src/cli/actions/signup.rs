use anyhow::{anyhow, Result};

use crate::cli::{
    actions::{render, Action},
    globals::GlobalArgs,
};
use crate::flow::{FlowConfig, SignupFlow};
use crate::gateway::rest::RestGateway;

/// Handle the sign-up action
pub async fn handle(action: Action, globals: &GlobalArgs) -> Result<()> {
    let Action::SignUp {
        full_name,
        email,
        password,
        confirm_password,
        google,
    } = action
    else {
        return Err(anyhow!("expected a sign-up action"));
    };

    let gateway = RestGateway::new(globals.api_url.clone(), globals.api_key.clone())?;
    let config = FlowConfig::new().with_timeout(globals.timeout);

    let mut flow = SignupFlow::with_config(gateway, config);
    flow.set_full_name(full_name);
    flow.set_email(email);
    flow.set_password(password);
    flow.set_confirm_password(confirm_password);

    let state = if google {
        flow.submit_federated().await
    } else {
        flow.submit_password().await
    };

    render(state)
}
