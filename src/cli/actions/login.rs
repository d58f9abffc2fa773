use anyhow::{anyhow, Result};

use crate::cli::{
    actions::{render, Action},
    globals::GlobalArgs,
};
use crate::flow::{FlowConfig, LoginFlow};
use crate::gateway::rest::RestGateway;

/// Handle the log-in action
pub async fn handle(action: Action, globals: &GlobalArgs) -> Result<()> {
    let Action::LogIn {
        email,
        password,
        google,
    } = action
    else {
        return Err(anyhow!("expected a log-in action"));
    };

    let gateway = RestGateway::new(globals.api_url.clone(), globals.api_key.clone())?;
    let config = FlowConfig::new().with_timeout(globals.timeout);

    let mut flow = LoginFlow::with_config(gateway, config);
    flow.set_email(email);
    flow.set_password(password);

    let state = if google {
        flow.submit_federated().await
    } else {
        flow.submit_password().await
    };

    render(state)
}
