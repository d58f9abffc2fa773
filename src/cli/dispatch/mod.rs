use anyhow::{anyhow, Result};
use secrecy::SecretString;
use url::Url;

use crate::cli::{actions::Action, globals::GlobalArgs};

pub fn handler(matches: &clap::ArgMatches) -> Result<(Action, GlobalArgs)> {
    let api_url = matches
        .get_one::<String>("api-url")
        .ok_or_else(|| anyhow!("missing required argument: --api-url"))?;
    let api_key = matches
        .get_one::<String>("api-key")
        .ok_or_else(|| anyhow!("missing required argument: --api-key"))?;
    let timeout = matches.get_one::<u64>("timeout").copied().unwrap_or(30);

    let globals = GlobalArgs::new(Url::parse(api_url)?, api_key.to_string(), timeout);

    // Field args default to empty; completeness is the validator's call, so
    // the user sees the flow's message rather than a clap error.
    let action = match matches.subcommand() {
        Some(("login", sub)) => Action::LogIn {
            email: arg_string(sub, "email"),
            password: SecretString::from(arg_string(sub, "password")),
            google: sub.get_flag("google"),
        },
        Some(("signup", sub)) => Action::SignUp {
            full_name: arg_string(sub, "full-name"),
            email: arg_string(sub, "email"),
            password: SecretString::from(arg_string(sub, "password")),
            confirm_password: SecretString::from(arg_string(sub, "confirm-password")),
            google: sub.get_flag("google"),
        },
        _ => return Err(anyhow!("missing subcommand")),
    };

    Ok((action, globals))
}

fn arg_string(matches: &clap::ArgMatches, name: &str) -> String {
    matches
        .get_one::<String>(name)
        .map(String::to_string)
        .unwrap_or_default()
}
