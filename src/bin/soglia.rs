use anyhow::Result;
use soglia::cli::{actions, actions::Action, start};

// Main function
#[tokio::main]
async fn main() -> Result<()> {
    // Start the program
    let (action, globals) = start()?;

    // Handle the action
    match action {
        Action::LogIn { .. } => actions::login::handle(action, &globals).await?,
        Action::SignUp { .. } => actions::signup::handle(action, &globals).await?,
    }

    Ok(())
}
