use clap::{
    builder::{
        styling::{AnsiColor, Effects, Styles},
        ValueParser,
    },
    Arg, ArgAction, ColorChoice, Command,
};

pub fn validator_log_level() -> ValueParser {
    ValueParser::from(move |level: &str| -> std::result::Result<u8, String> {
        if let Ok(parsed) = level.parse::<u8>() {
            // Successfully parsed as a number
            if parsed <= 5 {
                return Ok(parsed);
            }
        }

        match level.to_lowercase().as_str() {
            "error" => Ok(0),
            "warn" => Ok(1),
            "info" => Ok(2),
            "debug" => Ok(3),
            "trace" => Ok(4),
            _ => Err("invalid log level".to_string()),
        }
    })
}

pub fn new() -> Command {
    let styles = Styles::styled()
        .header(AnsiColor::Yellow.on_default() | Effects::BOLD)
        .usage(AnsiColor::Green.on_default() | Effects::BOLD)
        .literal(AnsiColor::Blue.on_default() | Effects::BOLD)
        .placeholder(AnsiColor::Green.on_default());

    Command::new("soglia")
        .about("Client-side authentication entry flows")
        .version(env!("CARGO_PKG_VERSION"))
        .color(ColorChoice::Auto)
        .styles(styles)
        .subcommand_required(true)
        .arg(
            Arg::new("api-url")
                .short('u')
                .long("api-url")
                .help("Base URL of the identity provider API")
                .env("SOGLIA_API_URL")
                .required(true),
        )
        .arg(
            Arg::new("api-key")
                .short('k')
                .long("api-key")
                .help("Project API key sent with every provider request")
                .env("SOGLIA_API_KEY")
                .required(true),
        )
        .arg(
            Arg::new("timeout")
                .short('t')
                .long("timeout")
                .help("Gateway call timeout in seconds")
                .default_value("30")
                .env("SOGLIA_TIMEOUT")
                .value_parser(clap::value_parser!(u64)),
        )
        .arg(
            Arg::new("verbosity")
                .short('v')
                .long("verbose")
                .help("Verbosity level: ERROR, WARN, INFO, DEBUG, TRACE (default: ERROR)")
                .env("SOGLIA_LOG_LEVEL")
                .global(true)
                .action(ArgAction::Count)
                .value_parser(validator_log_level()),
        )
        .subcommand(
            Command::new("login")
                .about("Log in with existing credentials")
                .arg(
                    Arg::new("email")
                        .long("email")
                        .help("Email address")
                        .env("SOGLIA_EMAIL"),
                )
                .arg(
                    Arg::new("password")
                        .long("password")
                        .help("Password")
                        .env("SOGLIA_PASSWORD"),
                )
                .arg(
                    Arg::new("google")
                        .long("google")
                        .help("Continue with Google instead of password credentials")
                        .action(ArgAction::SetTrue),
                ),
        )
        .subcommand(
            Command::new("signup")
                .about("Create a new account")
                .arg(
                    Arg::new("full-name")
                        .long("full-name")
                        .help("Full name shown on the new account")
                        .env("SOGLIA_FULL_NAME"),
                )
                .arg(
                    Arg::new("email")
                        .long("email")
                        .help("Email address")
                        .env("SOGLIA_EMAIL"),
                )
                .arg(
                    Arg::new("password")
                        .long("password")
                        .help("Password (at least 6 characters)")
                        .env("SOGLIA_PASSWORD"),
                )
                .arg(
                    Arg::new("confirm-password")
                        .long("confirm-password")
                        .help("Password confirmation")
                        .env("SOGLIA_CONFIRM_PASSWORD"),
                )
                .arg(
                    Arg::new("google")
                        .long("google")
                        .help("Continue with Google instead of password credentials")
                        .action(ArgAction::SetTrue),
                ),
        )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new() {
        let command = new();

        assert_eq!(command.get_name(), "soglia");
        assert_eq!(
            command.get_about().unwrap().to_string(),
            "Client-side authentication entry flows"
        );
        assert_eq!(
            command.get_version().unwrap().to_string(),
            env!("CARGO_PKG_VERSION")
        );
    }

    #[test]
    fn test_login_args() {
        let command = new();
        let matches = command.get_matches_from(vec![
            "soglia",
            "--api-url",
            "https://identity.example.com",
            "--api-key",
            "k-123",
            "login",
            "--email",
            "a@b.com",
            "--password",
            "secret1",
        ]);

        assert_eq!(
            matches.get_one::<String>("api-url").map(String::as_str),
            Some("https://identity.example.com")
        );
        assert_eq!(
            matches.get_one::<String>("api-key").map(String::as_str),
            Some("k-123")
        );
        assert_eq!(matches.get_one::<u64>("timeout").copied(), Some(30));

        let (name, sub) = matches.subcommand().expect("subcommand");
        assert_eq!(name, "login");
        assert_eq!(
            sub.get_one::<String>("email").map(String::as_str),
            Some("a@b.com")
        );
        assert!(!sub.get_flag("google"));
    }

    #[test]
    fn test_signup_google_flag() {
        let command = new();
        let matches = command.get_matches_from(vec![
            "soglia",
            "--api-url",
            "https://identity.example.com",
            "--api-key",
            "k-123",
            "signup",
            "--google",
        ]);

        let (name, sub) = matches.subcommand().expect("subcommand");
        assert_eq!(name, "signup");
        assert!(sub.get_flag("google"));
        assert_eq!(sub.get_one::<String>("email"), None);
    }

    #[test]
    fn test_check_env() {
        temp_env::with_vars(
            [
                ("SOGLIA_API_URL", Some("https://identity.example.com")),
                ("SOGLIA_API_KEY", Some("k-env")),
                ("SOGLIA_TIMEOUT", Some("5")),
                ("SOGLIA_EMAIL", Some("env@b.com")),
                ("SOGLIA_PASSWORD", Some("secret1")),
                ("SOGLIA_LOG_LEVEL", Some("info")),
            ],
            || {
                let command = new();
                let matches = command.get_matches_from(vec!["soglia", "login"]);
                assert_eq!(
                    matches.get_one::<String>("api-url").map(String::as_str),
                    Some("https://identity.example.com")
                );
                assert_eq!(
                    matches.get_one::<String>("api-key").map(String::as_str),
                    Some("k-env")
                );
                assert_eq!(matches.get_one::<u64>("timeout").copied(), Some(5));
                assert_eq!(matches.get_one::<u8>("verbosity").copied(), Some(2));

                let (_, sub) = matches.subcommand().expect("subcommand");
                assert_eq!(
                    sub.get_one::<String>("email").map(String::as_str),
                    Some("env@b.com")
                );
            },
        );
    }

    #[test]
    fn test_check_log_level_env() {
        // loop cover all possible value_parse
        let levels = vec!["error", "warn", "info", "debug", "trace"];
        for (index, &level) in levels.iter().enumerate() {
            temp_env::with_vars(
                [
                    ("SOGLIA_LOG_LEVEL", Some(level)),
                    ("SOGLIA_API_URL", Some("https://identity.example.com")),
                    ("SOGLIA_API_KEY", Some("k-123")),
                ],
                || {
                    let command = new();
                    let matches = command.get_matches_from(vec!["soglia", "login"]);
                    assert_eq!(
                        matches.get_one::<u8>("verbosity").copied(),
                        Some(index as u8)
                    );
                },
            );
        }
    }

    #[test]
    fn test_check_log_level_verbosity() {
        // loop cover all possible value_parse
        let levels = vec!["error", "warn", "info", "debug", "trace"];
        for (index, _) in levels.iter().enumerate() {
            temp_env::with_vars([("SOGLIA_LOG_LEVEL", None::<String>)], || {
                let mut args = vec![
                    "soglia".to_string(),
                    "--api-url".to_string(),
                    "https://identity.example.com".to_string(),
                    "--api-key".to_string(),
                    "k-123".to_string(),
                ];

                // Add the appropriate number of "-v" flags based on the index
                if index > 0 {
                    let v = format!("-{}", "v".repeat(index));
                    args.push(v);
                }
                args.push("login".to_string());

                let command = new();

                let matches = command.get_matches_from(args);

                assert_eq!(
                    matches.get_one::<u8>("verbosity").copied(),
                    Some(index as u8)
                );
            });
        }
    }
}
