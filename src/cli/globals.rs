use std::time::Duration;

use url::Url;

/// Provider connection settings shared by every action.
#[derive(Debug, Clone)]
pub struct GlobalArgs {
    pub api_url: Url,
    pub api_key: String,
    pub timeout: Duration,
}

impl GlobalArgs {
    #[must_use]
    pub fn new(api_url: Url, api_key: String, timeout_seconds: u64) -> Self {
        Self {
            api_url,
            api_key,
            timeout: Duration::from_secs(timeout_seconds),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_global_args() {
        let url = Url::parse("https://identity.example.com").expect("url");
        let args = GlobalArgs::new(url, "k-123".to_string(), 10);
        assert_eq!(args.api_url.as_str(), "https://identity.example.com/");
        assert_eq!(args.api_key, "k-123");
        assert_eq!(args.timeout, Duration::from_secs(10));
    }
}
