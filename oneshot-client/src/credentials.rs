//! AWS credentials supplied through the environment

use aws_sdk_ecs::config::Credentials;
use std::fmt;

/// Static credentials handed to the job by its environment
///
/// Expected environment variables:
/// - AWS_ACCESS_KEY_ID
/// - AWS_SECRET_ACCESS_KEY
/// - AWS_SESSION_TOKEN (optional)
/// - AWS_REGION
#[derive(Clone, Default)]
pub struct AwsCredentials {
    pub access_key_id: String,
    pub secret_access_key: String,
    pub session_token: Option<String>,
    pub region: String,
}

impl AwsCredentials {
    /// Reads credentials from the process environment; missing values are empty
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Reads credentials through an arbitrary variable lookup
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let read = |key: &str| lookup(key).unwrap_or_default();

        Self {
            access_key_id: read("AWS_ACCESS_KEY_ID"),
            secret_access_key: read("AWS_SECRET_ACCESS_KEY"),
            session_token: lookup("AWS_SESSION_TOKEN").filter(|t| !t.is_empty()),
            region: read("AWS_REGION"),
        }
    }

    /// Access key id safe to print in logs
    pub fn masked_access_key_id(&self) -> String {
        let visible: String = self.access_key_id.chars().take(4).collect();
        format!("{}*******", visible)
    }

    /// Static SDK credentials, or `None` to fall back to the default provider chain
    pub(crate) fn to_sdk_credentials(&self) -> Option<Credentials> {
        if self.access_key_id.is_empty() {
            return None;
        }

        Some(Credentials::new(
            self.access_key_id.clone(),
            self.secret_access_key.clone(),
            self.session_token.clone(),
            None,
            "environment",
        ))
    }
}

impl fmt::Debug for AwsCredentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AwsCredentials")
            .field("access_key_id", &self.masked_access_key_id())
            .field("secret_access_key", &"*******")
            .field("session_token", &self.session_token.as_ref().map(|_| "*******"))
            .field("region", &self.region)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| vars.get(key).cloned()
    }

    #[test]
    fn test_from_lookup_reads_all_fields() {
        let creds = AwsCredentials::from_lookup(lookup(&[
            ("AWS_ACCESS_KEY_ID", "AKIAEXAMPLE"),
            ("AWS_SECRET_ACCESS_KEY", "secret"),
            ("AWS_SESSION_TOKEN", "token"),
            ("AWS_REGION", "eu-west-1"),
        ]));

        assert_eq!(creds.access_key_id, "AKIAEXAMPLE");
        assert_eq!(creds.secret_access_key, "secret");
        assert_eq!(creds.session_token.as_deref(), Some("token"));
        assert_eq!(creds.region, "eu-west-1");
        assert!(creds.to_sdk_credentials().is_some());
    }

    #[test]
    fn test_missing_values_are_empty() {
        let creds = AwsCredentials::from_lookup(lookup(&[("AWS_SESSION_TOKEN", "")]));

        assert!(creds.access_key_id.is_empty());
        assert!(creds.session_token.is_none());
        assert!(creds.to_sdk_credentials().is_none());
    }

    #[test]
    fn test_debug_never_prints_secrets() {
        let creds = AwsCredentials::from_lookup(lookup(&[
            ("AWS_ACCESS_KEY_ID", "AKIAEXAMPLE"),
            ("AWS_SECRET_ACCESS_KEY", "super-secret"),
        ]));

        let printed = format!("{:?}", creds);
        assert!(printed.contains("AKIA*******"));
        assert!(!printed.contains("super-secret"));
        assert!(!printed.contains("EXAMPLE"));
    }
}
