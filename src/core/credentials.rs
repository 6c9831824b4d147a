use std::fmt;
use std::sync::Arc;

/// Access key pair handed to the request signer. Either half may be absent.
#[derive(Clone, Default, PartialEq, Eq)]
pub struct Credentials {
    access_key_id: Option<String>,
    secret_key: Option<String>,
}

impl Credentials {
    pub fn new(access_key_id: Option<String>, secret_key: Option<String>) -> Self {
        Self {
            access_key_id,
            secret_key,
        }
    }

    pub fn access_key_id(&self) -> Option<&str> {
        self.access_key_id.as_deref()
    }

    pub fn secret_key(&self) -> Option<&str> {
        self.secret_key.as_deref()
    }

    /// Both halves present. Nothing here enforces it.
    pub fn is_complete(&self) -> bool {
        self.access_key_id.is_some() && self.secret_key.is_some()
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("access_key_id", &self.access_key_id)
            .field("secret_key", &self.secret_key.as_ref().map(|_| "<redacted>"))
            .finish()
    }
}

/// Supplies credentials to a downstream signer.
pub trait CredentialsProvider: Send + Sync {
    /// Current credentials. Called per request, so implementations should not cache.
    fn credentials(&self) -> Credentials;

    fn refresh(&self);
}

impl<P: CredentialsProvider + ?Sized> CredentialsProvider for Arc<P> {
    fn credentials(&self) -> Credentials {
        (**self).credentials()
    }

    fn refresh(&self) {
        (**self).refresh()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_debug_redacts_secret() {
        let creds = Credentials::new(Some("AKIDEXAMPLE".into()), Some("wJalrXUtnFEMI".into()));
        let printed = format!("{creds:?}");

        assert!(printed.contains("AKIDEXAMPLE"));
        assert!(printed.contains("<redacted>"));
        assert!(!printed.contains("wJalrXUtnFEMI"));
    }

    #[test]
    fn test_partial_credentials() {
        let creds = Credentials::new(Some("AKIDEXAMPLE".into()), None);

        assert_eq!(creds.access_key_id(), Some("AKIDEXAMPLE"));
        assert_eq!(creds.secret_key(), None);
        assert!(!creds.is_complete());
        assert!(!format!("{creds:?}").contains("<redacted>"));
    }
}
