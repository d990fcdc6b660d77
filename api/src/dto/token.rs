//! Request and response payloads for the credential endpoints

use serde::{Deserialize, Serialize};
use sg_core::domain::IssuedCredential;

/// Query string of `/api/login`
#[derive(Debug, Clone, Default, Deserialize)]
pub struct LoginQuery {
    /// Already-authenticated subject
    pub login: Option<String>,
}

/// `content` of a successful login or refresh
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenContent {
    /// Signed bearer credential
    pub token: String,
    /// Seconds until the credential expires
    pub expires: i64,
    /// Seconds after expiry during which it may still be refreshed
    pub refresh: i64,
}

impl From<IssuedCredential> for TokenContent {
    fn from(issued: IssuedCredential) -> Self {
        Self {
            expires: issued.expires_in_seconds(),
            refresh: issued.refresh_grace_seconds(),
            token: issued.token,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, Utc};
    use sg_core::domain::Credential;

    #[test]
    fn test_token_content_from_issued() {
        let issued = IssuedCredential {
            token: "eyJ.payload.sig".to_string(),
            credential: Credential::new("alice", Utc::now(), Duration::seconds(5)),
            validity: Duration::seconds(5),
            refresh_grace: Duration::seconds(10),
        };

        let content = TokenContent::from(issued);
        assert_eq!(content.token, "eyJ.payload.sig");
        assert_eq!(content.expires, 5);
        assert_eq!(content.refresh, 10);
    }

    #[test]
    fn test_login_query_missing_login() {
        let query: LoginQuery = serde_json::from_str("{}").unwrap();
        assert!(query.login.is_none());
    }
}
