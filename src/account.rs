// Account operations: login, signup and logout.

use crate::api::{json_headers, ApiClient};
use crate::error::CourierResult;
use crate::session::SessionStore;
use log::info;
use serde::{Deserialize, Serialize};

/// Login request payload.
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct Credentials {
    pub username: String,
    pub password: String,
}

/// Data shape used to register a user. Keys match the backend's
/// camelCase names.
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct SignupProfile {
    pub username: String,
    pub email: String,
    pub password: String,
    #[serde(rename = "firstName")]
    pub first_name: String,
    #[serde(rename = "lastName")]
    pub last_name: String,
}

#[derive(Deserialize, Debug)]
struct LoginResponse {
    token: String,
}

/// POST the credentials to `/auth/login` and persist the returned token.
pub fn login(api: &ApiClient, session: &mut SessionStore, credentials: &Credentials) -> CourierResult<()> {
    let body = serde_json::to_string(credentials)?;
    let res = api.post("/auth/login", body, json_headers())?;
    if !res.is_ok() {
        return Err(res.into_rejection());
    }
    let LoginResponse { token } = res.json()?;
    session.save(&token)?;
    info!("logged in as {}", credentials.username);
    Ok(())
}

/// POST the profile to `/auth/signup`. No token is issued.
pub fn signup(api: &ApiClient, profile: &SignupProfile) -> CourierResult<()> {
    let body = serde_json::to_string(profile)?;
    let res = api.post("/auth/signup", body, json_headers())?;
    if !res.is_ok() {
        return Err(res.into_rejection());
    }
    info!("signed up {}", profile.username);
    Ok(())
}

/// Local only: forget the stored token.
pub fn logout(session: &mut SessionStore) -> CourierResult<()> {
    session.clear()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::ApiResponse;
    use crate::error::CourierError;
    use crate::session::TOKEN_FILE_NAME;
    use crate::testing::ScriptedTransport;
    use reqwest::header::CONTENT_TYPE;
    use reqwest::Method;
    use tempfile::TempDir;

    fn alice() -> Credentials {
        Credentials {
            username: "alice".into(),
            password: "secret".into(),
        }
    }

    #[test]
    fn login_persists_issued_token() {
        let dir = TempDir::new().unwrap();
        let mut session = SessionStore::new(dir.path().join(TOKEN_FILE_NAME));
        let transport = ScriptedTransport::new(vec![ApiResponse::new(200, r#"{"token":"abc123"}"#)]);
        let log = transport.log();
        let api = ApiClient::with_transport("http://x/api/v1", transport);

        login(&api, &mut session, &alice()).unwrap();

        assert_eq!(std::fs::read_to_string(session.path()).unwrap(), "abc123");
        assert_eq!(session.load().unwrap().as_deref(), Some("abc123"));

        let sent = log.borrow();
        assert_eq!(sent[0].method, Method::POST);
        assert_eq!(sent[0].url, "http://x/api/v1/auth/login");
        assert_eq!(sent[0].headers[CONTENT_TYPE], "application/json");
        let body: serde_json::Value = serde_json::from_str(sent[0].body.as_deref().unwrap()).unwrap();
        assert_eq!(body, serde_json::json!({"username": "alice", "password": "secret"}));
    }

    #[test]
    fn rejected_login_keeps_no_token() {
        let dir = TempDir::new().unwrap();
        let mut session = SessionStore::new(dir.path().join(TOKEN_FILE_NAME));
        let transport = ScriptedTransport::new(vec![ApiResponse::new(
            401,
            r#"{"message":"Invalid credentials"}"#,
        )]);
        let api = ApiClient::with_transport("http://x", transport);

        let err = login(&api, &mut session, &alice()).unwrap_err();

        match err {
            CourierError::Rejected { status, message } => {
                assert_eq!(status, 401);
                assert_eq!(message, "Invalid credentials");
            }
            other => panic!("unexpected error: {other}"),
        }
        assert_eq!(session.load().unwrap(), None);
    }

    #[test]
    fn login_without_token_field_is_decode_error() {
        let dir = TempDir::new().unwrap();
        let mut session = SessionStore::new(dir.path().join(TOKEN_FILE_NAME));
        let transport = ScriptedTransport::new(vec![ApiResponse::new(200, r#"{"user":"alice"}"#)]);
        let api = ApiClient::with_transport("http://x", transport);

        let err = login(&api, &mut session, &alice()).unwrap_err();
        assert!(matches!(err, CourierError::Decode(_)));
    }

    #[test]
    fn signup_sends_camel_case_profile() {
        let transport = ScriptedTransport::new(vec![ApiResponse::new(200, "{}")]);
        let log = transport.log();
        let api = ApiClient::with_transport("http://x", transport);
        let profile = SignupProfile {
            username: "bob".into(),
            email: "bob@example.com".into(),
            password: "pw".into(),
            first_name: "Bob".into(),
            last_name: "Builder".into(),
        };

        signup(&api, &profile).unwrap();

        let sent = log.borrow();
        assert_eq!(sent[0].url, "http://x/auth/signup");
        let body: serde_json::Value = serde_json::from_str(sent[0].body.as_deref().unwrap()).unwrap();
        assert_eq!(
            body,
            serde_json::json!({
                "username": "bob",
                "email": "bob@example.com",
                "password": "pw",
                "firstName": "Bob",
                "lastName": "Builder"
            })
        );
    }

    #[test]
    fn signup_created_status_is_failure() {
        let transport = ScriptedTransport::new(vec![ApiResponse::new(201, r#"{"message":"Created"}"#)]);
        let api = ApiClient::with_transport("http://x", transport);
        let profile = SignupProfile {
            username: "bob".into(),
            email: "bob@example.com".into(),
            password: "pw".into(),
            first_name: "Bob".into(),
            last_name: "Builder".into(),
        };

        assert!(signup(&api, &profile).unwrap_err().is_rejection());
    }

    #[test]
    fn logout_after_login_leaves_no_token() {
        let dir = TempDir::new().unwrap();
        let mut session = SessionStore::new(dir.path().join(TOKEN_FILE_NAME));
        let transport = ScriptedTransport::new(vec![ApiResponse::new(200, r#"{"token":"t"}"#)]);
        let api = ApiClient::with_transport("http://x", transport);

        login(&api, &mut session, &alice()).unwrap();
        logout(&mut session).unwrap();

        assert_eq!(session.load().unwrap(), None);
        assert_eq!(SessionStore::new(session.path()).load().unwrap(), None);
    }

    #[test]
    fn logout_without_session_succeeds() {
        let dir = TempDir::new().unwrap();
        let mut session = SessionStore::new(dir.path().join(TOKEN_FILE_NAME));
        assert!(logout(&mut session).is_ok());
    }
}
