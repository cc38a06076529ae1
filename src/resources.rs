// Authenticated lookups: users and parcels. Every call attaches the stored
// bearer token (empty when none is stored) and expects a 200 answer.

use crate::api::{bearer_headers, ApiClient};
use crate::error::{CourierError, CourierResult};
use crate::session::SessionStore;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// User as returned by `/users/me`, `/users/{id}` and
/// `/users/username/{username}`.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct UserProfile {
    pub id: Value,
    pub username: String,
    pub email: String,
    pub role: String,
    pub created_at: String,
    pub updated_at: String,
}

/// User as returned by the `/users` listing. The listing uses a different
/// schema (`_id`, `isAdmin`) than the single-user endpoints.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct UserSummary {
    #[serde(rename = "_id")]
    pub id: Value,
    pub username: String,
    pub email: String,
    #[serde(rename = "isAdmin")]
    pub is_admin: bool,
}

/// Parcels are printed as received.
pub type Parcel = Value;

fn fetch<T: DeserializeOwned>(api: &ApiClient, session: &mut SessionStore, path: &str) -> CourierResult<T> {
    let token = session.load()?;
    let res = api.get(path, bearer_headers(token.as_deref())?)?;
    if !res.is_ok() {
        return Err(res.into_rejection());
    }
    res.json()
}

/// Percent-encode a user-supplied value so it stays one path segment.
/// Empty and dot segments would change the route and are refused.
fn path_segment(value: &str) -> CourierResult<String> {
    if matches!(value, "" | "." | "..") {
        return Err(CourierError::InvalidPathSegment(value.to_string()));
    }
    Ok(urlencoding::encode(value).into_owned())
}

pub fn get_self(api: &ApiClient, session: &mut SessionStore) -> CourierResult<UserProfile> {
    fetch(api, session, "/users/me")
}

pub fn list_users(api: &ApiClient, session: &mut SessionStore) -> CourierResult<Vec<UserSummary>> {
    fetch(api, session, "/users")
}

pub fn get_user_by_id(api: &ApiClient, session: &mut SessionStore, id: &str) -> CourierResult<UserProfile> {
    fetch(api, session, &format!("/users/{}", path_segment(id)?))
}

pub fn get_user_by_username(
    api: &ApiClient,
    session: &mut SessionStore,
    username: &str,
) -> CourierResult<UserProfile> {
    fetch(api, session, &format!("/users/username/{}", path_segment(username)?))
}

pub fn list_parcels(api: &ApiClient, session: &mut SessionStore) -> CourierResult<Vec<Parcel>> {
    fetch(api, session, "/parcels")
}
