use crate::client::ApiError;

// Single shared admin login, held in memory. No server round trip.
const ADMIN_USERNAME: &str = "admin";
const ADMIN_PASSWORD: &str = "admin123";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    pub username: String,
}

pub fn login(username: &str, password: &str) -> Result<Session, ApiError> {
    if username == ADMIN_USERNAME && password == ADMIN_PASSWORD {
        Ok(Session {
            username: username.to_string(),
        })
    } else {
        Err(ApiError::Unauthorized)
    }
}
