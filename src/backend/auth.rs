//! Logging in to the authentication backend.

use serde::{Deserialize, Serialize};

use crate::Error;

/// An email and password pair.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Credentials {
    email: String,
    password: String,
}

impl Credentials {
    /// Create credentials to send to the authentication backend.
    ///
    /// # Errors
    /// Returns [Error::InvalidCredentials] if `email` does not look like an
    /// email address or `password` is empty.
    pub fn new(email: &str, password: &str) -> Result<Self, Error> {
        let email = email.trim();

        match email.split_once('@') {
            Some((user, domain)) if !user.is_empty() && !domain.is_empty() => {}
            _ => return Err(Error::InvalidCredentials),
        }

        if password.is_empty() {
            return Err(Error::InvalidCredentials);
        }

        Ok(Self {
            email: email.to_owned(),
            password: password.to_owned(),
        })
    }

    /// The email address.
    pub fn email(&self) -> &str {
        &self.email
    }
}

/// The user and session returned after logging in.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Session {
    /// The backend's identifier for the user.
    pub user_id: String,
    /// The user's email address.
    pub email: String,
    /// The token to send with later requests.
    pub access_token: String,
}

/// Checks credentials and starts a session.
pub trait Authenticator {
    /// Log in with `credentials`.
    ///
    /// Implementers should return [Error::InvalidCredentials] when the
    /// backend rejects the email and password.
    fn log_in(&self, credentials: &Credentials) -> Result<Session, Error>;
}
