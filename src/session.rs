use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum AuthError {
    #[error("{0} is required")]
    MissingField(&'static str),

    #[error("invalid username or password")]
    InvalidCredentials,
}

/// The credentials a [`Session`] accepts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Credentials {
    pub username: String,
    pub password: String,
}

/// Who is logged in, if anyone.
///
/// Owned by the app and handed by reference to the login page, the route
/// guard and the logout action. There is no global session.
#[derive(Debug)]
pub struct Session {
    credentials: Credentials,
    user: Option<String>,
}

impl Session {
    pub fn new(credentials: Credentials) -> Self {
        Self {
            credentials,
            user: None,
        }
    }

    pub fn login(&mut self, username: &str, password: &str) -> Result<(), AuthError> {
        let username = username.trim();
        if username.is_empty() {
            return Err(AuthError::MissingField("username"));
        }
        if password.is_empty() {
            return Err(AuthError::MissingField("password"));
        }
        if username != self.credentials.username || password != self.credentials.password {
            log::warn!("Rejected login attempt for {username:?}");
            return Err(AuthError::InvalidCredentials);
        }

        log::info!("{username} logged in");
        self.user = Some(username.to_string());
        Ok(())
    }

    pub fn logout(&mut self) {
        if let Some(user) = self.user.take() {
            log::info!("{user} logged out");
        }
    }

    pub fn is_authenticated(&self) -> bool {
        self.user.is_some()
    }

    pub fn user(&self) -> Option<&str> {
        self.user.as_deref()
    }
}
