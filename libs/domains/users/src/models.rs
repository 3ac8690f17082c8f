use serde::{Deserialize, Serialize};
use validator::Validate;

/// Registered user
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    /// Storage-assigned identifier (empty until persisted)
    pub id: String,
    /// User email (unique)
    pub email: String,
    /// User login (unique)
    pub login: String,
    /// Argon2 PHC hash (never exposed in API responses)
    #[serde(skip_serializing)]
    pub password_hash: String,
}

impl User {
    /// Create a not-yet-persisted user (password must already be hashed)
    pub fn new(email: String, login: String, password_hash: String) -> Self {
        Self {
            id: String::new(),
            email,
            login,
            password_hash,
        }
    }

    /// Whether `other` collides with this user on email or login
    pub fn conflicts_with(&self, other: &User) -> bool {
        self.email == other.email || self.login == other.login
    }
}

/// DTO for registering a new user
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct NewUser {
    #[validate(email, length(max = 255))]
    pub email: String,
    #[validate(length(min = 1, max = 100))]
    pub login: String,
    #[validate(length(min = 1, max = 128))]
    pub password: String,
}

/// DTO for user login
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct LoginRequest {
    #[validate(length(min = 1, max = 100))]
    pub login: String,
    #[validate(length(min = 1, max = 128))]
    pub password: String,
}

/// Response after successful registration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RegisterResponse {
    pub id: String,
}

/// Response after successful login
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginResponse {
    pub access_token: String,
}
