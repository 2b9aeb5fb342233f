use crate::api::{ApiError, SignupRequest};
use crate::models::Role;

pub(crate) const LOGIN_FAILED: &str = "Invalid username or password";
pub(crate) const SIGNUP_FAILED: &str = "Signup failed. Try again.";
pub(crate) const SIGNUP_DONE: &str = "Signup successful. Please login!";

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum AuthFormError {
    MissingCredentials,
    MissingSignupFields,
}

impl std::fmt::Display for AuthFormError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let msg = match self {
            AuthFormError::MissingCredentials => "Please fill in both fields",
            AuthFormError::MissingSignupFields => "All fields except Parent ID are required",
        };
        write!(f, "{msg}")
    }
}

impl std::error::Error for AuthFormError {}

#[derive(Clone, Debug, Default, PartialEq)]
pub(crate) struct LoginForm {
    pub username: String,
    pub password: String,
}

impl LoginForm {
    pub fn validate(&self) -> Result<(), AuthFormError> {
        if self.username.is_empty() || self.password.is_empty() {
            return Err(AuthFormError::MissingCredentials);
        }
        Ok(())
    }
}

#[derive(Clone, Debug, Default, PartialEq)]
pub(crate) struct SignupForm {
    pub username: String,
    pub email: String,
    pub password: String,
    pub role: Role,
    /// Raw text of the optional parent id input.
    pub parent_id: String,
}

impl SignupForm {
    /// Parent reference is only sent for children, and only when it is a
    /// number once trimmed.
    fn parent_ref(&self) -> Option<i64> {
        match self.role {
            Role::Child => self.parent_id.trim().parse::<i64>().ok(),
            Role::Parent => None,
        }
    }

    pub fn into_request(&self) -> Result<SignupRequest, AuthFormError> {
        if self.username.trim().is_empty()
            || self.email.trim().is_empty()
            || self.password.is_empty()
        {
            return Err(AuthFormError::MissingSignupFields);
        }

        Ok(SignupRequest {
            username: self.username.trim().to_string(),
            email: self.email.trim().to_string(),
            password: self.password.clone(),
            role: self.role,
            parent_id: self.parent_ref(),
        })
    }
}

pub(crate) fn signup_failure_message(err: &ApiError) -> String {
    err.detail().unwrap_or_else(|| SIGNUP_FAILED.to_string())
}
