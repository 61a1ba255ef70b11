use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AuthProvider {
    EmailPassword,
    Google,
}

impl AuthProvider {
    pub fn as_str(&self) -> &'static str {
        match self {
            AuthProvider::EmailPassword => "email_password",
            AuthProvider::Google => "google",
        }
    }

    pub fn from_str(s: &str) -> Option<AuthProvider> {
        match s {
            "email_password" => Some(AuthProvider::EmailPassword),
            "google" => Some(AuthProvider::Google),
            _ => None,
        }
    }
}

/// A job-seeker profile. `uid` is the subject claim of the auth token and
/// uniquely identifies the user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserProfile {
    pub id: i64,
    pub uid: String,
    pub email: String,
    pub name: Option<String>,
    pub designation: Option<String>,
    pub linked_in: Option<String>,
    pub github: Option<String>,
    pub experience_years: Option<u32>,
    pub resume_url: Option<String>,
    pub skills: Vec<String>,
    pub profile_image: Option<String>,
    pub auth_provider: AuthProvider,
    pub created: i64,
}

#[derive(Debug, Clone)]
pub struct NewUserProfile {
    pub uid: String,
    pub email: String,
    pub name: Option<String>,
    pub profile_image: Option<String>,
    pub auth_provider: AuthProvider,
}

/// Partial profile update; only present fields are applied.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct UserUpdate {
    pub name: Option<String>,
    pub designation: Option<String>,
    pub email: Option<String>,
    pub linked_in: Option<String>,
    pub github: Option<String>,
    pub experience_years: Option<u32>,
    pub resume_url: Option<String>,
    pub skills: Option<Vec<String>>,
    pub profile_image: Option<String>,
}

impl UserUpdate {
    pub fn is_empty(&self) -> bool {
        self.name.is_none()
            && self.designation.is_none()
            && self.email.is_none()
            && self.linked_in.is_none()
            && self.github.is_none()
            && self.experience_years.is_none()
            && self.resume_url.is_none()
            && self.skills.is_none()
            && self.profile_image.is_none()
    }
}
