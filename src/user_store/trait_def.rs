use super::models::{NewUserProfile, UserProfile, UserUpdate};
use anyhow::Result;

pub trait UserStore: Send + Sync {
    fn get_user(&self, uid: &str) -> Result<Option<UserProfile>>;

    /// Create a profile for a verified auth subject. If a profile with the
    /// same uid already exists it is returned unchanged (signup is
    /// idempotent across repeated logins).
    fn create_user(&self, new_user: NewUserProfile) -> Result<UserProfile>;

    /// Apply a partial update; returns None when no profile exists for the
    /// uid.
    fn update_user(&self, uid: &str, update: UserUpdate) -> Result<Option<UserProfile>>;
}
