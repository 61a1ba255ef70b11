mod models;
mod schema;
mod store;
mod trait_def;

pub use models::{AuthProvider, NewUserProfile, UserProfile, UserUpdate};
pub use store::SqliteUserStore;
pub use trait_def::UserStore;
