mod models;
mod schema;
mod store;
mod trait_def;

pub use models::{JobPosting, NewJobPosting};
pub use store::SqliteJobStore;
pub use trait_def::JobStore;
