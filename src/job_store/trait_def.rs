use super::models::{JobPosting, NewJobPosting};
use crate::filter::JobFilter;
use anyhow::Result;

/// Storage backend for job postings.
///
/// `count_jobs` and `get_jobs_page` lower the same `JobFilter` to the same
/// WHERE clause, so the reported total stays consistent with the returned
/// slice. The split count+fetch can still drift under concurrent writes;
/// that race is inherent to the pattern and accepted.
pub trait JobStore: Send + Sync {
    fn count_jobs(&self, filter: &JobFilter) -> Result<u64>;

    /// Fetch one page, ordered by posting timestamp descending.
    fn get_jobs_page(&self, filter: &JobFilter, skip: u64, take: u64) -> Result<Vec<JobPosting>>;

    fn create_job(&self, new_job: NewJobPosting) -> Result<JobPosting>;

    /// Create all postings in a single transaction, all-or-nothing.
    fn create_jobs(&self, new_jobs: Vec<NewJobPosting>) -> Result<Vec<JobPosting>>;
}
