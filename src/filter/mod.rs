mod criteria;
mod pagination;

pub use criteria::{Domain, FilterError, JobFilter, JobType, SalaryFilter};
pub use pagination::{clamp_limit, clamp_page, Pagination};
