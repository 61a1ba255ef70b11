use crate::filter::{Domain, JobType};
use serde::{Deserialize, Serialize};

/// A persisted job posting. Salary bounds are absolute currency units,
/// timestamps are unix seconds.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JobPosting {
    pub id: i64,
    pub title: String,
    pub company_name: String,
    pub logo_img: Option<String>,
    pub description: String,
    pub salary: Option<String>,
    pub salary_min: Option<i64>,
    pub salary_max: Option<i64>,
    pub location: Option<String>,
    pub remote: bool,
    pub experience_required: u32,
    pub skills: Vec<String>,
    pub posted_at: i64,
    pub deadline: Option<i64>,
    pub is_active: bool,
    pub job_type: JobType,
    pub domain: Domain,
}

/// Creation payload. Title, company name and description are validated as
/// non-empty by the HTTP layer before this is constructed.
#[derive(Debug, Clone)]
pub struct NewJobPosting {
    pub title: String,
    pub company_name: String,
    pub logo_img: Option<String>,
    pub description: String,
    pub salary: Option<String>,
    pub salary_min: Option<i64>,
    pub salary_max: Option<i64>,
    pub location: Option<String>,
    pub remote: bool,
    pub experience_required: u32,
    pub skills: Vec<String>,
    pub deadline: Option<i64>,
    pub is_active: bool,
    pub job_type: JobType,
    pub domain: Domain,
}

impl Default for NewJobPosting {
    fn default() -> Self {
        NewJobPosting {
            title: String::new(),
            company_name: String::new(),
            logo_img: None,
            description: String::new(),
            salary: None,
            salary_min: None,
            salary_max: None,
            location: None,
            remote: false,
            experience_required: 0,
            skills: Vec::new(),
            deadline: None,
            is_active: true,
            job_type: JobType::FullTime,
            domain: Domain::Other,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn job_posting_serializes_with_camel_case_keys() {
        let job = JobPosting {
            id: 1,
            title: "Backend Engineer".to_string(),
            company_name: "Acme".to_string(),
            logo_img: None,
            description: "Build APIs".to_string(),
            salary: Some("12-18 LPA".to_string()),
            salary_min: Some(1_200_000),
            salary_max: Some(1_800_000),
            location: Some("Remote".to_string()),
            remote: true,
            experience_required: 3,
            skills: vec!["rust".to_string()],
            posted_at: 1_700_000_000,
            deadline: None,
            is_active: true,
            job_type: JobType::FullTime,
            domain: Domain::Development,
        };

        let json = serde_json::to_value(&job).unwrap();
        assert_eq!(json["companyName"], "Acme");
        assert_eq!(json["experienceRequired"], 3);
        assert_eq!(json["jobType"], "FULL_TIME");
        assert_eq!(json["domain"], "DEVELOPMENT");
        assert_eq!(json["isActive"], true);
        assert_eq!(json["salaryMin"], 1_200_000);
    }
}
