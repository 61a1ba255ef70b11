//! Translation of raw query-string filter parameters into a structured
//! predicate the job store can execute.
//!
//! The translator is pure and performs no I/O. Malformed input never reaches
//! the store: unrecognized display labels and unparseable experience/salary
//! strings are rejected with a [`FilterError`], which the HTTP layer maps to
//! a 400 response.

use lazy_static::lazy_static;
use regex::Regex;
use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum JobType {
    FullTime,
    PartTime,
    Contract,
    Internship,
    Freelance,
}

impl JobType {
    /// Display label used by the filter UI, e.g. "Full Time".
    pub fn from_label(label: &str) -> Option<JobType> {
        match label {
            "Full Time" => Some(JobType::FullTime),
            "Part Time" => Some(JobType::PartTime),
            "Contract" => Some(JobType::Contract),
            "Internship" => Some(JobType::Internship),
            "Freelance" => Some(JobType::Freelance),
            _ => None,
        }
    }

    /// Stable identifier stored in the database.
    pub fn as_str(&self) -> &'static str {
        match self {
            JobType::FullTime => "FULL_TIME",
            JobType::PartTime => "PART_TIME",
            JobType::Contract => "CONTRACT",
            JobType::Internship => "INTERNSHIP",
            JobType::Freelance => "FREELANCE",
        }
    }

    pub fn from_str(s: &str) -> Option<JobType> {
        match s {
            "FULL_TIME" => Some(JobType::FullTime),
            "PART_TIME" => Some(JobType::PartTime),
            "CONTRACT" => Some(JobType::Contract),
            "INTERNSHIP" => Some(JobType::Internship),
            "FREELANCE" => Some(JobType::Freelance),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Domain {
    Design,
    Development,
    Marketing,
    Product,
    Data,
    Sales,
    CustomerService,
    Operations,
    Finance,
    Hr,
    Legal,
    Other,
}

impl Domain {
    pub fn from_label(label: &str) -> Option<Domain> {
        match label {
            "Design" => Some(Domain::Design),
            "Development" => Some(Domain::Development),
            "Marketing" => Some(Domain::Marketing),
            "Product" => Some(Domain::Product),
            "Data" => Some(Domain::Data),
            "Sales" => Some(Domain::Sales),
            "Customer Service" => Some(Domain::CustomerService),
            "Operations" => Some(Domain::Operations),
            "Finance" => Some(Domain::Finance),
            "HR" => Some(Domain::Hr),
            "Legal" => Some(Domain::Legal),
            "Other" => Some(Domain::Other),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Domain::Design => "DESIGN",
            Domain::Development => "DEVELOPMENT",
            Domain::Marketing => "MARKETING",
            Domain::Product => "PRODUCT",
            Domain::Data => "DATA",
            Domain::Sales => "SALES",
            Domain::CustomerService => "CUSTOMER_SERVICE",
            Domain::Operations => "OPERATIONS",
            Domain::Finance => "FINANCE",
            Domain::Hr => "HR",
            Domain::Legal => "LEGAL",
            Domain::Other => "OTHER",
        }
    }

    pub fn from_str(s: &str) -> Option<Domain> {
        match s {
            "DESIGN" => Some(Domain::Design),
            "DEVELOPMENT" => Some(Domain::Development),
            "MARKETING" => Some(Domain::Marketing),
            "PRODUCT" => Some(Domain::Product),
            "DATA" => Some(Domain::Data),
            "SALES" => Some(Domain::Sales),
            "CUSTOMER_SERVICE" => Some(Domain::CustomerService),
            "OPERATIONS" => Some(Domain::Operations),
            "FINANCE" => Some(Domain::Finance),
            "HR" => Some(Domain::Hr),
            "LEGAL" => Some(Domain::Legal),
            "OTHER" => Some(Domain::Other),
            _ => None,
        }
    }
}

/// Salary predicate. LPA figures (lakhs per annum) are kept as entered here;
/// the store lowers them to absolute currency units in one place.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SalaryFilter {
    /// Substring match against the display salary field.
    Competitive,
    /// "A-B LPA": salary_min >= A and salary_max <= B.
    Range { min_lpa: u32, max_lpa: u32 },
    /// "N+ LPA": salary_min >= N.
    Floor { min_lpa: u32 },
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FilterError {
    #[error("unknown job type: {0:?}")]
    UnknownJobType(String),
    #[error("unknown domain: {0:?}")]
    UnknownDomain(String),
    #[error("malformed experience filter: {0:?}, expected \"More than N years\"")]
    MalformedExperience(String),
    #[error("malformed salary filter: {0:?}")]
    MalformedSalary(String),
    #[error("inverted salary range: {min}-{max} LPA")]
    InvertedSalaryRange { min: u32, max: u32 },
}

lazy_static! {
    static ref EXPERIENCE_RE: Regex = Regex::new(r"^More than (\d+) years?$").unwrap();
}

fn parse_experience(raw: &str) -> Result<u32, FilterError> {
    let captures = EXPERIENCE_RE
        .captures(raw.trim())
        .ok_or_else(|| FilterError::MalformedExperience(raw.to_string()))?;
    captures[1]
        .parse::<u32>()
        .map_err(|_| FilterError::MalformedExperience(raw.to_string()))
}

fn parse_salary(raw: &str) -> Result<SalaryFilter, FilterError> {
    let trimmed = raw.trim();
    if trimmed == "Competitive" {
        return Ok(SalaryFilter::Competitive);
    }

    if trimmed.contains('-') {
        // "A-B LPA"
        let stripped = trimmed
            .strip_suffix(" LPA")
            .ok_or_else(|| FilterError::MalformedSalary(raw.to_string()))?;
        let segments: Vec<&str> = stripped.split('-').collect();
        if segments.len() != 2 {
            return Err(FilterError::MalformedSalary(raw.to_string()));
        }
        let min_lpa = segments[0]
            .trim()
            .parse::<u32>()
            .map_err(|_| FilterError::MalformedSalary(raw.to_string()))?;
        let max_lpa = segments[1]
            .trim()
            .parse::<u32>()
            .map_err(|_| FilterError::MalformedSalary(raw.to_string()))?;
        if min_lpa > max_lpa {
            return Err(FilterError::InvertedSalaryRange {
                min: min_lpa,
                max: max_lpa,
            });
        }
        return Ok(SalaryFilter::Range { min_lpa, max_lpa });
    }

    if trimmed.contains('+') {
        // "N+ LPA", the "+ LPA" suffix is stripped as one unit
        let stripped = trimmed
            .strip_suffix("+ LPA")
            .ok_or_else(|| FilterError::MalformedSalary(raw.to_string()))?;
        let min_lpa = stripped
            .trim()
            .parse::<u32>()
            .map_err(|_| FilterError::MalformedSalary(raw.to_string()))?;
        return Ok(SalaryFilter::Floor { min_lpa });
    }

    Err(FilterError::MalformedSalary(raw.to_string()))
}

/// The translated predicate. All present criteria are AND-combined by the
/// store; the free-text search term matches title, company name or
/// description (a single criterion, OR across those columns).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct JobFilter {
    pub job_type: Option<JobType>,
    pub min_experience_years: Option<u32>,
    pub salary: Option<SalaryFilter>,
    pub domain: Option<Domain>,
    pub search: Option<String>,
    pub active_only: bool,
}

fn non_empty(raw: Option<&str>) -> Option<&str> {
    raw.map(str::trim).filter(|s| !s.is_empty())
}

impl JobFilter {
    pub fn from_params(
        job_type: Option<&str>,
        experience: Option<&str>,
        salary: Option<&str>,
        domain: Option<&str>,
        search: Option<&str>,
    ) -> Result<JobFilter, FilterError> {
        let job_type = non_empty(job_type)
            .map(|label| {
                JobType::from_label(label)
                    .ok_or_else(|| FilterError::UnknownJobType(label.to_string()))
            })
            .transpose()?;

        let min_experience_years = non_empty(experience).map(parse_experience).transpose()?;

        let salary = non_empty(salary).map(parse_salary).transpose()?;

        let domain = non_empty(domain)
            .map(|label| {
                Domain::from_label(label)
                    .ok_or_else(|| FilterError::UnknownDomain(label.to_string()))
            })
            .transpose()?;

        let search = non_empty(search).map(str::to_string);

        Ok(JobFilter {
            job_type,
            min_experience_years,
            salary,
            domain,
            search,
            active_only: false,
        })
    }

    pub fn active_only(mut self) -> JobFilter {
        self.active_only = true;
        self
    }
}
