//! Job board API routes.

use super::envelope;
use super::state::{ServerState, SharedJobStore};
use crate::filter::{clamp_limit, clamp_page, Domain, JobFilter, JobType, Pagination};
use crate::job_store::NewJobPosting;

use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use serde::Deserialize;
use serde_json::json;
use tracing::error;

const DEFAULT_PAGE_SIZE: u64 = 10;
const BULK_PAGE_SIZE: u64 = 5;

#[derive(Deserialize, Debug)]
#[serde(rename_all = "camelCase")]
struct JobsQuery {
    page: Option<u64>,
    limit: Option<u64>,
    job_type: Option<String>,
    experience: Option<String>,
    salary: Option<String>,
    domain: Option<String>,
    search: Option<String>,
}

impl JobsQuery {
    fn to_filter(&self) -> Result<JobFilter, crate::filter::FilterError> {
        JobFilter::from_params(
            self.job_type.as_deref(),
            self.experience.as_deref(),
            self.salary.as_deref(),
            self.domain.as_deref(),
            self.search.as_deref(),
        )
    }
}

async fn get_jobs(State(job_store): State<SharedJobStore>, Query(q): Query<JobsQuery>) -> Response {
    let filter = match q.to_filter() {
        Ok(filter) => filter,
        Err(err) => return envelope::error(StatusCode::BAD_REQUEST, err.to_string()),
    };
    let page = clamp_page(q.page);
    let limit = clamp_limit(q.limit, DEFAULT_PAGE_SIZE);

    let total = match job_store.count_jobs(&filter) {
        Ok(total) => total,
        Err(err) => {
            error!("Failed to count jobs: {:#}", err);
            return envelope::error(StatusCode::INTERNAL_SERVER_ERROR, "Failed to fetch jobs");
        }
    };
    let jobs = match job_store.get_jobs_page(&filter, Pagination::skip(page, limit), limit) {
        Ok(jobs) => jobs,
        Err(err) => {
            error!("Failed to fetch jobs: {:#}", err);
            return envelope::error(StatusCode::INTERNAL_SERVER_ERROR, "Failed to fetch jobs");
        }
    };

    Json(json!({
        "data": jobs,
        "pagination": {
            "total": total,
            "page": page,
            "limit": limit,
            "pages": total.div_ceil(limit),
        },
    }))
    .into_response()
}

async fn get_bulk_jobs(
    State(job_store): State<SharedJobStore>,
    Query(q): Query<JobsQuery>,
) -> Response {
    let filter = match q.to_filter() {
        Ok(filter) => filter.active_only(),
        Err(err) => return envelope::error(StatusCode::BAD_REQUEST, err.to_string()),
    };
    let page = clamp_page(q.page);

    let total = match job_store.count_jobs(&filter) {
        Ok(total) => total,
        Err(err) => {
            error!("Failed to count jobs: {:#}", err);
            return envelope::error(StatusCode::INTERNAL_SERVER_ERROR, "Failed to fetch jobs");
        }
    };
    let skip = Pagination::skip(page, BULK_PAGE_SIZE);
    let jobs = match job_store.get_jobs_page(&filter, skip, BULK_PAGE_SIZE) {
        Ok(jobs) => jobs,
        Err(err) => {
            error!("Failed to fetch jobs: {:#}", err);
            return envelope::error(StatusCode::INTERNAL_SERVER_ERROR, "Failed to fetch jobs");
        }
    };

    envelope::success(
        StatusCode::OK,
        json!({
            "jobs": jobs,
            "pagination": Pagination::new(total, page, BULK_PAGE_SIZE),
            "filters": {
                "appliedFilters": {
                    "jobType": q.job_type,
                    "experience": q.experience,
                    "salary": q.salary,
                    "domain": q.domain,
                    "search": q.search,
                },
            },
        }),
    )
}

enum JobValidationError {
    MissingRequired,
    InvalidDeadline,
}

#[derive(Deserialize, Debug)]
#[serde(rename_all = "camelCase")]
struct CreateJobBody {
    title: Option<String>,
    company_name: Option<String>,
    description: Option<String>,
    logo_img: Option<String>,
    salary: Option<String>,
    salary_min: Option<i64>,
    salary_max: Option<i64>,
    location: Option<String>,
    #[serde(default)]
    remote: bool,
    #[serde(default)]
    experience_required: u32,
    #[serde(default)]
    skills: Vec<String>,
    /// RFC 3339 timestamp or plain `YYYY-MM-DD` date.
    deadline: Option<String>,
    is_active: Option<bool>,
    job_type: Option<JobType>,
    domain: Option<Domain>,
}

fn parse_deadline(raw: &str) -> Option<i64> {
    if let Ok(dt) = chrono::DateTime::parse_from_rfc3339(raw) {
        return Some(dt.timestamp());
    }
    let date = chrono::NaiveDate::parse_from_str(raw, "%Y-%m-%d").ok()?;
    Some(date.and_hms_opt(0, 0, 0)?.and_utc().timestamp())
}

fn required(field: Option<String>) -> Result<String, JobValidationError> {
    match field {
        Some(value) if !value.trim().is_empty() => Ok(value),
        _ => Err(JobValidationError::MissingRequired),
    }
}

impl CreateJobBody {
    fn into_new_job(self) -> Result<NewJobPosting, JobValidationError> {
        let deadline = match self.deadline {
            None => None,
            Some(raw) => {
                Some(parse_deadline(&raw).ok_or(JobValidationError::InvalidDeadline)?)
            }
        };
        Ok(NewJobPosting {
            title: required(self.title)?,
            company_name: required(self.company_name)?,
            description: required(self.description)?,
            logo_img: self.logo_img,
            salary: self.salary,
            salary_min: self.salary_min,
            salary_max: self.salary_max,
            location: self.location,
            remote: self.remote,
            experience_required: self.experience_required,
            skills: self.skills,
            deadline,
            is_active: self.is_active.unwrap_or(true),
            job_type: self.job_type.unwrap_or(JobType::FullTime),
            domain: self.domain.unwrap_or(Domain::Other),
        })
    }
}

async fn create_job(
    State(job_store): State<SharedJobStore>,
    Json(body): Json<CreateJobBody>,
) -> Response {
    let new_job = match body.into_new_job() {
        Ok(new_job) => new_job,
        Err(JobValidationError::MissingRequired) => {
            return envelope::error(
                StatusCode::BAD_REQUEST,
                "Title, company name, and description are required",
            )
        }
        Err(JobValidationError::InvalidDeadline) => {
            return envelope::error(StatusCode::BAD_REQUEST, "Invalid deadline date")
        }
    };

    match job_store.create_job(new_job) {
        Ok(job) => envelope::success(StatusCode::OK, job),
        Err(err) => {
            error!("Failed to create job: {:#}", err);
            envelope::error(StatusCode::INTERNAL_SERVER_ERROR, "Internal Error")
        }
    }
}

#[derive(Deserialize, Debug)]
struct CreateBulkJobsBody {
    jobs: Option<Vec<CreateJobBody>>,
}

async fn create_bulk_jobs(
    State(job_store): State<SharedJobStore>,
    Json(body): Json<CreateBulkJobsBody>,
) -> Response {
    let jobs = match body.jobs {
        Some(jobs) if !jobs.is_empty() => jobs,
        _ => {
            return envelope::error(
                StatusCode::BAD_REQUEST,
                "Jobs array is required and cannot be empty",
            )
        }
    };

    // Validate the whole batch before touching storage so a bad entry
    // creates zero rows.
    let mut new_jobs = Vec::with_capacity(jobs.len());
    for job in jobs {
        match job.into_new_job() {
            Ok(new_job) => new_jobs.push(new_job),
            Err(JobValidationError::MissingRequired) => {
                return envelope::error(
                    StatusCode::BAD_REQUEST,
                    "All jobs must have title, company name, and description",
                )
            }
            Err(JobValidationError::InvalidDeadline) => {
                return envelope::error(StatusCode::BAD_REQUEST, "Invalid deadline date")
            }
        }
    }

    match job_store.create_jobs(new_jobs) {
        Ok(created) => envelope::success(StatusCode::CREATED, created),
        Err(err) => {
            error!("Failed to create bulk jobs: {:#}", err);
            envelope::error(StatusCode::INTERNAL_SERVER_ERROR, "Failed to create jobs")
        }
    }
}

pub fn make_job_routes(state: ServerState) -> Router {
    Router::new()
        .route("/get-jobs", get(get_jobs))
        .route("/get-bulk-jobs", get(get_bulk_jobs))
        .route("/create-job", post(create_job))
        .route("/create-bulk-jobs", post(create_bulk_jobs))
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::JwtVerifier;
    use crate::job_store::{JobStore, SqliteJobStore};
    use crate::server::server::make_app;
    use crate::server::{RequestsLoggingLevel, ServerConfig};
    use crate::user_store::SqliteUserStore;
    use axum::body::Body;
    use axum::http::Request;
    use std::sync::Arc;
    use tower::ServiceExt;

    fn test_app() -> (Router, Arc<SqliteJobStore>, tempfile::TempDir) {
        let dir = tempfile::tempdir().unwrap();
        let job_store = Arc::new(SqliteJobStore::new(dir.path().join("jobs.db"), 2).unwrap());
        let user_store = Arc::new(SqliteUserStore::new(dir.path().join("users.db")).unwrap());
        let config = ServerConfig {
            requests_logging_level: RequestsLoggingLevel::None,
            ..ServerConfig::default()
        };
        let app = make_app(
            config,
            job_store.clone(),
            user_store,
            Arc::new(JwtVerifier::new("test-secret")),
        );
        (app, job_store, dir)
    }

    async fn body_json(response: Response) -> serde_json::Value {
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    async fn get(app: &Router, uri: &str) -> Response {
        let request = Request::builder().uri(uri).body(Body::empty()).unwrap();
        app.clone().oneshot(request).await.unwrap().into_response()
    }

    async fn post_json(app: &Router, uri: &str, body: serde_json::Value) -> Response {
        let request = Request::builder()
            .method("POST")
            .uri(uri)
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap();
        app.clone().oneshot(request).await.unwrap().into_response()
    }

    fn seed_job(store: &SqliteJobStore, title: &str, active: bool) {
        store
            .create_job(crate::job_store::NewJobPosting {
                title: title.to_string(),
                company_name: "Acme".to_string(),
                description: "desc".to_string(),
                is_active: active,
                ..Default::default()
            })
            .unwrap();
    }

    #[tokio::test]
    async fn get_jobs_paginates_and_reports_totals() {
        let (app, store, _dir) = test_app();
        for i in 0..12 {
            seed_job(&store, &format!("job-{}", i), true);
        }

        let response = get(&app, "/job/get-jobs?page=1&limit=5").await;
        assert_eq!(response.status(), StatusCode::OK);
        let json = body_json(response).await;
        assert_eq!(json["data"].as_array().unwrap().len(), 5);
        assert_eq!(json["pagination"]["total"], 12);
        assert_eq!(json["pagination"]["page"], 1);
        assert_eq!(json["pagination"]["limit"], 5);
        assert_eq!(json["pagination"]["pages"], 3);
    }

    #[tokio::test]
    async fn get_jobs_slice_is_consistent_with_total() {
        let (app, store, _dir) = test_app();
        for i in 0..3 {
            seed_job(&store, &format!("job-{}", i), true);
        }

        let json = body_json(get(&app, "/job/get-jobs?limit=10").await).await;
        let data_len = json["data"].as_array().unwrap().len() as u64;
        let total = json["pagination"]["total"].as_u64().unwrap();
        assert!(data_len <= 10);
        assert!(data_len <= total);
        assert_eq!(total, 3);
    }

    #[tokio::test]
    async fn get_jobs_applies_domain_filter() {
        let (app, store, _dir) = test_app();
        store
            .create_job(crate::job_store::NewJobPosting {
                title: "designer".to_string(),
                company_name: "Acme".to_string(),
                description: "d".to_string(),
                domain: Domain::Design,
                ..Default::default()
            })
            .unwrap();
        seed_job(&store, "other", true);

        let json = body_json(get(&app, "/job/get-jobs?domain=Design").await).await;
        assert_eq!(json["pagination"]["total"], 1);
        assert_eq!(json["data"][0]["domain"], "DESIGN");
    }

    #[tokio::test]
    async fn unknown_filter_label_is_a_client_error() {
        let (app, _store, _dir) = test_app();
        let response = get(&app, "/job/get-jobs?domain=Unknown").await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let json = body_json(response).await;
        assert_eq!(json["status"], "error");

        let response = get(&app, "/job/get-jobs?experience=More%20than%20x%20years").await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn get_bulk_jobs_uses_fixed_page_size_and_envelope() {
        let (app, store, _dir) = test_app();
        for i in 0..12 {
            seed_job(&store, &format!("job-{}", i), true);
        }
        seed_job(&store, "hidden", false);

        let response = get(&app, "/job/get-bulk-jobs?page=1").await;
        assert_eq!(response.status(), StatusCode::OK);
        let json = body_json(response).await;
        assert_eq!(json["status"], "success");
        assert_eq!(json["statusCode"], 200);

        let result = &json["result"];
        assert_eq!(result["jobs"].as_array().unwrap().len(), 5);
        // Inactive postings are excluded.
        assert_eq!(result["pagination"]["total"], 12);
        assert_eq!(result["pagination"]["currentPage"], 1);
        assert_eq!(result["pagination"]["totalPages"], 3);
        assert_eq!(result["pagination"]["hasMore"], true);
        assert_eq!(result["pagination"]["nextPage"], 2);
        assert_eq!(result["pagination"]["limit"], 5);
    }

    #[tokio::test]
    async fn get_bulk_jobs_last_page_has_null_next() {
        let (app, store, _dir) = test_app();
        for i in 0..7 {
            seed_job(&store, &format!("job-{}", i), true);
        }

        let json = body_json(get(&app, "/job/get-bulk-jobs?page=2").await).await;
        let pagination = &json["result"]["pagination"];
        assert_eq!(pagination["hasMore"], false);
        assert_eq!(pagination["nextPage"], serde_json::Value::Null);
    }

    #[tokio::test]
    async fn get_bulk_jobs_echoes_applied_filters() {
        let (app, _store, _dir) = test_app();
        let json = body_json(
            get(&app, "/job/get-bulk-jobs?jobType=Full%20Time&salary=Competitive").await,
        )
        .await;
        let applied = &json["result"]["filters"]["appliedFilters"];
        assert_eq!(applied["jobType"], "Full Time");
        assert_eq!(applied["salary"], "Competitive");
        assert_eq!(applied["domain"], serde_json::Value::Null);
    }

    #[tokio::test]
    async fn create_job_round_trips() {
        let (app, store, _dir) = test_app();
        let response = post_json(
            &app,
            "/job/create-job",
            serde_json::json!({
                "title": "Backend Engineer",
                "companyName": "Acme",
                "description": "APIs",
                "salary": "10-12 LPA",
                "salaryMin": 1_000_000,
                "salaryMax": 1_200_000,
                "remote": true,
                "experienceRequired": 3,
                "skills": ["rust"],
                "jobType": "CONTRACT",
                "domain": "DEVELOPMENT",
                "deadline": "2026-12-31",
            }),
        )
        .await;
        assert_eq!(response.status(), StatusCode::OK);
        let json = body_json(response).await;
        assert_eq!(json["status"], "success");
        assert_eq!(json["result"]["companyName"], "Acme");
        assert_eq!(json["result"]["jobType"], "CONTRACT");
        assert!(json["result"]["deadline"].is_i64());

        assert_eq!(
            store.count_jobs(&crate::filter::JobFilter::default()).unwrap(),
            1
        );
    }

    #[tokio::test]
    async fn create_job_requires_title_company_description() {
        let (app, store, _dir) = test_app();
        let response = post_json(
            &app,
            "/job/create-job",
            serde_json::json!({"title": "x", "companyName": "y"}),
        )
        .await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(
            store.count_jobs(&crate::filter::JobFilter::default()).unwrap(),
            0
        );
    }

    #[tokio::test]
    async fn bulk_create_rejects_whole_batch_on_one_invalid_entry() {
        let (app, store, _dir) = test_app();
        let response = post_json(
            &app,
            "/job/create-bulk-jobs",
            serde_json::json!({"jobs": [
                {"title": "ok", "companyName": "Acme", "description": "d"},
                {"companyName": "Acme", "description": "missing title"},
            ]}),
        )
        .await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let json = body_json(response).await;
        assert_eq!(
            json["result"],
            "All jobs must have title, company name, and description"
        );
        assert_eq!(
            store.count_jobs(&crate::filter::JobFilter::default()).unwrap(),
            0
        );
    }

    #[tokio::test]
    async fn bulk_create_requires_non_empty_array() {
        let (app, _store, _dir) = test_app();
        for body in [serde_json::json!({}), serde_json::json!({"jobs": []})] {
            let response = post_json(&app, "/job/create-bulk-jobs", body).await;
            assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        }
    }

    #[tokio::test]
    async fn bulk_create_creates_all_rows() {
        let (app, store, _dir) = test_app();
        let response = post_json(
            &app,
            "/job/create-bulk-jobs",
            serde_json::json!({"jobs": [
                {"title": "a", "companyName": "Acme", "description": "d"},
                {"title": "b", "companyName": "Acme", "description": "d"},
            ]}),
        )
        .await;
        assert_eq!(response.status(), StatusCode::CREATED);
        let json = body_json(response).await;
        assert_eq!(json["statusCode"], 201);
        assert_eq!(json["result"].as_array().unwrap().len(), 2);
        assert_eq!(
            store.count_jobs(&crate::filter::JobFilter::default()).unwrap(),
            2
        );
    }
}
