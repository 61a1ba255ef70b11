//! SQLite-backed job store.

use super::models::{JobPosting, NewJobPosting};
use super::schema::JOB_VERSIONED_SCHEMAS;
use super::trait_def::JobStore;
use crate::filter::{Domain, JobFilter, JobType, SalaryFilter};
use crate::sqlite_persistence::migrate_if_needed;
use anyhow::{Context, Result};
use rusqlite::types::Value;
use rusqlite::{params_from_iter, Connection, Row};
use std::path::Path;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use tracing::info;

/// The one place where LPA filter figures become absolute currency units.
const LPA_IN_CURRENCY_UNITS: i64 = 100_000;

const JOB_COLUMNS: &str = "id, title, company_name, logo_img, description, salary, \
     salary_min, salary_max, location, remote, experience_required, skills, \
     posted_at, deadline, is_active, job_type, domain";

#[derive(Clone)]
pub struct SqliteJobStore {
    write_conn: Arc<Mutex<Connection>>,
    read_pool: Vec<Arc<Mutex<Connection>>>,
    read_index: Arc<AtomicUsize>,
}

/// Lower a `JobFilter` to a parameterized WHERE clause. All criteria are
/// AND-combined; the search term expands to an OR across the three text
/// columns but stays a single criterion.
fn lower_filter(filter: &JobFilter) -> (String, Vec<Value>) {
    let mut clauses: Vec<String> = Vec::new();
    let mut params: Vec<Value> = Vec::new();

    if filter.active_only {
        clauses.push("is_active = 1".to_string());
    }
    if let Some(job_type) = filter.job_type {
        clauses.push("job_type = ?".to_string());
        params.push(Value::Text(job_type.as_str().to_string()));
    }
    if let Some(years) = filter.min_experience_years {
        clauses.push("experience_required >= ?".to_string());
        params.push(Value::Integer(years as i64));
    }
    match filter.salary {
        None => {}
        Some(SalaryFilter::Competitive) => {
            clauses.push("salary LIKE ?".to_string());
            params.push(Value::Text("%Competitive%".to_string()));
        }
        Some(SalaryFilter::Range { min_lpa, max_lpa }) => {
            clauses.push("salary_min >= ?".to_string());
            params.push(Value::Integer(min_lpa as i64 * LPA_IN_CURRENCY_UNITS));
            clauses.push("salary_max <= ?".to_string());
            params.push(Value::Integer(max_lpa as i64 * LPA_IN_CURRENCY_UNITS));
        }
        Some(SalaryFilter::Floor { min_lpa }) => {
            clauses.push("salary_min >= ?".to_string());
            params.push(Value::Integer(min_lpa as i64 * LPA_IN_CURRENCY_UNITS));
        }
    }
    if let Some(domain) = filter.domain {
        clauses.push("domain = ?".to_string());
        params.push(Value::Text(domain.as_str().to_string()));
    }
    if let Some(term) = &filter.search {
        clauses.push(
            "(title LIKE ? ESCAPE '\\' OR company_name LIKE ? ESCAPE '\\' \
             OR description LIKE ? ESCAPE '\\')"
                .to_string(),
        );
        let escaped = term
            .replace('\\', "\\\\")
            .replace('%', "\\%")
            .replace('_', "\\_");
        let pattern = format!("%{}%", escaped);
        for _ in 0..3 {
            params.push(Value::Text(pattern.clone()));
        }
    }

    if clauses.is_empty() {
        (String::new(), params)
    } else {
        (format!(" WHERE {}", clauses.join(" AND ")), params)
    }
}

fn invalid_enum_value(column: usize, value: &str) -> rusqlite::Error {
    rusqlite::Error::FromSqlConversionFailure(
        column,
        rusqlite::types::Type::Text,
        format!("unrecognized enum value {:?}", value).into(),
    )
}

fn row_to_job(row: &Row) -> rusqlite::Result<JobPosting> {
    let skills_json: String = row.get("skills")?;
    let skills: Vec<String> = serde_json::from_str(&skills_json).unwrap_or_default();

    let job_type_s: String = row.get("job_type")?;
    let job_type =
        JobType::from_str(&job_type_s).ok_or_else(|| invalid_enum_value(15, &job_type_s))?;

    let domain_s: String = row.get("domain")?;
    let domain = Domain::from_str(&domain_s).ok_or_else(|| invalid_enum_value(16, &domain_s))?;

    Ok(JobPosting {
        id: row.get("id")?,
        title: row.get("title")?,
        company_name: row.get("company_name")?,
        logo_img: row.get("logo_img")?,
        description: row.get("description")?,
        salary: row.get("salary")?,
        salary_min: row.get("salary_min")?,
        salary_max: row.get("salary_max")?,
        location: row.get("location")?,
        remote: row.get("remote")?,
        experience_required: row.get("experience_required")?,
        skills,
        posted_at: row.get("posted_at")?,
        deadline: row.get("deadline")?,
        is_active: row.get("is_active")?,
        job_type,
        domain,
    })
}

fn insert_job(conn: &Connection, new_job: &NewJobPosting) -> Result<JobPosting> {
    let skills_json = serde_json::to_string(&new_job.skills)?;
    let posted_at = chrono::Utc::now().timestamp();
    conn.execute(
        "INSERT INTO jobs (title, company_name, logo_img, description, salary, \
         salary_min, salary_max, location, remote, experience_required, skills, \
         posted_at, deadline, is_active, job_type, domain) \
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12, ?13, ?14, ?15, ?16)",
        rusqlite::params![
            new_job.title,
            new_job.company_name,
            new_job.logo_img,
            new_job.description,
            new_job.salary,
            new_job.salary_min,
            new_job.salary_max,
            new_job.location,
            new_job.remote,
            new_job.experience_required,
            skills_json,
            posted_at,
            new_job.deadline,
            new_job.is_active,
            new_job.job_type.as_str(),
            new_job.domain.as_str(),
        ],
    )?;
    let id = conn.last_insert_rowid();
    let job = conn.query_row(
        &format!("SELECT {} FROM jobs WHERE id = ?1", JOB_COLUMNS),
        rusqlite::params![id],
        row_to_job,
    )?;
    Ok(job)
}

impl SqliteJobStore {
    pub fn new<P: AsRef<Path>>(db_path: P, read_pool_size: usize) -> Result<Self> {
        let db_path_ref = db_path.as_ref();

        let mut write_conn = Connection::open_with_flags(
            db_path_ref,
            rusqlite::OpenFlags::SQLITE_OPEN_READ_WRITE
                | rusqlite::OpenFlags::SQLITE_OPEN_CREATE
                | rusqlite::OpenFlags::SQLITE_OPEN_URI
                | rusqlite::OpenFlags::SQLITE_OPEN_NO_MUTEX,
        )
        .context("Failed to open jobs database")?;

        migrate_if_needed(&mut write_conn, JOB_VERSIONED_SCHEMAS)?;
        write_conn.pragma_update(None, "journal_mode", "WAL")?;

        let job_count: i64 = write_conn
            .query_row("SELECT COUNT(*) FROM jobs", [], |r| r.get(0))
            .unwrap_or(0);
        info!("Opened jobs database: {} postings", job_count);

        let mut read_pool = Vec::with_capacity(read_pool_size);
        for _ in 0..read_pool_size.max(1) {
            let read_conn = Connection::open_with_flags(
                db_path_ref,
                rusqlite::OpenFlags::SQLITE_OPEN_READ_ONLY
                    | rusqlite::OpenFlags::SQLITE_OPEN_URI
                    | rusqlite::OpenFlags::SQLITE_OPEN_NO_MUTEX,
            )?;
            read_conn.pragma_update(None, "journal_mode", "WAL")?;
            read_pool.push(Arc::new(Mutex::new(read_conn)));
        }

        Ok(SqliteJobStore {
            write_conn: Arc::new(Mutex::new(write_conn)),
            read_pool,
            read_index: Arc::new(AtomicUsize::new(0)),
        })
    }

    fn get_read_conn(&self) -> Arc<Mutex<Connection>> {
        let index = self.read_index.fetch_add(1, Ordering::SeqCst) % self.read_pool.len();
        self.read_pool[index].clone()
    }
}

impl JobStore for SqliteJobStore {
    fn count_jobs(&self, filter: &JobFilter) -> Result<u64> {
        let (where_clause, params) = lower_filter(filter);
        let conn = self.get_read_conn();
        let conn = conn.lock().unwrap();
        let count: i64 = conn.query_row(
            &format!("SELECT COUNT(*) FROM jobs{}", where_clause),
            params_from_iter(params),
            |r| r.get(0),
        )?;
        Ok(count as u64)
    }

    fn get_jobs_page(&self, filter: &JobFilter, skip: u64, take: u64) -> Result<Vec<JobPosting>> {
        let (where_clause, mut params) = lower_filter(filter);
        params.push(Value::Integer(take as i64));
        params.push(Value::Integer(skip as i64));

        let conn = self.get_read_conn();
        let conn = conn.lock().unwrap();
        let mut stmt = conn.prepare(&format!(
            "SELECT {} FROM jobs{} ORDER BY posted_at DESC, id DESC LIMIT ? OFFSET ?",
            JOB_COLUMNS, where_clause
        ))?;
        let jobs = stmt
            .query_map(params_from_iter(params), row_to_job)?
            .collect::<Result<Vec<_>, _>>()?;
        Ok(jobs)
    }

    fn create_job(&self, new_job: NewJobPosting) -> Result<JobPosting> {
        let conn = self.write_conn.lock().unwrap();
        insert_job(&conn, &new_job)
    }

    fn create_jobs(&self, new_jobs: Vec<NewJobPosting>) -> Result<Vec<JobPosting>> {
        let mut conn = self.write_conn.lock().unwrap();
        let tx = conn.transaction()?;
        let mut created = Vec::with_capacity(new_jobs.len());
        for new_job in &new_jobs {
            created.push(insert_job(&tx, new_job)?);
        }
        tx.commit()?;
        Ok(created)
    }
}
