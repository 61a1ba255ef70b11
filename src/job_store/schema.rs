use crate::sqlite_column;
use crate::sqlite_persistence::{Column, SqlType, Table, VersionedSchema, DEFAULT_TIMESTAMP};

/// V 0
const JOBS_TABLE_V_0: Table = Table {
    name: "jobs",
    columns: &[
        sqlite_column!(
            "id",
            &SqlType::Integer,
            is_primary_key = true,
            is_unique = true
        ),
        sqlite_column!("title", &SqlType::Text, non_null = true),
        sqlite_column!("company_name", &SqlType::Text, non_null = true),
        sqlite_column!("logo_img", &SqlType::Text),
        sqlite_column!("description", &SqlType::Text, non_null = true),
        sqlite_column!("salary", &SqlType::Text),
        sqlite_column!("salary_min", &SqlType::Integer),
        sqlite_column!("salary_max", &SqlType::Integer),
        sqlite_column!("location", &SqlType::Text),
        sqlite_column!("remote", &SqlType::Integer, non_null = true, default_value = Some("0")),
        sqlite_column!(
            "experience_required",
            &SqlType::Integer,
            non_null = true,
            default_value = Some("0")
        ),
        sqlite_column!("skills", &SqlType::Text, non_null = true, default_value = Some("'[]'")),
        sqlite_column!(
            "posted_at",
            &SqlType::Integer,
            non_null = true,
            default_value = Some(DEFAULT_TIMESTAMP)
        ),
        sqlite_column!("deadline", &SqlType::Integer),
        sqlite_column!("is_active", &SqlType::Integer, non_null = true, default_value = Some("1")),
        sqlite_column!(
            "job_type",
            &SqlType::Text,
            non_null = true,
            default_value = Some("'FULL_TIME'")
        ),
        sqlite_column!("domain", &SqlType::Text, non_null = true, default_value = Some("'OTHER'")),
    ],
    indices: &[
        ("idx_jobs_posted_at", "posted_at"),
        ("idx_jobs_domain", "domain"),
    ],
};

pub const JOB_VERSIONED_SCHEMAS: &[VersionedSchema] = &[VersionedSchema {
    version: 0,
    tables: &[JOBS_TABLE_V_0],
    migration: None,
}];
