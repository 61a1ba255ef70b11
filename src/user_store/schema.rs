use crate::sqlite_column;
use crate::sqlite_persistence::{Column, SqlType, Table, VersionedSchema, DEFAULT_TIMESTAMP};

/// V 0
const USERS_TABLE_V_0: Table = Table {
    name: "users",
    columns: &[
        sqlite_column!(
            "id",
            &SqlType::Integer,
            is_primary_key = true,
            is_unique = true
        ),
        sqlite_column!("uid", &SqlType::Text, non_null = true, is_unique = true),
        sqlite_column!("email", &SqlType::Text, non_null = true),
        sqlite_column!("name", &SqlType::Text),
        sqlite_column!("designation", &SqlType::Text),
        sqlite_column!("linked_in", &SqlType::Text),
        sqlite_column!("github", &SqlType::Text),
        sqlite_column!("experience_years", &SqlType::Integer),
        sqlite_column!("resume_url", &SqlType::Text),
        sqlite_column!("skills", &SqlType::Text, non_null = true, default_value = Some("'[]'")),
        sqlite_column!("profile_image", &SqlType::Text),
        sqlite_column!("auth_provider", &SqlType::Text, non_null = true),
        sqlite_column!(
            "created",
            &SqlType::Integer,
            non_null = true,
            default_value = Some(DEFAULT_TIMESTAMP)
        ),
    ],
    indices: &[("idx_users_uid", "uid")],
};

pub const USER_VERSIONED_SCHEMAS: &[VersionedSchema] = &[VersionedSchema {
    version: 0,
    tables: &[USERS_TABLE_V_0],
    migration: None,
}];
