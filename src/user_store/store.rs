//! SQLite-backed user profile store.

use super::models::{AuthProvider, NewUserProfile, UserProfile, UserUpdate};
use super::schema::USER_VERSIONED_SCHEMAS;
use super::trait_def::UserStore;
use crate::sqlite_persistence::migrate_if_needed;
use anyhow::{Context, Result};
use rusqlite::types::Value;
use rusqlite::{params, params_from_iter, Connection, OptionalExtension, Row};
use std::path::Path;
use std::sync::{Arc, Mutex};
use tracing::info;

const USER_COLUMNS: &str = "id, uid, email, name, designation, linked_in, github, \
     experience_years, resume_url, skills, profile_image, auth_provider, created";

#[derive(Clone)]
pub struct SqliteUserStore {
    conn: Arc<Mutex<Connection>>,
}

fn row_to_user(row: &Row) -> rusqlite::Result<UserProfile> {
    let skills_json: String = row.get("skills")?;
    let skills: Vec<String> = serde_json::from_str(&skills_json).unwrap_or_default();

    let provider_s: String = row.get("auth_provider")?;
    let auth_provider = AuthProvider::from_str(&provider_s).ok_or_else(|| {
        rusqlite::Error::FromSqlConversionFailure(
            11,
            rusqlite::types::Type::Text,
            format!("unrecognized auth provider {:?}", provider_s).into(),
        )
    })?;

    Ok(UserProfile {
        id: row.get("id")?,
        uid: row.get("uid")?,
        email: row.get("email")?,
        name: row.get("name")?,
        designation: row.get("designation")?,
        linked_in: row.get("linked_in")?,
        github: row.get("github")?,
        experience_years: row.get("experience_years")?,
        resume_url: row.get("resume_url")?,
        skills,
        profile_image: row.get("profile_image")?,
        auth_provider,
        created: row.get("created")?,
    })
}

fn get_user_by_uid(conn: &Connection, uid: &str) -> Result<Option<UserProfile>> {
    let user = conn
        .query_row(
            &format!("SELECT {} FROM users WHERE uid = ?1", USER_COLUMNS),
            params![uid],
            row_to_user,
        )
        .optional()?;
    Ok(user)
}

impl SqliteUserStore {
    pub fn new<P: AsRef<Path>>(db_path: P) -> Result<Self> {
        let mut conn = Connection::open(db_path.as_ref()).context("Failed to open users database")?;
        migrate_if_needed(&mut conn, USER_VERSIONED_SCHEMAS)?;
        conn.pragma_update(None, "journal_mode", "WAL")?;

        let user_count: i64 = conn
            .query_row("SELECT COUNT(*) FROM users", [], |r| r.get(0))
            .unwrap_or(0);
        info!("Opened users database: {} profiles", user_count);

        Ok(SqliteUserStore {
            conn: Arc::new(Mutex::new(conn)),
        })
    }
}

impl UserStore for SqliteUserStore {
    fn get_user(&self, uid: &str) -> Result<Option<UserProfile>> {
        let conn = self.conn.lock().unwrap();
        get_user_by_uid(&conn, uid)
    }

    fn create_user(&self, new_user: NewUserProfile) -> Result<UserProfile> {
        let conn = self.conn.lock().unwrap();
        if let Some(existing) = get_user_by_uid(&conn, &new_user.uid)? {
            return Ok(existing);
        }
        conn.execute(
            "INSERT INTO users (uid, email, name, profile_image, auth_provider) \
             VALUES (?1, ?2, ?3, ?4, ?5)",
            params![
                new_user.uid,
                new_user.email,
                new_user.name,
                new_user.profile_image,
                new_user.auth_provider.as_str(),
            ],
        )?;
        get_user_by_uid(&conn, &new_user.uid)?
            .context("user row missing right after insert")
    }

    fn update_user(&self, uid: &str, update: UserUpdate) -> Result<Option<UserProfile>> {
        let conn = self.conn.lock().unwrap();
        if update.is_empty() {
            return get_user_by_uid(&conn, uid);
        }

        let mut assignments: Vec<&'static str> = Vec::new();
        let mut values: Vec<Value> = Vec::new();

        let mut push_text = |column: &'static str, value: Option<String>| {
            if let Some(v) = value {
                assignments.push(column);
                values.push(Value::Text(v));
            }
        };
        push_text("name = ?", update.name);
        push_text("designation = ?", update.designation);
        push_text("email = ?", update.email);
        push_text("linked_in = ?", update.linked_in);
        push_text("github = ?", update.github);
        push_text("resume_url = ?", update.resume_url);
        push_text("profile_image = ?", update.profile_image);
        if let Some(years) = update.experience_years {
            assignments.push("experience_years = ?");
            values.push(Value::Integer(years as i64));
        }
        if let Some(skills) = update.skills {
            assignments.push("skills = ?");
            values.push(Value::Text(serde_json::to_string(&skills)?));
        }

        values.push(Value::Text(uid.to_string()));
        let changed = conn.execute(
            &format!(
                "UPDATE users SET {} WHERE uid = ?",
                assignments.join(", ")
            ),
            params_from_iter(values),
        )?;
        if changed == 0 {
            return Ok(None);
        }
        get_user_by_uid(&conn, uid)
    }
}
