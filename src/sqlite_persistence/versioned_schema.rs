use anyhow::{bail, Result};
use rusqlite::{params, Connection};
use tracing::info;

pub const DEFAULT_TIMESTAMP: &str = "(cast(strftime('%s','now') as int))";

/// Schema versions are stored in `PRAGMA user_version` offset by this base,
/// so that a database created by an unrelated tool (user_version 0) is not
/// mistaken for one of ours.
pub const BASE_DB_VERSION: usize = 77000;

#[macro_export]
macro_rules! sqlite_column {
    ($name:expr, $sql_type:expr $(, $field:ident = $value:expr)*) => {
        {
            #[allow(unused_mut)]
            let mut column = Column {
                name: $name,
                sql_type: $sql_type,
                is_primary_key: false,
                non_null: false,
                is_unique: false,
                default_value: None,
            };
            $(
                column.$field = $value;
            )*
            column
        }
    };
}

#[derive(Debug, PartialEq, Eq)]
pub enum SqlType {
    Text,
    Integer,
    Real,
}

impl SqlType {
    fn sql(&self) -> &'static str {
        match self {
            SqlType::Text => "TEXT",
            SqlType::Integer => "INTEGER",
            SqlType::Real => "REAL",
        }
    }
}

pub struct Column<'a, S: AsRef<str>> {
    pub name: S,
    pub sql_type: &'a SqlType,
    pub is_primary_key: bool,
    pub non_null: bool,
    pub is_unique: bool,
    pub default_value: Option<S>,
}

pub struct Table {
    pub name: &'static str,
    pub columns: &'static [Column<'static, &'static str>],
    pub indices: &'static [(&'static str, &'static str)],
}

impl Table {
    pub fn create(&self, conn: &Connection) -> Result<()> {
        let mut create_sql = format!("CREATE TABLE {} (", self.name);
        for (column_index, column) in self.columns.iter().enumerate() {
            if column_index > 0 {
                create_sql.push_str(", ");
            }
            create_sql.push_str(&format!("{} {}", column.name, column.sql_type.sql()));
            if column.is_primary_key {
                create_sql.push_str(" PRIMARY KEY");
            }
            if column.non_null {
                create_sql.push_str(" NOT NULL");
            }
            if column.is_unique {
                create_sql.push_str(" UNIQUE");
            }
            if let Some(default_value) = column.default_value {
                create_sql.push_str(&format!(" DEFAULT {}", default_value));
            }
        }
        create_sql.push_str(");");
        conn.execute(&create_sql, params![])?;

        for (index_name, column_name) in self.indices {
            conn.execute(
                &format!(
                    "CREATE INDEX {} ON {}({});",
                    index_name, self.name, column_name
                ),
                params![],
            )?;
        }
        Ok(())
    }
}

pub struct VersionedSchema {
    pub version: usize,
    pub tables: &'static [Table],
    pub migration: Option<fn(&Connection) -> Result<()>>,
}

impl VersionedSchema {
    pub fn create(&self, conn: &Connection) -> Result<()> {
        conn.execute("PRAGMA foreign_keys = ON;", params![])?;
        for table in self.tables {
            table.create(conn)?;
        }
        conn.execute(
            &format!("PRAGMA user_version = {}", BASE_DB_VERSION + self.version),
            [],
        )?;
        Ok(())
    }

    /// Check that every expected table and column is present. This is a
    /// sanity check for databases opened from disk, not a full structural
    /// diff.
    pub fn validate(&self, conn: &Connection) -> Result<()> {
        for table in self.tables {
            let mut stmt = conn.prepare(&format!("PRAGMA table_info({});", table.name))?;
            let actual_columns: Vec<String> = stmt
                .query_map(params![], |row| row.get::<_, String>(1))?
                .collect::<Result<_, _>>()?;

            if actual_columns.len() != table.columns.len() {
                bail!(
                    "Table {} has {} columns, expected {}",
                    table.name,
                    actual_columns.len(),
                    table.columns.len()
                );
            }
            for (actual, expected) in actual_columns.iter().zip(table.columns.iter()) {
                if actual != expected.name {
                    bail!(
                        "Table {} column mismatch: expected {}, got {}",
                        table.name,
                        expected.name,
                        actual
                    );
                }
            }
        }
        Ok(())
    }
}

/// Bring a database up to the latest schema version, creating the schema
/// from scratch on an empty database.
pub fn migrate_if_needed(conn: &mut Connection, schemas: &[VersionedSchema]) -> Result<()> {
    let db_version: i64 = conn.query_row("PRAGMA user_version", [], |r| r.get(0))?;

    let latest_version = schemas.len() - 1;
    let latest_schema = &schemas[latest_version];

    let table_count: i64 = conn
        .query_row(
            "SELECT COUNT(*) FROM sqlite_master WHERE type='table' AND name NOT LIKE 'sqlite_%'",
            [],
            |r| r.get(0),
        )
        .unwrap_or(0);

    if table_count == 0 {
        info!("Creating db schema at version {}", latest_version);
        latest_schema.create(conn)?;
        return Ok(());
    }

    if db_version < BASE_DB_VERSION as i64 {
        bail!(
            "Database has tables but no recognized schema version (user_version = {})",
            db_version
        );
    }

    let mut current_version = (db_version - BASE_DB_VERSION as i64) as usize;
    if current_version >= latest_version {
        latest_schema.validate(conn)?;
        return Ok(());
    }

    let tx = conn.transaction()?;
    for schema in schemas.iter().skip(current_version + 1) {
        if let Some(migration_fn) = schema.migration {
            info!(
                "Migrating db from version {} to {}",
                current_version, schema.version
            );
            migration_fn(&tx)?;
            current_version = schema.version;
        }
    }
    tx.pragma_update(None, "user_version", BASE_DB_VERSION + current_version)?;
    tx.commit()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    const TEST_TABLE: Table = Table {
        name: "test_table",
        columns: &[
            Column {
                name: "id",
                sql_type: &SqlType::Integer,
                is_primary_key: true,
                non_null: false,
                is_unique: false,
                default_value: None,
            },
            Column {
                name: "name",
                sql_type: &SqlType::Text,
                is_primary_key: false,
                non_null: true,
                is_unique: false,
                default_value: None,
            },
        ],
        indices: &[("idx_test_name", "name")],
    };

    const TEST_SCHEMAS: &[VersionedSchema] = &[VersionedSchema {
        version: 0,
        tables: &[TEST_TABLE],
        migration: None,
    }];

    #[test]
    fn creates_schema_on_empty_database() {
        let mut conn = Connection::open_in_memory().unwrap();
        migrate_if_needed(&mut conn, TEST_SCHEMAS).unwrap();

        conn.execute("INSERT INTO test_table (name) VALUES ('x')", [])
            .unwrap();
        let version: i64 = conn
            .query_row("PRAGMA user_version", [], |r| r.get(0))
            .unwrap();
        assert_eq!(version, BASE_DB_VERSION as i64);
    }

    #[test]
    fn migrate_is_idempotent() {
        let mut conn = Connection::open_in_memory().unwrap();
        migrate_if_needed(&mut conn, TEST_SCHEMAS).unwrap();
        migrate_if_needed(&mut conn, TEST_SCHEMAS).unwrap();
    }

    #[test]
    fn rejects_foreign_database() {
        let mut conn = Connection::open_in_memory().unwrap();
        conn.execute("CREATE TABLE something_else (id INTEGER)", [])
            .unwrap();
        assert!(migrate_if_needed(&mut conn, TEST_SCHEMAS).is_err());
    }

    #[test]
    fn validate_detects_missing_column() {
        let conn = Connection::open_in_memory().unwrap();
        conn.execute("CREATE TABLE test_table (id INTEGER PRIMARY KEY)", [])
            .unwrap();
        assert!(TEST_SCHEMAS[0].validate(&conn).is_err());
    }
}
