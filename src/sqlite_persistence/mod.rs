mod versioned_schema;

pub use versioned_schema::{
    migrate_if_needed, Column, SqlType, Table, VersionedSchema, BASE_DB_VERSION, DEFAULT_TIMESTAMP,
};
