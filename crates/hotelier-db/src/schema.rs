//! Schema definitions and migration runner for SurrealDB.
//!
//! The hotel table is SCHEMAFULL. Embedded values are nested objects
//! with typed sub-fields; UUIDs are stored as strings and enum labels as
//! lower-case strings guarded by ASSERT.

use surrealdb::{Connection, Surreal};
use surrealdb_types::SurrealValue;
use tracing::{debug, info};

use crate::error::DbError;

// -----------------------------------------------------------------------
// Migration tracking
// -----------------------------------------------------------------------

const MIGRATION_TABLE_DDL: &str = "\
DEFINE TABLE IF NOT EXISTS _migration SCHEMAFULL;
DEFINE FIELD IF NOT EXISTS version ON TABLE _migration TYPE int;
DEFINE FIELD IF NOT EXISTS name ON TABLE _migration TYPE string;
DEFINE FIELD IF NOT EXISTS applied_at ON TABLE _migration TYPE datetime \
    DEFAULT time::now();
DEFINE INDEX IF NOT EXISTS idx_migration_version ON TABLE _migration \
    COLUMNS version UNIQUE;
";

#[derive(Debug, SurrealValue)]
struct AppliedVersion {
    version: u32,
}

struct Migration {
    version: u32,
    name: &'static str,
    sql: &'static str,
}

static MIGRATIONS: &[Migration] = &[
    Migration {
        version: 1,
        name: "hotel_table",
        sql: SCHEMA_V1,
    },
    Migration {
        version: 2,
        name: "hotel_lookup_indexes",
        sql: SCHEMA_V2,
    },
];

// -----------------------------------------------------------------------
// v1: hotel records
// -----------------------------------------------------------------------

const SCHEMA_V1: &str = "\
DEFINE TABLE hotel SCHEMAFULL;
DEFINE FIELD name ON TABLE hotel TYPE string;

DEFINE FIELD address ON TABLE hotel TYPE object;
DEFINE FIELD address.street ON TABLE hotel TYPE string;
DEFINE FIELD address.city ON TABLE hotel TYPE string;
DEFINE FIELD address.state ON TABLE hotel TYPE string;
DEFINE FIELD address.zip_code ON TABLE hotel TYPE string;
DEFINE FIELD address.country ON TABLE hotel TYPE string;

DEFINE FIELD contact_info ON TABLE hotel TYPE object;
DEFINE FIELD contact_info.phone ON TABLE hotel TYPE string;
DEFINE FIELD contact_info.email ON TABLE hotel TYPE string;
DEFINE FIELD contact_info.website ON TABLE hotel TYPE string;

-- owner.user_id references the identity subsystem; no cascade.
DEFINE FIELD owner ON TABLE hotel TYPE object;
DEFINE FIELD owner.user_id ON TABLE hotel TYPE string;
DEFINE FIELD owner.name ON TABLE hotel TYPE string;
DEFINE FIELD owner.email ON TABLE hotel TYPE string;
DEFINE FIELD owner.phone ON TABLE hotel TYPE string;

DEFINE FIELD subscription ON TABLE hotel TYPE object;
DEFINE FIELD subscription.plan ON TABLE hotel TYPE string \
    DEFAULT 'basic' \
    ASSERT $value IN ['basic', 'standard', 'premium'];
DEFINE FIELD subscription.start_date ON TABLE hotel TYPE datetime;
DEFINE FIELD subscription.end_date ON TABLE hotel TYPE datetime;
DEFINE FIELD subscription.status ON TABLE hotel TYPE string \
    DEFAULT 'trial' \
    ASSERT $value IN ['active', 'expired', 'trial'];

DEFINE FIELD created_at ON TABLE hotel TYPE datetime \
    DEFAULT time::now();
DEFINE FIELD updated_at ON TABLE hotel TYPE datetime \
    DEFAULT time::now();
";

// -----------------------------------------------------------------------
// v2: secondary indexes
// -----------------------------------------------------------------------

const SCHEMA_V2: &str = "\
DEFINE INDEX idx_hotel_name ON TABLE hotel COLUMNS name;
DEFINE INDEX idx_hotel_owner ON TABLE hotel COLUMNS owner.user_id;
DEFINE INDEX idx_hotel_subscription_status ON TABLE hotel \
    COLUMNS subscription.status;
DEFINE INDEX idx_hotel_city_state ON TABLE hotel \
    COLUMNS address.city, address.state;
";

// -----------------------------------------------------------------------
// Public API
// -----------------------------------------------------------------------

/// Run all pending migrations against the given SurrealDB client.
///
/// Creates the `_migration` tracking table on first run, then applies
/// each migration whose version exceeds the highest one recorded.
pub async fn run_migrations<C: Connection>(db: &Surreal<C>) -> Result<(), DbError> {
    db.query(MIGRATION_TABLE_DDL)
        .await?
        .check()
        .map_err(|e| DbError::Migration(e.to_string()))?;

    let mut result = db
        .query("SELECT version FROM _migration ORDER BY version DESC LIMIT 1")
        .await?;
    let applied: Vec<AppliedVersion> = result.take(0)?;
    let current_version = applied.first().map_or(0, |m| m.version);
    debug!(current_version, "Schema version");

    for migration in MIGRATIONS.iter().filter(|m| m.version > current_version) {
        info!(
            version = migration.version,
            name = migration.name,
            "Applying migration"
        );
        db.query(migration.sql).await?.check().map_err(|e| {
            DbError::Migration(format!(
                "v{} '{}' failed: {e}",
                migration.version, migration.name,
            ))
        })?;

        db.query("CREATE _migration SET version = $version, name = $name")
            .bind(("version", migration.version))
            .bind(("name", migration.name))
            .await?
            .check()
            .map_err(|e| {
                DbError::Migration(format!(
                    "could not record v{}: {e}",
                    migration.version
                ))
            })?;
    }

    Ok(())
}

/// The full DDL of every migration, in order.
///
/// Lets tests load the schema into a fresh in-memory instance without
/// going through the tracking table.
pub fn schema_ddl() -> String {
    MIGRATIONS.iter().map(|m| m.sql).collect::<Vec<_>>().join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn migrations_are_ordered() {
        for window in MIGRATIONS.windows(2) {
            assert!(
                window[0].version < window[1].version,
                "Migrations must be in ascending version order"
            );
        }
    }

    #[test]
    fn every_declared_lookup_has_an_index() {
        for columns in [
            "COLUMNS name;",
            "COLUMNS owner.user_id;",
            "COLUMNS subscription.status;",
            "COLUMNS address.city, address.state;",
        ] {
            assert!(SCHEMA_V2.contains(columns), "missing index on {columns}");
        }
    }

    #[test]
    fn enum_fields_are_constrained() {
        assert!(SCHEMA_V1.contains("['basic', 'standard', 'premium']"));
        assert!(SCHEMA_V1.contains("['active', 'expired', 'trial']"));
    }
}
