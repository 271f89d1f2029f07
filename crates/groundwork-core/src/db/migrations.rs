//! Database schema initialization and migrations.

use crate::error::{DatabaseResultExt, GroundworkError, Result};

impl super::Database {
    /// Initializes the database schema using the embedded SQL file.
    pub(super) fn initialize_schema(&self) -> Result<()> {
        // Enable foreign keys for this connection
        self.connection
            .execute("PRAGMA foreign_keys = ON", [])
            .db_context("Failed to enable foreign keys")?;

        // Execute the schema SQL
        let schema_sql = include_str!("../../assets/schema.sql");
        self.connection
            .execute_batch(schema_sql)
            .db_context("Failed to initialize database schema")?;

        // Apply migrations for existing databases
        self.apply_migrations()?;

        Ok(())
    }

    /// Apply database migrations for existing databases
    fn apply_migrations(&self) -> Result<()> {
        // Check if source_url column exists in build_plans table
        let has_source_url: bool = self
            .connection
            .query_row(
                "SELECT COUNT(*) FROM pragma_table_info('build_plans') WHERE name = 'source_url'",
                [],
                |row| row.get(0),
            )
            .map(|count: i64| count > 0)
            .unwrap_or(false);

        // Add source_url column if it doesn't exist
        if !has_source_url {
            self.connection
                .execute("ALTER TABLE build_plans ADD COLUMN source_url TEXT", [])
                .map_err(|e| {
                    GroundworkError::database_error(
                        "Failed to add source_url column to build_plans table",
                        e,
                    )
                })?;
        }

        Ok(())
    }
}
