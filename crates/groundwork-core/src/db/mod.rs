//! Database operations and SQLite management for stored build plans.
//!
//! This module provides the low-level persistence layer: SQLite connection
//! handling, schema management, and query interfaces for build plans and
//! their replay history. Workflows are stored as one JSON document per plan
//! row; all derived fields are recomputed by the engine before a row is
//! written, so a stored workflow is always internally consistent.

use std::path::Path;

use rusqlite::Connection;

use crate::error::{DatabaseResultExt, Result};

pub mod migrations;
pub mod plan_queries;

/// Database connection and operations handler.
pub struct Database {
    connection: Connection,
}

impl Database {
    /// Creates a new database connection and initializes the schema.
    pub fn new<P: AsRef<Path>>(path: P) -> Result<Self> {
        let connection = Connection::open(path).db_context("Failed to open database connection")?;

        let db = Self { connection };
        db.initialize_schema()?;
        Ok(db)
    }
}
