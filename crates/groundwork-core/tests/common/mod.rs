use groundwork_core::WorkbenchBuilder;
use tempfile::TempDir;

/// Helper function to create a test workbench backed by a scratch database
pub async fn create_test_workbench() -> (TempDir, groundwork_core::Workbench) {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let db_path = temp_dir.path().join("test.db");
    let workbench = WorkbenchBuilder::new()
        .with_database_path(Some(&db_path))
        .build()
        .await
        .expect("Failed to create workbench");
    (temp_dir, workbench)
}
