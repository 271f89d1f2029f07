//! Error handling utilities for the MCP server

use groundwork_core::GroundworkError;
use rmcp::ErrorData;

/// Helper to convert groundwork errors to MCP errors
pub fn to_mcp_error(message: &str, error: &GroundworkError) -> ErrorData {
    ErrorData::internal_error(format!("{message}: {error}"), None)
}
