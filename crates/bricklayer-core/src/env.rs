//! Environment variable loading for the smoke check.
//!
//! The variable names are the external contract supplied by the invoking CI
//! step and the bundle deployment. Loading happens before any network call;
//! an absent or empty variable aborts the run.

use crate::{Error, Result};

pub const HOST_VAR: &str = "DATABRICKS_HOST";
pub const TOKEN_VAR: &str = "DATABRICKS_TOKEN";
pub const WAREHOUSE_ID_VAR: &str = "DATABRICKS_WAREHOUSE_ID";
pub const TABLE_VAR: &str = "SMOKE_TEST_TABLE_NAME";

/// All variables the smoke check consumes, in the order they are checked.
pub const REQUIRED_VARS: &[&str] = &[HOST_VAR, TOKEN_VAR, WAREHOUSE_ID_VAR, TABLE_VAR];

/// Reads a required variable through a lookup seam. An empty value counts as
/// missing.
pub fn required_var(lookup: impl Fn(&str) -> Option<String>, name: &str) -> Result<String> {
    match lookup(name) {
        Some(value) if !value.trim().is_empty() => Ok(value),
        _ => Err(Error::config_missing_var(name)),
    }
}

/// Lookup backed by the process environment.
pub fn process_env(name: &str) -> Option<String> {
    std::env::var(name).ok()
}
