//! Post-deployment smoke check: the named table must exist and hold at
//! least one row.
//!
//! Linear pipeline, no retries: load env, connect, count, evaluate. Any
//! failure at any stage aborts the run. The connection lives for the scope
//! of one check and is dropped on every exit path.

use serde::Serialize;

use crate::warehouse::{ConnectionConfig, StatementExec, WarehouseClient};
use crate::{env, Result};

#[derive(Debug, Clone)]
pub struct SmokeTarget {
    pub table: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SmokeOutput {
    pub table: String,
    pub row_count: u64,
    pub passed: bool,
}

/// Reads connection parameters and the target table through the lookup seam.
/// Aborts before any network call when a variable is absent or empty.
pub fn load_config(
    lookup: impl Fn(&str) -> Option<String>,
) -> Result<(ConnectionConfig, SmokeTarget)> {
    let host = env::required_var(&lookup, env::HOST_VAR)?;
    let token = env::required_var(&lookup, env::TOKEN_VAR)?;
    let warehouse_id = env::required_var(&lookup, env::WAREHOUSE_ID_VAR)?;
    let table = env::required_var(&lookup, env::TABLE_VAR)?;

    Ok((
        ConnectionConfig {
            host,
            token,
            warehouse_id,
        },
        SmokeTarget { table },
    ))
}

/// Runs the count query and evaluates the result. `passed` is true only when
/// the table resolved without error and holds at least one row; a zero-row
/// table is a valid result reported as a failure, not an error.
pub fn check(exec: &dyn StatementExec, target: &SmokeTarget) -> Result<(SmokeOutput, i32)> {
    let row_count = exec.count_rows(&target.table)?;
    let passed = row_count >= 1;

    Ok((
        SmokeOutput {
            table: target.table.clone(),
            row_count,
            passed,
        },
        if passed { 0 } else { 1 },
    ))
}

/// The full pipeline against the process environment and a live warehouse.
pub fn run() -> Result<(SmokeOutput, i32)> {
    let (config, target) = load_config(env::process_env)?;

    log_status!("smoke", "Connecting to {}", config.host);
    let client = WarehouseClient::connect(&config)?;

    log_status!("smoke", "Checking table {}", target.table);
    let result = check(&client, &target);

    if let Ok((ref output, _)) = result {
        log_status!(
            "smoke",
            "{}: {} rows ({})",
            output.table,
            output.row_count,
            if output.passed { "pass" } else { "fail" }
        );
    }

    result
}
