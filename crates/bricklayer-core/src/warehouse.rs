//! Blocking client for the warehouse statement-execution API.
//!
//! One connection per process, single attempt, no retry. Transient failures
//! are surfaced, not masked: this backs a gating check, not a resilient
//! client.

use crate::{Error, Result};
use reqwest::blocking::Client;
use serde_json::{json, Value};

/// Connection parameters sourced from the environment. Never persisted.
#[derive(Debug, Clone)]
pub struct ConnectionConfig {
    pub host: String,
    pub token: String,
    pub warehouse_id: String,
}

/// Seam for the count query so the smoke pipeline is testable without a
/// live warehouse.
pub trait StatementExec {
    fn count_rows(&self, table: &str) -> Result<u64>;
}

/// How long the statement-execution API waits server-side before returning.
const WAIT_TIMEOUT: &str = "30s";

pub struct WarehouseClient {
    client: Client,
    host: String,
    token: String,
    warehouse_id: String,
}

impl WarehouseClient {
    /// Establishes a session: builds the client and verifies host and
    /// credential with an identity call. Fails on the first error.
    pub fn connect(config: &ConnectionConfig) -> Result<Self> {
        let host = config.host.trim_end_matches('/').to_string();

        let warehouse = Self {
            client: Client::new(),
            host,
            token: config.token.clone(),
            warehouse_id: config.warehouse_id.clone(),
        };

        warehouse.verify_identity()?;
        Ok(warehouse)
    }

    fn verify_identity(&self) -> Result<()> {
        let url = format!("{}/api/2.0/preview/scim/v2/Me", self.host);
        let response = self
            .client
            .get(&url)
            .bearer_auth(&self.token)
            .send()
            .map_err(|e| Error::warehouse_connect_failed(&self.host, e.to_string()))?;

        let status = response.status();
        if status.as_u16() == 401 || status.as_u16() == 403 {
            return Err(Error::warehouse_auth_failed(&self.host, status.as_u16()));
        }
        if !status.is_success() {
            let body = response.text().unwrap_or_default();
            return Err(Error::warehouse_connect_failed(
                &self.host,
                format!("Identity check returned HTTP {}: {}", status.as_u16(), body),
            ));
        }

        Ok(())
    }

    fn execute_statement(&self, statement: &str) -> Result<Value> {
        let url = format!("{}/api/2.0/sql/statements", self.host);
        let body = json!({
            "warehouse_id": self.warehouse_id,
            "statement": statement,
            "wait_timeout": WAIT_TIMEOUT,
        });

        let response = self
            .client
            .post(&url)
            .bearer_auth(&self.token)
            .json(&body)
            .send()
            .map_err(|e| Error::warehouse_connect_failed(&self.host, e.to_string()))?;

        let status = response.status();
        if status.as_u16() == 401 || status.as_u16() == 403 {
            return Err(Error::warehouse_auth_failed(&self.host, status.as_u16()));
        }

        let text = response
            .text()
            .map_err(|e| Error::warehouse_connect_failed(&self.host, e.to_string()))?;

        if !status.is_success() {
            return Err(Error::warehouse_query_failed(
                &self.warehouse_id,
                None,
                format!("HTTP {}: {}", status.as_u16(), text),
            ));
        }

        serde_json::from_str(&text).map_err(|e| {
            Error::internal_json(e.to_string(), Some("parse statement response".to_string()))
        })
    }
}

impl StatementExec for WarehouseClient {
    fn count_rows(&self, table: &str) -> Result<u64> {
        validate_table_identifier(table)?;

        let statement = format!("SELECT COUNT(*) AS row_count FROM {}", table);
        let response = self.execute_statement(&statement)?;
        parse_count_response(&self.warehouse_id, table, &response)
    }
}

/// Table names are spliced into the statement, so only qualified-identifier
/// characters are allowed through.
pub fn validate_table_identifier(table: &str) -> Result<()> {
    let re = regex::Regex::new(r"^[A-Za-z0-9_.]+$").unwrap();
    if !re.is_match(table) {
        return Err(Error::config_invalid_value(
            "table",
            Some(table.to_string()),
            "Table name may only contain letters, digits, underscores, and dots",
        ));
    }
    Ok(())
}

/// Classifies a statement-execution response into a row count or an error.
///
/// A missing table surfaces as a FAILED state whose error payload names
/// TABLE_OR_VIEW_NOT_FOUND; an empty table is a SUCCEEDED state with a zero
/// count. The two are never conflated.
pub fn parse_count_response(warehouse_id: &str, table: &str, response: &Value) -> Result<u64> {
    let state = response
        .pointer("/status/state")
        .and_then(Value::as_str)
        .unwrap_or("UNKNOWN");

    if state != "SUCCEEDED" {
        let error_code = response
            .pointer("/status/error/error_code")
            .and_then(Value::as_str)
            .unwrap_or("");
        let message = response
            .pointer("/status/error/message")
            .and_then(Value::as_str)
            .unwrap_or("no error detail returned");

        if error_code.contains("TABLE_OR_VIEW_NOT_FOUND")
            || message.contains("TABLE_OR_VIEW_NOT_FOUND")
            || message.contains("Table or view not found")
        {
            return Err(Error::table_not_found(table, message));
        }

        return Err(Error::warehouse_query_failed(
            warehouse_id,
            Some(state.to_string()),
            message,
        ));
    }

    let cell = response
        .pointer("/result/data_array/0/0")
        .ok_or_else(|| {
            Error::warehouse_query_failed(
                warehouse_id,
                Some(state.to_string()),
                "Statement succeeded but returned no data",
            )
        })?;

    let count = match cell {
        Value::String(s) => s.parse::<u64>().ok(),
        Value::Number(n) => n.as_u64(),
        _ => None,
    };

    count.ok_or_else(|| {
        Error::warehouse_query_failed(
            warehouse_id,
            Some(state.to_string()),
            format!("Count cell is not a non-negative integer: {}", cell),
        )
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ErrorCode;

    #[test]
    fn succeeded_response_yields_count() {
        let response = serde_json::json!({
            "status": { "state": "SUCCEEDED" },
            "result": { "data_array": [["5"]] }
        });

        let count = parse_count_response("wh1", "sales.orders", &response).unwrap();
        assert_eq!(count, 5);
    }

    #[test]
    fn zero_count_is_a_result_not_an_error() {
        let response = serde_json::json!({
            "status": { "state": "SUCCEEDED" },
            "result": { "data_array": [["0"]] }
        });

        let count = parse_count_response("wh1", "sales.orders", &response).unwrap();
        assert_eq!(count, 0);
    }

    #[test]
    fn numeric_count_cell_is_accepted() {
        let response = serde_json::json!({
            "status": { "state": "SUCCEEDED" },
            "result": { "data_array": [[12]] }
        });

        let count = parse_count_response("wh1", "sales.orders", &response).unwrap();
        assert_eq!(count, 12);
    }

    #[test]
    fn missing_table_maps_to_table_not_found() {
        let response = serde_json::json!({
            "status": {
                "state": "FAILED",
                "error": {
                    "error_code": "TABLE_OR_VIEW_NOT_FOUND",
                    "message": "[TABLE_OR_VIEW_NOT_FOUND] The table or view `sales`.`missing_table` cannot be found."
                }
            }
        });

        let err = parse_count_response("wh1", "sales.missing_table", &response).unwrap_err();
        assert_eq!(err.code, ErrorCode::WarehouseTableNotFound);
        assert!(err.message.contains("sales.missing_table"));
    }

    #[test]
    fn other_failed_state_maps_to_query_failed() {
        let response = serde_json::json!({
            "status": {
                "state": "FAILED",
                "error": { "error_code": "RESOURCE_EXHAUSTED", "message": "Warehouse is starting" }
            }
        });

        let err = parse_count_response("wh1", "sales.orders", &response).unwrap_err();
        assert_eq!(err.code, ErrorCode::WarehouseQueryFailed);
    }

    #[test]
    fn succeeded_without_data_is_query_failed() {
        let response = serde_json::json!({
            "status": { "state": "SUCCEEDED" }
        });

        let err = parse_count_response("wh1", "sales.orders", &response).unwrap_err();
        assert_eq!(err.code, ErrorCode::WarehouseQueryFailed);
    }

    #[test]
    fn qualified_identifiers_pass_validation() {
        validate_table_identifier("main.sales.orders").unwrap();
        validate_table_identifier("orders_v2").unwrap();
    }

    #[test]
    fn identifier_with_injection_characters_is_rejected() {
        let err = validate_table_identifier("orders; DROP TABLE users").unwrap_err();
        assert_eq!(err.code, ErrorCode::ConfigInvalidValue);
    }
}
