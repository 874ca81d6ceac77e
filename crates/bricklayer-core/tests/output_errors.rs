use bricklayer_core::output::{map_cmd_result_to_json, CliResponse};
use bricklayer_core::Error;

#[test]
fn table_not_found_serializes_code_and_details() {
    let err = Error::table_not_found(
        "sales.missing_table",
        "[TABLE_OR_VIEW_NOT_FOUND] The table or view cannot be found.",
    );

    let json = CliResponse::<()>::from_error(&err).to_json();

    assert!(json.contains("\"code\": \"warehouse.table_not_found\""));
    assert!(json.contains("sales.missing_table"));
    assert!(json.contains("TABLE_OR_VIEW_NOT_FOUND"));
}

#[test]
fn missing_configuration_maps_to_exit_code_1() {
    let err = Error::config_missing_var("DATABRICKS_TOKEN");

    let (_value, exit_code) = map_cmd_result_to_json::<serde_json::Value>(Err(err));

    assert_eq!(exit_code, 1);
}

#[test]
fn connect_failure_maps_to_exit_code_1() {
    let err = Error::warehouse_connect_failed("https://wh.example.com", "connection refused");

    let (_value, exit_code) = map_cmd_result_to_json::<serde_json::Value>(Err(err));

    assert_eq!(exit_code, 1);
}

#[test]
fn invalid_cli_argument_maps_to_exit_code_2() {
    let err = Error::validation_invalid_argument("spec", "Invalid spec '@'", None);

    let (_value, exit_code) = map_cmd_result_to_json::<serde_json::Value>(Err(err));

    assert_eq!(exit_code, 2);
}

#[test]
fn successful_command_keeps_its_exit_code() {
    let (result, exit_code) = map_cmd_result_to_json(Ok((
        serde_json::json!({ "passed": false, "rowCount": 0 }),
        vec![],
        1,
    )));

    assert!(result.is_ok());
    assert_eq!(exit_code, 1);
}

#[test]
fn auth_failure_carries_a_hint() {
    let err = Error::warehouse_auth_failed("https://wh.example.com", 401);

    let json = CliResponse::<()>::from_error(&err).to_json();

    assert!(json.contains("\"code\": \"warehouse.auth_failed\""));
    assert!(json.contains("hints"));
}
