use std::collections::HashMap;

pub struct TemplateVars;

impl TemplateVars {
    pub const PIPELINE_NAME: &'static str = "pipelineName";
    pub const WORKSPACE_HOST: &'static str = "workspaceHost";
    pub const WAREHOUSE_ID: &'static str = "warehouseId";
    pub const SMOKE_TABLE: &'static str = "smokeTable";
    pub const BRANCH: &'static str = "branch";
    pub const MAPPING_ROWS: &'static str = "mappingRows";
}

pub fn render(template: &str, variables: &[(&str, &str)]) -> String {
    let mut result = template.to_string();

    for (key, value) in variables {
        let placeholder = format!("{{{{{}}}}}", key);
        result = result.replace(&placeholder, value);
    }

    result
}

pub fn render_map(template: &str, variables: &HashMap<String, String>) -> String {
    let mut result = template.to_string();

    for (key, value) in variables {
        let placeholder = format!("{{{{{}}}}}", key);
        result = result.replace(&placeholder, value);
    }

    result
}

pub fn is_present(template: &str, key: &str) -> bool {
    let placeholder = format!("{{{{{}}}}}", key);
    template.contains(&placeholder)
}

/// Placeholders still present after rendering. Used to warn about template
/// variables a pipeline spec never filled in.
pub fn unresolved(rendered: &str) -> Vec<String> {
    let re = regex::Regex::new(r"\{\{(\w+)\}\}").unwrap();
    let mut names: Vec<String> = re
        .captures_iter(rendered)
        .map(|cap| cap[1].to_string())
        .collect();
    names.sort();
    names.dedup();
    names
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn render_replaces_all_occurrences() {
        let out = render(
            "host={{workspaceHost}} again={{workspaceHost}}",
            &[(TemplateVars::WORKSPACE_HOST, "https://wh.example.com")],
        );
        assert_eq!(
            out,
            "host=https://wh.example.com again=https://wh.example.com"
        );
    }

    #[test]
    fn unresolved_reports_leftover_placeholders_once() {
        let rendered = render(
            "{{pipelineName}} {{branch}} {{branch}}",
            &[(TemplateVars::PIPELINE_NAME, "sales-ingest")],
        );
        assert_eq!(unresolved(&rendered), vec!["branch".to_string()]);
    }

    #[test]
    fn is_present_detects_placeholder() {
        assert!(is_present("table: {{smokeTable}}", TemplateVars::SMOKE_TABLE));
        assert!(!is_present("table: {{smokeTable}}", TemplateVars::BRANCH));
    }
}
