use super::{Artifact, ArtifactKind, PipelineSpec};
use crate::template::{self, TemplateVars};

pub const RELATIVE_PATH: &str = "field_mapping.md";

const TEMPLATE: &str = r#"# Field Mapping: {{pipelineName}}

Target workspace: {{workspaceHost}}
Validated table: `{{smokeTable}}`

| Source Field | Target Field | Type | Notes |
| --- | --- | --- | --- |
{{mappingRows}}
"#;

fn escape_cell(value: &str) -> String {
    value.replace('|', "\\|")
}

pub fn render(spec: &PipelineSpec) -> Artifact {
    let rows: String = if spec.mappings.is_empty() {
        "| _none defined_ | | | |\n".to_string()
    } else {
        spec.mappings
            .iter()
            .map(|m| {
                format!(
                    "| {} | {} | {} | {} |\n",
                    escape_cell(&m.source),
                    escape_cell(&m.target),
                    escape_cell(&m.data_type),
                    escape_cell(m.notes.as_deref().unwrap_or("")),
                )
            })
            .collect()
    };

    let mut vars = spec.template_vars();
    vars.push((TemplateVars::MAPPING_ROWS, rows.trim_end()));

    Artifact {
        relative_path: RELATIVE_PATH.to_string(),
        kind: ArtifactKind::Mapping,
        contents: template::render(TEMPLATE, &vars),
    }
}
