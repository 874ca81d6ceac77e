//! Pipeline spec and the four static artifacts generated from it.
//!
//! Everything here is template substitution. The only invariant the
//! artifacts carry is syntactic: YAML artifacts must parse before they are
//! written anywhere.

mod bundle;
mod mapping;
mod script;
mod workflow;

use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::output::CliWarning;
use crate::{json, template, warehouse, Error, Result};

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FieldMapping {
    pub source: String,
    pub target: String,
    pub data_type: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PipelineSpec {
    pub name: String,
    pub workspace_host: String,
    pub warehouse_id: String,
    pub smoke_table: String,
    #[serde(default = "default_branch")]
    pub branch: String,
    #[serde(default)]
    pub mappings: Vec<FieldMapping>,
}

fn default_branch() -> String {
    "main".to_string()
}

impl PipelineSpec {
    pub fn from_json_str(raw: &str) -> Result<Self> {
        let spec: PipelineSpec = serde_json::from_str(raw)
            .map_err(|e| Error::validation_invalid_json(e, Some("parse pipeline spec".to_string())))?;
        spec.validate()?;
        Ok(spec)
    }

    pub fn validate(&self) -> Result<()> {
        if self.name.trim().is_empty() {
            return Err(Error::validation_invalid_argument(
                "name",
                "Pipeline name must not be empty",
                None,
            ));
        }

        if !self.workspace_host.starts_with("https://")
            && !self.workspace_host.starts_with("http://")
        {
            return Err(Error::validation_invalid_argument(
                "workspaceHost",
                "Workspace host must be an http(s) URL",
                Some(self.workspace_host.clone()),
            ));
        }

        if self.warehouse_id.trim().is_empty() {
            return Err(Error::validation_invalid_argument(
                "warehouseId",
                "Warehouse ID must not be empty",
                None,
            ));
        }

        warehouse::validate_table_identifier(&self.smoke_table)?;

        Ok(())
    }

    fn template_vars(&self) -> Vec<(&'static str, &str)> {
        vec![
            (template::TemplateVars::PIPELINE_NAME, self.name.as_str()),
            (
                template::TemplateVars::WORKSPACE_HOST,
                self.workspace_host.as_str(),
            ),
            (
                template::TemplateVars::WAREHOUSE_ID,
                self.warehouse_id.as_str(),
            ),
            (
                template::TemplateVars::SMOKE_TABLE,
                self.smoke_table.as_str(),
            ),
            (template::TemplateVars::BRANCH, self.branch.as_str()),
        ]
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum ArtifactKind {
    Workflow,
    Bundle,
    Mapping,
    Script,
}

impl ArtifactKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ArtifactKind::Workflow => "workflow",
            ArtifactKind::Bundle => "bundle",
            ArtifactKind::Mapping => "mapping",
            ArtifactKind::Script => "script",
        }
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Artifact {
    pub relative_path: String,
    pub kind: ArtifactKind,
    pub contents: String,
}

/// Renders all four artifacts. YAML artifacts that fail to parse abort
/// generation; nothing is written by this function.
pub fn generate_all(spec: &PipelineSpec) -> Result<Vec<Artifact>> {
    spec.validate()?;

    let artifacts = vec![
        workflow::render(spec),
        bundle::render(spec),
        mapping::render(spec),
        script::render(spec),
    ];

    for artifact in &artifacts {
        if matches!(artifact.kind, ArtifactKind::Workflow | ArtifactKind::Bundle) {
            serde_yml::from_str::<serde_yml::Value>(&artifact.contents)
                .map_err(|e| Error::artifact_invalid_yaml(&artifact.relative_path, e.to_string()))?;
        }
    }

    Ok(artifacts)
}

/// Placeholders a spec never filled in are reported as warnings, not errors.
pub fn unresolved_warnings(artifacts: &[Artifact]) -> Vec<CliWarning> {
    artifacts
        .iter()
        .flat_map(|artifact| {
            template::unresolved(&artifact.contents)
                .into_iter()
                .map(|name| CliWarning {
                    code: "artifact.unresolved_placeholder".to_string(),
                    message: format!(
                        "Placeholder '{{{{{}}}}}' left unresolved in {}",
                        name, artifact.relative_path
                    ),
                    details: serde_json::json!({
                        "artifact": artifact.relative_path,
                        "placeholder": name,
                    }),
                })
                .collect::<Vec<_>>()
        })
        .collect()
}

/// Writes artifacts under `out_dir`, creating parent directories. Writes are
/// atomic (temp file + rename). The validation script is marked executable.
pub fn write_all(artifacts: &[Artifact], out_dir: &Path) -> Result<Vec<String>> {
    let mut written = Vec::with_capacity(artifacts.len());

    for artifact in artifacts {
        let path = out_dir.join(&artifact.relative_path);
        json::write_file_atomic(&path, artifact.contents.as_bytes())?;

        #[cfg(unix)]
        if artifact.kind == ArtifactKind::Script {
            use std::os::unix::fs::PermissionsExt;
            std::fs::set_permissions(&path, std::fs::Permissions::from_mode(0o755))
                .map_err(|e| Error::internal_io(e.to_string(), Some("chmod script".to_string())))?;
        }

        written.push(path.to_string_lossy().to_string());
    }

    Ok(written)
}

/// Starter spec written by `bricklayer init`.
pub fn example_spec() -> PipelineSpec {
    PipelineSpec {
        name: "sales-ingest".to_string(),
        workspace_host: "https://adb-1234567890123456.7.azuredatabricks.net".to_string(),
        warehouse_id: "ab12cd34ef56gh78".to_string(),
        smoke_table: "main.sales.orders".to_string(),
        branch: "main".to_string(),
        mappings: vec![
            FieldMapping {
                source: "order_id".to_string(),
                target: "orders.order_id".to_string(),
                data_type: "bigint".to_string(),
                notes: Some("primary key".to_string()),
            },
            FieldMapping {
                source: "order_ts".to_string(),
                target: "orders.ordered_at".to_string(),
                data_type: "timestamp".to_string(),
                notes: None,
            },
        ],
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ErrorCode;

    fn spec() -> PipelineSpec {
        example_spec()
    }

    #[test]
    fn generates_all_four_artifacts() {
        let artifacts = generate_all(&spec()).unwrap();

        let kinds: Vec<ArtifactKind> = artifacts.iter().map(|a| a.kind).collect();
        assert_eq!(
            kinds,
            vec![
                ArtifactKind::Workflow,
                ArtifactKind::Bundle,
                ArtifactKind::Mapping,
                ArtifactKind::Script,
            ]
        );
    }

    #[test]
    fn yaml_artifacts_parse() {
        for artifact in generate_all(&spec()).unwrap() {
            if matches!(artifact.kind, ArtifactKind::Workflow | ArtifactKind::Bundle) {
                serde_yml::from_str::<serde_yml::Value>(&artifact.contents).unwrap();
            }
        }
    }

    #[test]
    fn generation_is_deterministic() {
        let first = generate_all(&spec()).unwrap();
        let second = generate_all(&spec()).unwrap();

        for (a, b) in first.iter().zip(second.iter()) {
            assert_eq!(a.contents, b.contents);
            assert_eq!(a.relative_path, b.relative_path);
        }
    }

    #[test]
    fn fully_rendered_artifacts_have_no_unresolved_placeholders() {
        let artifacts = generate_all(&spec()).unwrap();
        assert!(unresolved_warnings(&artifacts).is_empty());
    }

    #[test]
    fn spec_with_bad_host_is_rejected() {
        let mut bad = spec();
        bad.workspace_host = "adb-123.azuredatabricks.net".to_string();

        let err = generate_all(&bad).unwrap_err();
        assert_eq!(err.code, ErrorCode::ValidationInvalidArgument);
    }

    #[test]
    fn spec_with_bad_table_is_rejected() {
        let mut bad = spec();
        bad.smoke_table = "main.sales.orders; drop".to_string();

        assert!(generate_all(&bad).is_err());
    }

    #[test]
    fn spec_parses_from_json_with_defaults() {
        let raw = r#"{
            "name": "events",
            "workspaceHost": "https://wh.example.com",
            "warehouseId": "wh1",
            "smokeTable": "main.events.raw"
        }"#;

        let spec = PipelineSpec::from_json_str(raw).unwrap();
        assert_eq!(spec.branch, "main");
        assert!(spec.mappings.is_empty());
    }
}
