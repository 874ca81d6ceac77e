use super::{Artifact, ArtifactKind, PipelineSpec};
use crate::template;

pub const RELATIVE_PATH: &str = "bundle.yml";

const TEMPLATE: &str = r#"bundle:
  name: {{pipelineName}}

workspace:
  host: {{workspaceHost}}

variables:
  warehouse_id:
    description: SQL warehouse used by post-deploy validation
    default: {{warehouseId}}

targets:
  dev:
    mode: development
    default: true
  prod:
    mode: production
    workspace:
      host: {{workspaceHost}}
"#;

pub fn render(spec: &PipelineSpec) -> Artifact {
    Artifact {
        relative_path: RELATIVE_PATH.to_string(),
        kind: ArtifactKind::Bundle,
        contents: template::render(TEMPLATE, &spec.template_vars()),
    }
}
