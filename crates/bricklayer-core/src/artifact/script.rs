use super::{Artifact, ArtifactKind, PipelineSpec};
use crate::template;

pub const RELATIVE_PATH: &str = "smoke_test.sh";

const TEMPLATE: &str = r#"#!/usr/bin/env bash
# Post-deployment smoke test for {{pipelineName}}.
# Verifies {{smokeTable}} exists and contains at least one row.
# Exit codes: 0 = pass, 1 = any failure.
set -euo pipefail

for var in DATABRICKS_HOST DATABRICKS_TOKEN DATABRICKS_WAREHOUSE_ID SMOKE_TEST_TABLE_NAME; do
  if [ -z "${!var:-}" ]; then
    echo "missing required environment variable: ${var}" >&2
    exit 1
  fi
done

exec bricklayer smoke
"#;

pub fn render(spec: &PipelineSpec) -> Artifact {
    Artifact {
        relative_path: RELATIVE_PATH.to_string(),
        kind: ArtifactKind::Script,
        contents: template::render(TEMPLATE, &spec.template_vars()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::artifact::example_spec;
    use crate::env;

    #[test]
    fn script_checks_all_required_variables() {
        let artifact = render(&example_spec());

        for var in env::REQUIRED_VARS {
            assert!(artifact.contents.contains(var), "missing {}", var);
        }
        assert!(artifact.contents.starts_with("#!/usr/bin/env bash"));
        assert!(artifact.contents.contains("exec bricklayer smoke"));
    }
}
