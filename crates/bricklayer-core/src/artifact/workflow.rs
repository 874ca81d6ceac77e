use super::{Artifact, ArtifactKind, PipelineSpec};
use crate::template;

pub const RELATIVE_PATH: &str = ".github/workflows/deploy.yml";

const TEMPLATE: &str = r#"name: "{{pipelineName}} deploy"

on:
  push:
    branches:
      - {{branch}}
  workflow_dispatch: {}

jobs:
  deploy:
    runs-on: ubuntu-latest
    steps:
      - uses: actions/checkout@v4

      - name: Install Databricks CLI
        uses: databricks/setup-cli@main

      - name: Validate bundle
        run: databricks bundle validate
        env:
          DATABRICKS_HOST: {{workspaceHost}}
          DATABRICKS_TOKEN: ${{ secrets.DATABRICKS_TOKEN }}

      - name: Deploy bundle
        run: databricks bundle deploy --target prod
        env:
          DATABRICKS_HOST: {{workspaceHost}}
          DATABRICKS_TOKEN: ${{ secrets.DATABRICKS_TOKEN }}

  smoke-test:
    runs-on: ubuntu-latest
    needs: deploy
    steps:
      - uses: actions/checkout@v4

      - name: Validate deployed table
        run: ./smoke_test.sh
        env:
          DATABRICKS_HOST: {{workspaceHost}}
          DATABRICKS_TOKEN: ${{ secrets.DATABRICKS_TOKEN }}
          DATABRICKS_WAREHOUSE_ID: {{warehouseId}}
          SMOKE_TEST_TABLE_NAME: {{smokeTable}}
"#;

pub fn render(spec: &PipelineSpec) -> Artifact {
    Artifact {
        relative_path: RELATIVE_PATH.to_string(),
        kind: ArtifactKind::Workflow,
        contents: template::render(TEMPLATE, &spec.template_vars()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::artifact::example_spec;

    #[test]
    fn workflow_wires_trigger_branch_and_smoke_env() {
        let artifact = render(&example_spec());

        assert!(artifact.contents.contains("- main"));
        assert!(artifact.contents.contains("SMOKE_TEST_TABLE_NAME: main.sales.orders"));
        assert!(artifact.contents.contains("DATABRICKS_WAREHOUSE_ID: ab12cd34ef56gh78"));
        // The secret reference must survive rendering untouched.
        assert!(artifact.contents.contains("${{ secrets.DATABRICKS_TOKEN }}"));
    }
}
