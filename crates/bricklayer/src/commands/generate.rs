use clap::Args;
use serde::Serialize;
use std::path::PathBuf;

use bricklayer_core::artifact::{self, PipelineSpec};
use bricklayer_core::output::CliWarning;
use bricklayer_core::prompt::{ConfirmListPrompt, PromptEngine, TextPrompt};
use bricklayer_core::{json, Error};

use super::GlobalArgs;

#[derive(Args)]
pub struct GenerateArgs {
    /// Pipeline spec as inline JSON, @file, or - for stdin.
    /// Omit to be prompted interactively.
    #[arg(long)]
    pub spec: Option<String>,

    /// Output directory for generated artifacts
    #[arg(long, default_value = ".")]
    pub out: PathBuf,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GeneratedArtifact {
    pub path: String,
    pub kind: String,
    pub bytes: usize,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateOutput {
    pub pipeline: String,
    pub dry_run: bool,
    pub artifacts: Vec<GeneratedArtifact>,
}

pub fn run(
    args: GenerateArgs,
    global: &GlobalArgs,
) -> bricklayer_core::Result<(GenerateOutput, Vec<CliWarning>, i32)> {
    let spec = resolve_spec(args.spec.as_deref())?;
    let artifacts = artifact::generate_all(&spec)?;
    let warnings = artifact::unresolved_warnings(&artifacts);

    let written: Vec<GeneratedArtifact> = if global.dry_run {
        artifacts
            .iter()
            .map(|a| GeneratedArtifact {
                path: args.out.join(&a.relative_path).to_string_lossy().to_string(),
                kind: a.kind.as_str().to_string(),
                bytes: a.contents.len(),
            })
            .collect()
    } else {
        let paths = artifact::write_all(&artifacts, &args.out)?;
        paths
            .into_iter()
            .zip(artifacts.iter())
            .map(|(path, a)| GeneratedArtifact {
                path,
                kind: a.kind.as_str().to_string(),
                bytes: a.contents.len(),
            })
            .collect()
    };

    Ok((
        GenerateOutput {
            pipeline: spec.name,
            dry_run: global.dry_run,
            artifacts: written,
        },
        warnings,
        0,
    ))
}

fn resolve_spec(spec_arg: Option<&str>) -> bricklayer_core::Result<PipelineSpec> {
    if let Some(raw) = spec_arg {
        let content = json::read_json_spec_to_string(raw)?;
        return PipelineSpec::from_json_str(&content);
    }

    let engine = PromptEngine::new();
    if !engine.is_interactive() {
        return Err(Error::validation_missing_argument(vec!["spec".to_string()])
            .with_hint("Pass --spec @bricklayer.json, or run in a terminal to be prompted"));
    }

    prompt_for_spec(&engine)
}

fn prompt_for_spec(engine: &PromptEngine) -> bricklayer_core::Result<PipelineSpec> {
    let example = artifact::example_spec();

    let name = engine
        .text(&TextPrompt {
            question: "Pipeline name".to_string(),
            default: Some(example.name),
        })
        .unwrap_or_default();
    let workspace_host = engine
        .text(&TextPrompt {
            question: "Workspace host URL".to_string(),
            default: None,
        })
        .unwrap_or_default();
    let warehouse_id = engine
        .text(&TextPrompt {
            question: "SQL warehouse ID".to_string(),
            default: None,
        })
        .unwrap_or_default();
    let smoke_table = engine
        .text(&TextPrompt {
            question: "Table to validate after deploy (catalog.schema.table)".to_string(),
            default: None,
        })
        .unwrap_or_default();
    let branch = engine
        .text(&TextPrompt {
            question: "Deploy branch".to_string(),
            default: Some("main".to_string()),
        })
        .unwrap_or_default();

    let spec = PipelineSpec {
        name,
        workspace_host,
        warehouse_id,
        smoke_table,
        branch,
        mappings: vec![],
    };
    spec.validate()?;

    let confirmed = engine.confirm_list(&ConfirmListPrompt {
        header: "Artifacts to generate:".to_string(),
        items: vec![
            ".github/workflows/deploy.yml".to_string(),
            "bundle.yml".to_string(),
            "field_mapping.md".to_string(),
            "smoke_test.sh".to_string(),
        ],
        confirm_question: "Continue?".to_string(),
        default: true,
    });

    if !confirmed {
        return Err(Error::validation_invalid_argument(
            "spec",
            "Generation cancelled",
            None,
        ));
    }

    Ok(spec)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn generate_writes_artifacts_to_the_output_dir() {
        let dir = tempfile::tempdir().unwrap();
        let spec_json =
            serde_json::to_string(&bricklayer_core::artifact::example_spec()).unwrap();

        let (output, warnings, exit_code) = run(
            GenerateArgs {
                spec: Some(spec_json),
                out: dir.path().to_path_buf(),
            },
            &GlobalArgs { dry_run: false },
        )
        .unwrap();

        assert_eq!(exit_code, 0);
        assert!(warnings.is_empty());
        assert_eq!(output.artifacts.len(), 4);
        assert!(dir.path().join("bundle.yml").exists());
    }

    #[test]
    fn dry_run_writes_nothing() {
        let dir = tempfile::tempdir().unwrap();
        let spec_json =
            serde_json::to_string(&bricklayer_core::artifact::example_spec()).unwrap();

        let (output, _warnings, _exit_code) = run(
            GenerateArgs {
                spec: Some(spec_json),
                out: dir.path().to_path_buf(),
            },
            &GlobalArgs { dry_run: true },
        )
        .unwrap();

        assert!(output.dry_run);
        assert!(!dir.path().join("bundle.yml").exists());
    }

    #[test]
    fn invalid_spec_json_is_rejected() {
        let err = run(
            GenerateArgs {
                spec: Some("{not json".to_string()),
                out: PathBuf::from("."),
            },
            &GlobalArgs { dry_run: true },
        )
        .unwrap_err();

        assert_eq!(
            err.code,
            bricklayer_core::ErrorCode::ValidationInvalidJson
        );
    }
}
