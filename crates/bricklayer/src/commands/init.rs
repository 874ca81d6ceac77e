use clap::Args;
use serde::Serialize;
use std::path::PathBuf;

use bricklayer_core::{artifact, json, Error};

use super::{CmdResult, GlobalArgs};

pub const SPEC_FILENAME: &str = "bricklayer.json";

#[derive(Args)]
pub struct InitArgs {
    /// Directory to initialize
    #[arg(long, default_value = ".")]
    pub dir: PathBuf,

    /// Overwrite an existing spec file
    #[arg(long)]
    pub force: bool,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InitOutput {
    pub path: String,
    pub dry_run: bool,
}

/// Writes a starter pipeline spec to edit and feed back into `generate`.
pub fn run(args: InitArgs, global: &GlobalArgs) -> CmdResult<InitOutput> {
    let path = args.dir.join(SPEC_FILENAME);

    if path.exists() && !args.force {
        return Err(Error::validation_invalid_argument(
            "dir",
            format!("{} already exists", path.display()),
            Some(path.to_string_lossy().to_string()),
        )
        .with_hint("Pass --force to overwrite it"));
    }

    if !global.dry_run {
        let spec = artifact::example_spec();
        let content = serde_json::to_string_pretty(&spec).map_err(|e| {
            Error::internal_json(e.to_string(), Some("serialize example spec".to_string()))
        })?;
        json::write_file_atomic(&path, format!("{}\n", content).as_bytes())?;
    }

    Ok((
        InitOutput {
            path: path.to_string_lossy().to_string(),
            dry_run: global.dry_run,
        },
        0,
    ))
}
