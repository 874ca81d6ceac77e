use crate::{Error, Result};
use std::fs;
use std::io::Read;
use std::path::{Path, PathBuf};

/// Resolves a JSON spec argument to its content string.
///
/// `-` reads piped stdin, `@path` reads a file, anything else is taken as
/// inline JSON.
pub fn read_json_spec_to_string(spec: &str) -> Result<String> {
    use std::io::IsTerminal;

    if spec.trim() == "-" {
        let mut buf = String::new();
        let mut stdin = std::io::stdin();
        if stdin.is_terminal() {
            return Err(Error::validation_invalid_argument(
                "spec",
                "Cannot read JSON from stdin when stdin is a TTY",
                None,
            ));
        }
        stdin
            .read_to_string(&mut buf)
            .map_err(|e| Error::internal_io(e.to_string(), Some("read stdin".to_string())))?;
        return Ok(buf);
    }

    if let Some(path) = spec.strip_prefix('@') {
        if path.trim().is_empty() {
            return Err(Error::validation_invalid_argument(
                "spec",
                "Invalid spec '@' (missing file path)",
                None,
            ));
        }

        return fs::read_to_string(path).map_err(|e| {
            Error::internal_io(e.to_string(), Some(format!("read spec file '{}'", path)))
        });
    }

    Ok(spec.to_string())
}

pub fn write_file_atomic(path: &Path, content: &[u8]) -> Result<()> {
    let parent = path.parent().ok_or_else(|| {
        Error::validation_invalid_argument(
            "path",
            format!("Invalid path: {}", path.display()),
            None,
        )
    })?;

    let filename = path.file_name().ok_or_else(|| {
        Error::validation_invalid_argument(
            "path",
            format!("Invalid path: {}", path.display()),
            None,
        )
    })?;

    if !parent.as_os_str().is_empty() {
        fs::create_dir_all(parent)
            .map_err(|e| Error::internal_io(e.to_string(), Some("create parent dir".to_string())))?;
    }

    let tmp_path: PathBuf = parent.join(format!("{}.tmp", filename.to_string_lossy()));

    fs::write(&tmp_path, content)
        .map_err(|e| Error::internal_io(e.to_string(), Some("write tmp file".to_string())))?;
    fs::rename(&tmp_path, path)
        .map_err(|e| Error::internal_io(e.to_string(), Some("rename tmp file".to_string())))?;

    Ok(())
}
