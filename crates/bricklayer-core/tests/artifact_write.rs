use bricklayer_core::artifact::{self, ArtifactKind};

#[test]
fn write_all_places_artifacts_under_the_output_root() {
    let spec = artifact::example_spec();
    let artifacts = artifact::generate_all(&spec).unwrap();

    let dir = tempfile::tempdir().unwrap();
    let written = artifact::write_all(&artifacts, dir.path()).unwrap();

    assert_eq!(written.len(), 4);
    assert!(dir.path().join(".github/workflows/deploy.yml").exists());
    assert!(dir.path().join("bundle.yml").exists());
    assert!(dir.path().join("field_mapping.md").exists());
    assert!(dir.path().join("smoke_test.sh").exists());
}

#[test]
fn written_contents_match_rendered_contents() {
    let spec = artifact::example_spec();
    let artifacts = artifact::generate_all(&spec).unwrap();

    let dir = tempfile::tempdir().unwrap();
    artifact::write_all(&artifacts, dir.path()).unwrap();

    for artifact in &artifacts {
        let on_disk = std::fs::read_to_string(dir.path().join(&artifact.relative_path)).unwrap();
        assert_eq!(on_disk, artifact.contents);
    }
}

#[cfg(unix)]
#[test]
fn validation_script_is_executable() {
    use std::os::unix::fs::PermissionsExt;

    let spec = artifact::example_spec();
    let artifacts = artifact::generate_all(&spec).unwrap();

    let dir = tempfile::tempdir().unwrap();
    artifact::write_all(&artifacts, dir.path()).unwrap();

    let script = artifacts
        .iter()
        .find(|a| a.kind == ArtifactKind::Script)
        .unwrap();
    let mode = std::fs::metadata(dir.path().join(&script.relative_path))
        .unwrap()
        .permissions()
        .mode();

    assert_eq!(mode & 0o111, 0o111);
}

#[test]
fn rewriting_produces_identical_files() {
    let spec = artifact::example_spec();
    let artifacts = artifact::generate_all(&spec).unwrap();

    let dir = tempfile::tempdir().unwrap();
    artifact::write_all(&artifacts, dir.path()).unwrap();
    let first: Vec<String> = artifacts
        .iter()
        .map(|a| std::fs::read_to_string(dir.path().join(&a.relative_path)).unwrap())
        .collect();

    artifact::write_all(&artifacts, dir.path()).unwrap();
    let second: Vec<String> = artifacts
        .iter()
        .map(|a| std::fs::read_to_string(dir.path().join(&a.relative_path)).unwrap())
        .collect();

    assert_eq!(first, second);
}
