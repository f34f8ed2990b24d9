use std::fs;
use std::path::PathBuf;
use tempfile::TempDir;

pub const BASE_MANIFEST: &str = r#"{
    "namespaces": [{"name": "debian:9", "version_format": "dpkg"}],
    "features": [
        {"name": "openssl", "namespace": "debian:9", "version": "1.1.0f-3"},
        {"name": "bash", "namespace": "debian:9", "version": "4.4-5"}
    ]
}"#;

pub const APP_MANIFEST: &str = r#"{
    "features": [
        {"name": "openssl", "namespace": "debian:9", "version": "1.1.0f-3"},
        {"name": "bash", "namespace": "debian:9", "version": "4.4-5"},
        {"name": "nginx", "namespace": "debian:9", "version": "1.10.3-1"}
    ]
}"#;

/// Writes `content` as `file` inside `dir` and returns its path.
pub fn write_file(dir: &TempDir, file: &str, content: &str) -> PathBuf {
    let path = dir.path().join(file);
    fs::write(&path, content).unwrap();
    path
}

pub fn path_str(path: &PathBuf) -> String {
    path.display().to_string()
}
