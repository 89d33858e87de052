#![allow(dead_code)]

use std::io::Write;

use tempfile::NamedTempFile;

pub use initq_test_utils::init_tracing;

pub type TestResult = Result<(), Box<dyn std::error::Error>>;

/// Write `contents` to a temporary TOML file.
pub fn config_file(contents: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().expect("create temp config");
    write!(file, "{contents}").expect("write temp config");
    file
}

pub const VALID_CONFIG: &str = r#"
[database]
url = "postgres://localhost/app"

[server]
listen = "127.0.0.1:9090"
banner = "app ready"
"#;
