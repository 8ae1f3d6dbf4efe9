/*!
 * Common test utilities for the smi2ass test suite
 */

use anyhow::Result;
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// Language table used by most tests
pub const LAN_CODE_JSON: &str = r#"{
    "KRCC": "kor",
    "KOR": "kor",
    "ENCC": "eng",
    "UNKNOWNCC": "und"
}"#;

/// The smallest style table the loader accepts
pub const MINIMAL_STYLES_JSON: &str = r#"{
    "ScriptInfo": {
        "Head": "[Script Info]",
        "msg": "test",
        "Title": "X",
        "PlayResX": 1920,
        "PlayResY": 1080
    },
    "style": {
        "Head": "Style",
        "Fontname": "Arial",
        "Fontsize": 20
    }
}"#;

/// Header rendered from `MINIMAL_STYLES_JSON`
pub const MINIMAL_HEADER: &str = "[Script Info]
test
Title: X
PlayResX: 1920
PlayResY: 1080

Style
Format: Fontname, Fontsize
Style: Arial,20

[Events]
Format: Layer, Start, End, Style, Actor, MarginL, MarginR, MarginV, Effect, Text

";

/// Creates a temporary directory for test files
pub fn create_temp_dir() -> Result<TempDir> {
    Ok(TempDir::new()?)
}

/// Creates a test file with the given content in the specified directory
pub fn create_test_file(dir: &Path, filename: &str, content: &str) -> Result<PathBuf> {
    let file_path = dir.join(filename);
    fs::write(&file_path, content)?;
    Ok(file_path)
}

/// Creates a setting directory holding both JSON files
pub fn create_setting_dir(lan_code: &str, styles: &str) -> Result<TempDir> {
    let dir = create_temp_dir()?;
    create_test_file(dir.path(), "lan_code.json", lan_code)?;
    create_test_file(dir.path(), "ass_styles.json", styles)?;
    Ok(dir)
}

/// The `setting/` directory shipped with the crate
pub fn shipped_setting_dir() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("setting")
}

/// Route library log output through the test harness (RUST_LOG=debug to see it)
pub fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}
