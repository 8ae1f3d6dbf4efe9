/*!
 * Loading the setting directory from disk
 */

use anyhow::Result;
use smi2ass::{AppError, StyleComposer};
use smi2ass::app_config;
use smi2ass::errors::ConfigError;
use smi2ass::language_utils::get_language_name;
use crate::common;

/// The files shipped in setting/ must always load
#[test]
fn test_shipped_settings_shouldLoadWithDefaults() -> Result<()> {
    common::init_logging();
    let dir = common::shipped_setting_dir();
    let composer = StyleComposer::new(Some(&dir))?;

    assert_eq!(composer.setting_dir(), Some(dir.as_path()));
    assert_eq!(composer.get_resolution(), (1920, 1080));
    assert_eq!(composer.get_font_name(), "Arial");
    assert_eq!(composer.resolve_language_code("KRCC"), "kor");
    assert_eq!(composer.resolve_language_code("NOPECC"), "und");
    assert!(composer.languages().unrecognized_codes().is_empty());
    Ok(())
}

#[test]
fn test_new_withMissingLanguageFile_shouldFailWithRead() -> Result<()> {
    let dir = common::create_temp_dir()?;
    common::create_test_file(dir.path(), "ass_styles.json", common::MINIMAL_STYLES_JSON)?;

    let err = StyleComposer::new(Some(dir.path())).unwrap_err();
    match err {
        ConfigError::Read { path, .. } => assert!(path.ends_with("lan_code.json")),
        other => panic!("expected Read error, got {}", other),
    }
    Ok(())
}

#[test]
fn test_new_withMissingStyleFile_shouldFailWithRead() -> Result<()> {
    let dir = common::create_temp_dir()?;
    common::create_test_file(dir.path(), "lan_code.json", common::LAN_CODE_JSON)?;

    let err = StyleComposer::new(Some(dir.path())).unwrap_err();
    assert!(matches!(err, ConfigError::Read { ref path, .. } if path.ends_with("ass_styles.json")));
    Ok(())
}

#[test]
fn test_new_withMalformedStyleJson_shouldFailWithParse() -> Result<()> {
    let dir = common::create_setting_dir(common::LAN_CODE_JSON, "{ \"ScriptInfo\": [")?;
    let err = StyleComposer::new(Some(dir.path())).unwrap_err();
    assert!(matches!(err, ConfigError::Parse { .. }));
    assert!(err.to_string().contains("ass_styles.json"));
    Ok(())
}

#[test]
fn test_new_withoutUnknownEntry_shouldFailWithMissingFallback() -> Result<()> {
    let dir = common::create_setting_dir(r#"{ "KRCC": "kor" }"#, common::MINIMAL_STYLES_JSON)?;
    let err = StyleComposer::new(Some(dir.path())).unwrap_err();
    assert!(matches!(err, ConfigError::MissingFallback { .. }));
    Ok(())
}

#[test]
fn test_new_withoutResolution_shouldFailWithInvalidLayout() -> Result<()> {
    let styles = common::MINIMAL_STYLES_JSON.replace("\"PlayResY\": 1080", "\"Other\": 1");
    let dir = common::create_setting_dir(common::LAN_CODE_JSON, &styles)?;
    let err = StyleComposer::new(Some(dir.path())).unwrap_err();
    assert!(err.to_string().contains("PlayResY"));
    Ok(())
}

#[test]
fn test_locate_setting_dir_withMissingDirectory_shouldFailBeforeLoading() -> Result<()> {
    let dir = common::create_temp_dir()?;
    let missing = dir.path().join("no-such-setting");

    let err = app_config::locate_setting_dir(Some(&missing)).unwrap_err();
    assert!(matches!(err, AppError::File(_)));
    assert!(err.to_string().contains("no-such-setting"));

    let (found, _) = app_config::locate_setting_dir(Some(&common::shipped_setting_dir()))?;
    assert!(StyleComposer::new(Some(&found)).is_ok());
    Ok(())
}

#[test]
fn test_shipped_language_targets_shouldHaveEnglishNames() -> Result<()> {
    let composer = StyleComposer::new(Some(&common::shipped_setting_dir()))?;
    let named: Vec<String> = composer
        .languages()
        .entries()
        .filter_map(|(_, ass)| get_language_name(ass).ok())
        .collect();
    assert!(named.iter().any(|name| name == "Korean"));
    assert!(named.iter().any(|name| name == "English"));
    Ok(())
}
