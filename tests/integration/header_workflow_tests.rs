/*!
 * End-to-end header rendering: load, override, render, write
 */

use anyhow::Result;
use std::fs;
use smi2ass::StyleComposer;
use smi2ass::file_utils::FileManager;
use crate::common;

#[test]
fn test_minimal_settings_onDisk_shouldRenderReferenceHeader() -> Result<()> {
    let dir = common::create_setting_dir(common::LAN_CODE_JSON, common::MINIMAL_STYLES_JSON)?;
    let composer = StyleComposer::new(Some(dir.path()))?;
    assert_eq!(composer.render_header(), common::MINIMAL_HEADER);
    Ok(())
}

/// Mirrors what the SMI driver does for one file
#[test]
fn test_conversion_workflow_shouldWriteHeaderNextToInput() -> Result<()> {
    common::init_logging();
    let dir = common::create_setting_dir(common::LAN_CODE_JSON, common::MINIMAL_STYLES_JSON)?;
    let mut composer = StyleComposer::new(Some(dir.path()))?;

    let input = dir.path().join("Show - S01E15.smi");
    let title = input.file_stem().map(|s| s.to_string_lossy().to_string()).unwrap_or_default();
    composer.set_title(&title);
    composer.set_resolution(1280, 720);

    let language = composer.resolve_language_code("KRCC");
    assert_eq!(language, "kor");

    let output = FileManager::generate_output_path(&input, "ass");
    let mut document = composer.render_header();
    document.push_str("Dialogue: 0,0:00:01.00,0:00:04.00,Default,,0,0,0,,Hello\n");
    FileManager::write_to_file(&output, &document)?;

    let written = fs::read_to_string(&output)?;
    assert!(output.ends_with("Show - S01E15.ass"));
    assert!(written.starts_with("[Script Info]\ntest\nTitle: Show - S01E15\nPlayResX: 1280\nPlayResY: 720\n\n"));
    assert!(written.contains("[Events]\nFormat: Layer, Start, End, Style, Actor, MarginL, MarginR, MarginV, Effect, Text\n\nDialogue:"));
    Ok(())
}

#[test]
fn test_shipped_settings_shouldRenderAlignedStyleLine() -> Result<()> {
    let composer = StyleComposer::new(Some(&common::shipped_setting_dir()))?;
    let header = composer.render_header();

    let format_line = header.lines().find(|l| l.starts_with("Format: Name")).unwrap();
    let style_line = header.lines().find(|l| l.starts_with("Style: ")).unwrap();
    assert_eq!(
        format_line.split(", ").count(),
        style_line.split(',').count()
    );
    assert!(header.contains("[V4+ Styles]\n"));
    assert!(header.contains("ScaledBorderAndShadow: yes\n"));
    Ok(())
}

#[test]
fn test_independent_composers_shouldNotShareOverrides() -> Result<()> {
    let dir = common::create_setting_dir(common::LAN_CODE_JSON, common::MINIMAL_STYLES_JSON)?;
    let mut first = StyleComposer::new(Some(dir.path()))?;
    let second = StyleComposer::new(Some(dir.path()))?;

    first.set_title("Changed");
    assert_eq!(second.get_title(), "X");
    assert_eq!(second.render_header(), common::MINIMAL_HEADER);
    Ok(())
}
