use anyhow::{Context, Result};
use scribe::{ConfigError, DigitShaping, ParagraphDirection, ScribeConfig};
use std::path::PathBuf;

fn fixture(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures").join(name)
}

#[test]
fn config_file_drives_the_pipeline() -> Result<()> {
    let path = fixture("rtl_indic.toml");
    let config = ScribeConfig::load_from_file(&path)
        .with_context(|| format!("loading {}", path.display()))?;
    assert_eq!(config.shaping.digits, DigitShaping::ArabicIndic);
    assert_eq!(config.paragraph.direction, ParagraphDirection::Rtl);

    let pipeline = config.pipeline()?;
    assert_eq!(pipeline.config(), &config.pipeline_config());
    // Digits become Arabic-Indic; the unmirrored bracket keeps its glyph.
    assert_eq!(pipeline.process_str("(42")?, "\u{0664}\u{0662}(");
    Ok(())
}

#[test]
fn variable_overrides_apply_on_top_of_the_file() -> Result<()> {
    let mut config = ScribeConfig::load_from_file(fixture("rtl_indic.toml"))?;
    config.merge_with(|name| match name {
        "SCRIBE_PARAGRAPH_DIRECTION" => Some("ltr".to_string()),
        "SCRIBE_DIGITS" => Some("none".to_string()),
        _ => None,
    });

    let pipeline = config.pipeline()?;
    assert_eq!(pipeline.process_str("abc 42")?, "abc 42");
    Ok(())
}

#[test]
fn missing_config_file_reports_its_path() {
    let path = fixture("absent.toml");
    match ScribeConfig::load_from_file(&path) {
        Err(ConfigError::Read { path: reported, .. }) => assert_eq!(reported, path),
        other => panic!("expected a read error, got {other:?}"),
    }
}

#[test]
fn facade_builds_a_pipeline_from_the_environment() -> Result<()> {
    let pipeline = scribe::pipeline_from_env()?;
    let plan = pipeline.plan(&['a', 'b'])?;
    assert_eq!(plan.len(), 2);
    Ok(())
}
