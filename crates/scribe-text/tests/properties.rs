use anyhow::Result;
use scribe_text::{
    ArabicShaper, LetterShaping, ParagraphDirection, Pipeline, PipelineConfig, ReorderOptions,
    ShapingOptions, resolve_levels,
};

const ARABIC_SAMPLES: &[&str] = &[
    "سلام",
    "مرحبا بكم في المدينة",
    "كتب الطالب درسه",
    "ي ب ت ث ج ح خ",
    "پیش از این",
];

#[test]
fn shape_then_unshape_restores_letters() -> Result<()> {
    let shape = ArabicShaper::new(ShapingOptions::default())?;
    let unshape = ArabicShaper::new(ShapingOptions {
        letters: LetterShaping::Unshape,
        ..ShapingOptions::default()
    })?;

    for sample in ARABIC_SAMPLES {
        let text: Vec<char> = sample.chars().collect();
        let shaped = shape.shape(&text);
        assert_eq!(shaped.len(), text.len());
        assert_eq!(unshape.shape(&shaped), text, "sample {sample}");
    }
    Ok(())
}

#[test]
fn pipeline_is_deterministic() -> Result<()> {
    let pipeline = Pipeline::new(PipelineConfig::default())?;
    for sample in ARABIC_SAMPLES.iter().chain(&["(abc) אבג 12.5%", "x \u{2067}עברית 3\u{2069} y"]) {
        assert_eq!(pipeline.process_str(sample)?, pipeline.process_str(sample)?);
    }
    Ok(())
}

#[test]
fn visual_output_is_a_permutation_without_controls() -> Result<()> {
    let config = PipelineConfig {
        reorder: ReorderOptions {
            mirroring: false,
            remove_controls: false,
        },
        ..PipelineConfig::default()
    };
    let pipeline = Pipeline::new(config)?;
    let shaper = ArabicShaper::new(config.shaping)?;

    for sample in ["abc אבג def", "سلام (world) 42", "\u{202B}abc\u{202C} ghi"] {
        let input: Vec<char> = sample.chars().collect();
        let mut expected = shaper.shape(&input);
        let mut output = pipeline.run(&input)?;
        expected.sort_unstable();
        output.sort_unstable();
        assert_eq!(output, expected, "sample {sample}");
    }
    Ok(())
}

#[test]
fn explicit_levels_stay_within_depth() {
    let mut text = String::new();
    for _ in 0..200 {
        text.push('\u{202B}');
        text.push('\u{2066}');
    }
    text.push_str("abc");
    let chars: Vec<char> = text.chars().collect();
    let resolved = resolve_levels(&chars, ParagraphDirection::AutoDefaultLtr);
    assert!(resolved.overflow.is_some());
    assert!(
        resolved
            .levels
            .iter()
            .all(|level| level.number() <= scribe_text::bidi::MAX_DEPTH + 1)
    );
}
