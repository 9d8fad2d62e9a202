use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::bidi::levels::{Level, NestingOverflow, ParagraphDirection, resolve_levels};
use crate::bidi::reorder::{BidiRun, ReorderOptions, VisualWriter};
use crate::error::{Error, Result};
use crate::shaping::{ArabicShaper, ShapingOptions};
use crate::unicode::utf16;

/// Paragraph-level options for the resolver.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ParagraphOptions {
    pub direction: ParagraphDirection,
    /// Fail with [`Error::NestingOverflow`] instead of ignoring excess
    /// embeddings and isolates.
    pub strict_nesting: bool,
}

/// Complete configuration for one [`Pipeline`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct PipelineConfig {
    pub shaping: ShapingOptions,
    pub paragraph: ParagraphOptions,
    pub reorder: ReorderOptions,
}

/// Shaping and visual reordering for one scope of text at a time.
///
/// A pipeline holds only its validated configuration, so it can be shared
/// between threads and reused for any number of calls.
#[derive(Debug, Clone)]
pub struct Pipeline {
    config: PipelineConfig,
    shaper: ArabicShaper,
}

impl Pipeline {
    pub fn new(config: PipelineConfig) -> Result<Self> {
        let shaper = ArabicShaper::new(config.shaping)?;
        Ok(Self { config, shaper })
    }

    pub fn config(&self) -> &PipelineConfig {
        &self.config
    }

    /// Run every stage up to the final copy.
    ///
    /// The returned [`Plan`] knows the exact output length before any
    /// caller buffer is touched.
    pub fn plan(&self, input: &[char]) -> Result<Plan> {
        let shaped = self.shaper.shape(input);
        let resolved = resolve_levels(&shaped, self.config.paragraph.direction);
        if self.config.paragraph.strict_nesting {
            resolved.check_nesting()?;
        }

        let paragraph_level = resolved.paragraph_level;
        let overflow = resolved.overflow;
        let writer = VisualWriter::new(shaped, &resolved, self.config.reorder)?;
        debug!(
            input = input.len(),
            output = writer.measure(),
            paragraph_level = paragraph_level.number(),
            "planned visual text"
        );
        Ok(Plan {
            writer,
            paragraph_level,
            overflow,
        })
    }

    /// Shape and reorder `input`, returning the visual sequence.
    pub fn run(&self, input: &[char]) -> Result<Vec<char>> {
        Ok(self.plan(input)?.into_vec())
    }

    pub fn process_str(&self, text: &str) -> Result<String> {
        let input: Vec<char> = text.chars().collect();
        Ok(self.run(&input)?.into_iter().collect())
    }

    /// UTF-16 entry point. Unpaired surrogates are rejected up front.
    pub fn process_utf16(&self, units: &[u16]) -> Result<Vec<u16>> {
        let input = utf16::decode(units)?;
        let output = self.run(&input)?;
        Ok(utf16::encode(&output))
    }
}

/// A measured pipeline result waiting for an output buffer.
#[derive(Debug, Clone)]
pub struct Plan {
    writer: VisualWriter,
    paragraph_level: Level,
    overflow: Option<NestingOverflow>,
}

impl Plan {
    /// Exact number of characters [`Plan::execute`] writes.
    pub fn len(&self) -> usize {
        self.writer.measure()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn paragraph_level(&self) -> Level {
        self.paragraph_level
    }

    /// Nesting overflow that was tolerated while resolving levels.
    pub fn overflow(&self) -> Option<NestingOverflow> {
        self.overflow
    }

    /// Per-character levels after the line reset, in logical order.
    pub fn levels(&self) -> &[Level] {
        self.writer.levels()
    }

    /// Level runs in display order.
    pub fn runs(&self) -> Vec<BidiRun> {
        self.writer.runs()
    }

    /// Fill `out` with the visual text. `out` must hold at least
    /// [`Plan::len`] characters.
    pub fn execute(&self, out: &mut [char]) -> Result<usize> {
        self.writer.write_into(out)
    }

    pub fn into_vec(self) -> Vec<char> {
        self.writer.into_vec()
    }
}

impl TryFrom<PipelineConfig> for Pipeline {
    type Error = Error;

    fn try_from(config: PipelineConfig) -> Result<Self> {
        Pipeline::new(config)
    }
}
