//! Word segmentation for Chinese source text.

use jieba_rs::Jieba;
use tracing::debug;

use crate::tables::TableError;

/// How a value is split into tokens.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SegmentMode {
    /// Dictionary-based segmentation.
    #[default]
    Auto,
    /// Text is already tokenized; split on whitespace.
    Whitespace,
}

/// Dictionary segmenter. The custom vocabulary is merged once, at
/// construction, and the segmenter is read-only afterwards.
pub struct Segmenter {
    jieba: Jieba,
    hmm: bool,
}

impl std::fmt::Debug for Segmenter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Segmenter").field("hmm", &self.hmm).finish()
    }
}

impl Default for Segmenter {
    fn default() -> Self {
        Self::new()
    }
}

impl Segmenter {
    /// Segmenter over the built-in dictionary only.
    pub fn new() -> Self {
        Self {
            jieba: Jieba::new(),
            hmm: true,
        }
    }

    /// Built-in dictionary plus `vocabulary` in `dict.txt` format
    /// (`word [freq] [tag]` per line).
    pub fn with_vocabulary(vocabulary: &str) -> Result<Self, TableError> {
        let mut seg = Self::new();
        seg.jieba
            .load_dict(&mut vocabulary.as_bytes())
            .map_err(|e| TableError::Invalid {
                name: "segmenter vocabulary".to_string(),
                reason: e.to_string(),
            })?;
        debug!(lines = vocabulary.lines().count(), "segmenter vocabulary loaded");
        Ok(seg)
    }

    /// Toggle HMM discovery of words missing from the dictionary.
    pub fn with_hmm(mut self, hmm: bool) -> Self {
        self.hmm = hmm;
        self
    }

    /// Split `text` into tokens. Auto mode keeps every character (spaces and
    /// punctuation become tokens of their own); whitespace mode drops the
    /// separators.
    pub fn segment(&self, text: &str, mode: SegmentMode) -> Vec<String> {
        if text.is_empty() {
            return Vec::new();
        }
        match mode {
            SegmentMode::Auto => self
                .jieba
                .cut(text, self.hmm)
                .into_iter()
                .map(str::to_string)
                .collect(),
            SegmentMode::Whitespace => text.split_whitespace().map(str::to_string).collect(),
        }
    }
}
