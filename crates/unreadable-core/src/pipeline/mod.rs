//! Drives one scheme over a whole language map.
//!
//! Each value is transcribed independently; the first failing value aborts
//! the map. Fixup tiers are merged afterwards, weakest first: universal,
//! then the scheme's own tier, then manual corrections.

#[cfg(test)]
mod tests;

use std::time::{Duration, Instant};

use tracing::{debug, debug_span};

use crate::romanize::Romanizer;
use crate::scheme::{
    self, Context, SchemeId, SourceLanguage, Transcription, TranscribeError,
    DEFAULT_MANYOGANA_SEED,
};
use crate::segment::{SegmentMode, Segmenter};
use crate::tables::{FixupMap, LanguageMap, ReplacementTable, Resources, TableError};

/// Replacement rules used when regenerating fixup files from the
/// pre-tokenized source.
pub const FIX_DATA_REPLACEMENTS: [(&str, &str); 3] =
    [("！:(", "! :("), ("，", ", "), ("-!", "!")];

/// Which replacement table the schemes apply.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum Replacements {
    /// The source language's own table (`rep_zh` / `rep_ja_kk`).
    #[default]
    Standard,
    Custom(ReplacementTable),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConvertOptions {
    pub mode: SegmentMode,
    pub replacements: Replacements,
    /// Merge the fixup tiers into the result.
    pub apply_fixups: bool,
    /// Seed of the random Man'yōgana variant.
    pub seed: u64,
}

impl Default for ConvertOptions {
    fn default() -> Self {
        Self {
            mode: SegmentMode::Auto,
            replacements: Replacements::Standard,
            apply_fixups: true,
            seed: DEFAULT_MANYOGANA_SEED,
        }
    }
}

impl ConvertOptions {
    /// Whitespace segmentation, the fix-data replacement rules, no fixups.
    pub fn fix_data() -> Self {
        Self {
            mode: SegmentMode::Whitespace,
            replacements: Replacements::Custom(FIX_DATA_REPLACEMENTS.into_iter().collect()),
            apply_fixups: false,
            ..Self::default()
        }
    }
}

/// A converted map and how long it took.
#[derive(Debug, Clone)]
pub struct Conversion {
    pub scheme: SchemeId,
    pub map: LanguageMap,
    pub elapsed: Duration,
}

#[derive(Debug, thiserror::Error)]
pub enum ConvertError {
    #[error("{scheme}: converting {key:?} failed: {source}")]
    Entry {
        scheme: SchemeId,
        key: String,
        #[source]
        source: TranscribeError,
    },
}

/// Resources, segmenter and romanizer, bundled read-only.
#[derive(Debug)]
pub struct Converter {
    resources: Resources,
    segmenter: Segmenter,
    romanizer: Romanizer,
}

impl Converter {
    /// Build the segmenter (merging the resource vocabulary) and romanizer.
    pub fn new(resources: Resources, hmm: bool) -> Result<Self, TableError> {
        let segmenter = match &resources.vocabulary {
            Some(vocabulary) => Segmenter::with_vocabulary(vocabulary)?,
            None => Segmenter::new(),
        };
        Ok(Self::with_segmenter(resources, segmenter.with_hmm(hmm)))
    }

    pub fn with_segmenter(resources: Resources, segmenter: Segmenter) -> Self {
        let romanizer = Romanizer::new(resources.phrases.clone());
        Self {
            resources,
            segmenter,
            romanizer,
        }
    }

    pub fn resources(&self) -> &Resources {
        &self.resources
    }

    fn context<'a>(&'a self, scheme: SchemeId, opts: &'a ConvertOptions) -> Context<'a> {
        let replacements = match &opts.replacements {
            Replacements::Custom(table) => table,
            Replacements::Standard => match scheme.config().source {
                SourceLanguage::English => &self.resources.rep_ja_kk,
                SourceLanguage::Chinese => &self.resources.rep_zh,
            },
        };
        Context {
            resources: &self.resources,
            segmenter: &self.segmenter,
            romanizer: &self.romanizer,
            mode: opts.mode,
            replacements,
        }
    }

    /// Convert every value of `map` with `scheme`, then merge fixups.
    pub fn convert(
        &self,
        scheme: SchemeId,
        map: &LanguageMap,
        opts: &ConvertOptions,
    ) -> Result<Conversion, ConvertError> {
        let _span = debug_span!("convert", %scheme, entries = map.len()).entered();
        let start = Instant::now();
        let cfg = scheme.config();
        let ctx = self.context(scheme, opts);
        let mut rng = fastrand::Rng::with_seed(opts.seed);
        // 为 is read wèi in these values; the split scheme shows the source as is.
        let override_reading =
            cfg.source == SourceLanguage::Chinese && cfg.transcription != Transcription::Split;

        let mut out = LanguageMap::new();
        for (key, value) in map {
            let text = if override_reading && self.resources.reading_override_keys.contains(key) {
                value.replace('为', "位")
            } else {
                value.clone()
            };
            let converted = scheme::transcribe(scheme, &ctx, &text, &mut rng).map_err(|source| {
                ConvertError::Entry {
                    scheme,
                    key: key.clone(),
                    source,
                }
            })?;
            out.insert(key.clone(), converted);
        }

        let mut fixed = 0;
        if opts.apply_fixups {
            for tier in self.fixup_tiers(scheme, opts) {
                fixed += tier.len();
                out.extend(tier.iter().map(|(k, v)| (k.clone(), v.clone())));
            }
        }

        let elapsed = start.elapsed();
        debug!(
            entries = out.len(),
            fixed,
            elapsed_ms = elapsed.as_millis() as u64,
            "conversion done"
        );
        Ok(Conversion {
            scheme,
            map: out,
            elapsed,
        })
    }

    /// Convert a single string, without reading overrides or fixups.
    pub fn convert_text(
        &self,
        scheme: SchemeId,
        text: &str,
        opts: &ConvertOptions,
    ) -> Result<String, TranscribeError> {
        let ctx = self.context(scheme, opts);
        scheme::transcribe(scheme, &ctx, text, &mut fastrand::Rng::with_seed(opts.seed))
    }

    /// Fixup maps for `scheme`, weakest first.
    fn fixup_tiers(&self, scheme: SchemeId, opts: &ConvertOptions) -> Vec<&FixupMap> {
        let cfg = scheme.config();
        let fixups = &self.resources.fixups;
        let mut tiers = Vec::with_capacity(3);

        if cfg.source == SourceLanguage::Chinese && opts.replacements == Replacements::Standard {
            tiers.push(&fixups.universal);
        }
        if cfg.generated_fixups {
            if let Some(tier) = fixups.scheme.get(scheme.output_name()) {
                tiers.push(tier);
            }
        }
        if cfg.source_fixups {
            tiers.push(&fixups.source);
        }
        if cfg.manual_fixups {
            tiers.push(&fixups.manual);
        }
        tiers
    }
}
