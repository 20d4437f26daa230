use std::collections::{HashMap, HashSet};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use serde::de::DeserializeOwned;
use tracing::{debug, debug_span};

use crate::romaji::RomajiTrie;
use crate::romanize::default_phrases;
use crate::scheme::SchemeId;

use super::io::load_json;
use super::{
    CorrespondenceTable, FixupMap, KanaCandidates, KanaTable, LanguageMap, PhraseTable,
    ReplacementTable, TableError,
};

/// Correspondence tables shipped in the data directory, by resource name.
pub const CORRESPONDENCE_TABLES: [&str; 10] = [
    "py2wg", "py2gr", "py2sgr", "py2mps2", "py2ty", "py2yale", "py2ipa", "py2kk", "py2cy",
    "py2xj",
];

/// Where the static data lives.
#[derive(Debug, Clone)]
pub struct ResourcePaths {
    pub data_dir: PathBuf,
    pub fixed_dir: PathBuf,
    /// Segmenter vocabulary in jieba `dict.txt` format.
    pub user_dict: Option<PathBuf>,
    /// Custom romaji table; the embedded one is used when absent.
    pub romaji_table: Option<PathBuf>,
}

impl ResourcePaths {
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        let data_dir = data_dir.into();
        Self {
            fixed_dir: data_dir.join("fixed"),
            user_dict: Some(data_dir.join("dict.txt")),
            romaji_table: None,
            data_dir,
        }
    }
}

/// The fixup tiers, from weakest to strongest.
#[derive(Debug, Clone, Default)]
pub struct Fixups {
    /// Applied to every Chinese scheme that runs with the standard
    /// replacement table.
    pub universal: FixupMap,
    /// Per-scheme overrides, keyed by output name (`zh_wg`, …).
    pub scheme: HashMap<String, FixupMap>,
    /// Hand-written corrections for the default pinyin scheme.
    pub manual: FixupMap,
    /// Pre-tokenized Chinese source of the generated scheme tiers.
    pub source: FixupMap,
}

/// Every table the schemes read, loaded once at start-up.
#[derive(Debug)]
pub struct Resources {
    correspondence: HashMap<String, CorrespondenceTable>,
    pub rep_zh: ReplacementTable,
    pub rep_ja_kk: ReplacementTable,
    pub manyogana: KanaTable,
    /// Candidates of the random variant; the fixed table's values when
    /// `manyogana_rand.json` is absent.
    pub manyogana_candidates: KanaCandidates,
    pub phrases: PhraseTable,
    /// Keys whose value reads 为 as wèi; 为 is rewritten to 位 before
    /// romanization.
    pub reading_override_keys: HashSet<String>,
    /// Segmenter vocabulary text, fed to the segmenter at construction.
    pub vocabulary: Option<String>,
    pub romaji: RomajiTrie,
    pub fixups: Fixups,
}

impl Default for Resources {
    fn default() -> Self {
        Self {
            correspondence: HashMap::new(),
            rep_zh: ReplacementTable::default(),
            rep_ja_kk: ReplacementTable::default(),
            manyogana: KanaTable::default(),
            manyogana_candidates: KanaCandidates::default(),
            phrases: default_phrases(),
            reading_override_keys: HashSet::new(),
            vocabulary: None,
            romaji: RomajiTrie::embedded(),
            fixups: Fixups::default(),
        }
    }
}

impl Resources {
    /// Load every resource. Any missing or malformed required file aborts.
    ///
    /// Per-scheme and manual fixup files are optional: they are produced by
    /// the fix-data step and may not exist on a fresh checkout.
    pub fn load(paths: &ResourcePaths) -> Result<Self, TableError> {
        let _span = debug_span!("load_resources", data_dir = %paths.data_dir.display()).entered();
        let data = |name: &str| paths.data_dir.join(format!("{name}.json"));

        let mut correspondence = HashMap::with_capacity(CORRESPONDENCE_TABLES.len());
        for name in CORRESPONDENCE_TABLES {
            let table: CorrespondenceTable = load_json(&data(name))?;
            debug!(table = name, entries = table.len());
            correspondence.insert(name.to_string(), table);
        }

        let manyogana_path = data("manyogana");
        let manyogana = KanaTable::from_map(
            &manyogana_path.display().to_string(),
            load_json(&manyogana_path)?,
        )?;

        let candidates_path = data("manyogana_rand");
        let manyogana_candidates = match load_if_present(&candidates_path)? {
            Some(raw) => KanaCandidates::from_map(&candidates_path.display().to_string(), raw)?,
            None => {
                debug!("no manyogana_rand.json, random variant uses the fixed table");
                KanaCandidates::from_table(&manyogana)
            }
        };

        let phrases_path = data("phrases");
        let phrases = default_phrases().with_overrides(PhraseTable::from_map(
            &phrases_path.display().to_string(),
            load_json(&phrases_path)?,
        )?);

        let wei: LanguageMap = load_json(&data("wei"))?;

        let vocabulary = match &paths.user_dict {
            Some(path) => Some(read_text(path)?),
            None => None,
        };

        let romaji = match &paths.romaji_table {
            Some(path) => {
                RomajiTrie::from_toml(&read_text(path)?).map_err(|e| TableError::Invalid {
                    name: path.display().to_string(),
                    reason: e.to_string(),
                })?
            }
            None => RomajiTrie::embedded(),
        };

        let fixups = load_fixups(paths)?;

        Ok(Self {
            correspondence,
            rep_zh: load_json(&data("rep_zh"))?,
            rep_ja_kk: load_json(&data("rep_ja_kk"))?,
            manyogana,
            manyogana_candidates,
            phrases,
            reading_override_keys: wei.into_keys().collect(),
            vocabulary,
            romaji,
            fixups,
        })
    }

    /// Correspondence table by resource name.
    pub fn table(&self, name: &str) -> Option<&CorrespondenceTable> {
        self.correspondence.get(name)
    }

    pub fn insert_table(&mut self, name: impl Into<String>, table: CorrespondenceTable) {
        self.correspondence.insert(name.into(), table);
    }
}

fn read_text(path: &Path) -> Result<String, TableError> {
    fs::read_to_string(path).map_err(|source| TableError::Io {
        name: path.display().to_string(),
        source,
    })
}

/// Load a fixup map, treating a missing file as an empty tier.
fn load_if_present<T: DeserializeOwned>(path: &Path) -> Result<Option<T>, TableError> {
    match load_json(path) {
        Ok(value) => Ok(Some(value)),
        Err(TableError::Io { source, .. }) if source.kind() == io::ErrorKind::NotFound => Ok(None),
        Err(e) => Err(e),
    }
}

fn load_optional(path: &Path) -> Result<FixupMap, TableError> {
    Ok(load_if_present(path)?.unwrap_or_else(|| {
        debug!(path = %path.display(), "no fixup file, tier left empty");
        FixupMap::new()
    }))
}

fn load_fixups(paths: &ResourcePaths) -> Result<Fixups, TableError> {
    let universal = load_json(&paths.fixed_dir.join("universal.json"))?;
    let manual = load_optional(&paths.fixed_dir.join("manual_zh_py.json"))?;
    let source = load_optional(&paths.data_dir.join("fixed_zh_source.json"))?;

    let mut scheme = HashMap::new();
    for id in SchemeId::ALL {
        if id.config().generated_fixups {
            let output = id.output_name();
            let map = load_optional(&paths.fixed_dir.join(format!("{output}.json")))?;
            scheme.insert(output.to_string(), map);
        }
    }

    Ok(Fixups {
        universal,
        scheme,
        manual,
        source,
    })
}
