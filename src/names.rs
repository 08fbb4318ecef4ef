/*!
 * Name deduplication and redistribution.
 *
 * Names are packed into `NameUnit`s before translation so every distinct
 * text is sent to the backend once, then the translated texts are spread
 * back over every entry that shared them.
 */

use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;
use log::debug;
use serde::{Deserialize, Serialize};

use crate::errors::TranslationError;
use crate::tree::{EntryKey, SourceTree};

/// A unique name-text and every entry that carries it
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NameUnit {
    /// The shared text
    pub text: String,
    /// Keys sharing the text, in traversal order
    pub keys: Vec<EntryKey>,
}

/// One translated unit, aligned by position with the request list
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TranslationResult {
    /// Text that was sent
    pub source: String,
    /// Text the backend returned
    pub result: String,
}

impl TranslationResult {
    /// Create a new result pair
    pub fn new(source: impl Into<String>, result: impl Into<String>) -> Self {
        Self {
            source: source.into(),
            result: result.into(),
        }
    }
}

/// How translated and original text are combined in the final name
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DisplayMode {
    /// Translation only
    #[default]
    Rename,
    /// `translation [original]`
    Prefix,
    /// `original [translation]`
    Suffix,
}

impl DisplayMode {
    /// All modes, in the order they are offered to the operator
    pub const ALL: [DisplayMode; 3] = [DisplayMode::Rename, DisplayMode::Prefix, DisplayMode::Suffix];

    /// Lowercase identifier
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Rename => "rename",
            Self::Prefix => "prefix",
            Self::Suffix => "suffix",
        }
    }

    /// Short description shown next to the identifier
    pub fn description(&self) -> &'static str {
        match self {
            Self::Rename => "translation only",
            Self::Prefix => "translation [original text]",
            Self::Suffix => "original text [translation]",
        }
    }

    /// Parse a mode, falling back to `Rename` for anything unrecognized
    pub fn parse_lenient(s: &str) -> Self {
        s.parse().unwrap_or_default()
    }

    /// Combine one translation result according to this mode
    pub fn apply(&self, translation: &TranslationResult) -> String {
        match self {
            Self::Rename => translation.result.clone(),
            Self::Prefix => format!("{} [{}]", translation.result, translation.source),
            Self::Suffix => format!("{} [{}]", translation.source, translation.result),
        }
    }
}

impl fmt::Display for DisplayMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for DisplayMode {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> anyhow::Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "rename" => Ok(Self::Rename),
            "prefix" => Ok(Self::Prefix),
            "suffix" => Ok(Self::Suffix),
            _ => Err(anyhow::anyhow!("Invalid display mode: {}", s)),
        }
    }
}

/// Group `(key, text)` pairs by exact text equality.
///
/// Units come out in order of first appearance and each unit's keys keep
/// the input order.
pub fn dedupe(names: &[(EntryKey, String)]) -> Vec<NameUnit> {
    let mut units: Vec<NameUnit> = Vec::new();
    let mut positions: HashMap<&str, usize> = HashMap::new();

    for (key, text) in names {
        match positions.get(text.as_str()) {
            Some(&pos) => units[pos].keys.push(*key),
            None => {
                positions.insert(text.as_str(), units.len());
                units.push(NameUnit {
                    text: text.clone(),
                    keys: vec![*key],
                });
            }
        }
    }

    debug!("Packed {} names into {} unique texts", names.len(), units.len());
    units
}

/// Texts of the units, in unit order
pub fn unique_texts(units: &[NameUnit]) -> Vec<String> {
    units.iter().map(|u| u.text.clone()).collect()
}

/// Apply a display mode to every translation result
pub fn format_results(results: &[TranslationResult], mode: DisplayMode) -> Vec<String> {
    results.iter().map(|r| mode.apply(r)).collect()
}

/// Copy each unit's text to every key in its key set.
///
/// `texts` is aligned by position with `units`; `entry_count` is the size
/// of the key space. Keys not covered by any unit stay empty.
pub fn unpack(
    texts: &[String],
    units: &[NameUnit],
    entry_count: usize,
) -> Result<Vec<String>, TranslationError> {
    if texts.len() != units.len() {
        return Err(TranslationError::MisalignedResults {
            expected: units.len(),
            actual: texts.len(),
        });
    }

    let mut names = vec![String::new(); entry_count];
    for (text, unit) in texts.iter().zip(units) {
        for key in &unit.keys {
            if let Some(slot) = names.get_mut(key.index()) {
                *slot = text.clone();
            }
        }
    }
    Ok(names)
}

/// Final name per entry, indexed by `EntryKey`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TranslatedNames {
    names: Vec<String>,
}

impl TranslatedNames {
    /// Format, unpack and reattach file extensions in one step
    pub fn build(
        tree: &SourceTree,
        units: &[NameUnit],
        results: &[TranslationResult],
        mode: DisplayMode,
    ) -> Result<Self, TranslationError> {
        let formatted = format_results(results, mode);
        let mut names = unpack(&formatted, units, tree.len())?;

        for entry in &tree.entries {
            if !entry.is_dir {
                names[entry.key.index()].push_str(&entry.suffix);
            }
        }

        Ok(Self { names })
    }

    /// Wrap an already complete list of names
    pub fn from_vec(names: Vec<String>) -> Self {
        Self { names }
    }

    /// Name for the given key
    pub fn get(&self, key: EntryKey) -> Option<&str> {
        self.names.get(key.index()).map(String::as_str)
    }

    /// Replace the name for the given key
    pub fn set(&mut self, key: EntryKey, name: String) {
        if let Some(slot) = self.names.get_mut(key.index()) {
            *slot = name;
        }
    }

    /// `(key, name)` pairs in key order
    pub fn iter(&self) -> impl Iterator<Item = (EntryKey, &str)> {
        self.names
            .iter()
            .enumerate()
            .map(|(i, n)| (EntryKey::new(i), n.as_str()))
    }

    /// Number of names
    pub fn len(&self) -> usize {
        self.names.len()
    }

    /// Whether there are no names
    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }
}
