/*!
 * Filesystem name validation.
 *
 * Checks candidate names against the strictest common set of rules across
 * Windows, macOS and Linux, and computes a sanitized replacement for every
 * name that fails.
 */

use std::fmt;
use std::sync::LazyLock;
use regex::Regex;

use crate::names::TranslatedNames;
use crate::tree::EntryKey;

/// Longest name, in bytes, accepted by common filesystems
pub const MAX_NAME_BYTES: usize = 255;

const RESERVED_NAMES: [&str; 22] = [
    "CON", "PRN", "AUX", "NUL",
    "COM1", "COM2", "COM3", "COM4", "COM5", "COM6", "COM7", "COM8", "COM9",
    "LPT1", "LPT2", "LPT3", "LPT4", "LPT5", "LPT6", "LPT7", "LPT8", "LPT9",
];

static INVALID_CHARS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"[<>:"/\\|?*\x00-\x1F]"#).expect("valid regex"));

/// Why a name is not acceptable
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NameIssue {
    Empty,
    DotName,
    InvalidCharacter,
    ReservedName,
    TrailingDotOrSpace,
    TooLong,
}

impl fmt::Display for NameIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = match self {
            Self::Empty => "empty name",
            Self::DotName => "'.' or '..'",
            Self::InvalidCharacter => "invalid character",
            Self::ReservedName => "reserved device name",
            Self::TrailingDotOrSpace => "trailing dot or space",
            Self::TooLong => "name too long",
        };
        write!(f, "{}", text)
    }
}

/// An invalid name and its sanitized replacement
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NameFix {
    pub key: EntryKey,
    pub original: String,
    pub sanitized: String,
    pub issue: NameIssue,
}

impl fmt::Display for NameFix {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} -> {} ({})", self.original, self.sanitized, self.issue)
    }
}

/// First rule the name breaks, if any
pub fn check_name(name: &str) -> Option<NameIssue> {
    if name.is_empty() {
        return Some(NameIssue::Empty);
    }
    if name == "." || name == ".." {
        return Some(NameIssue::DotName);
    }
    if INVALID_CHARS.is_match(name) {
        return Some(NameIssue::InvalidCharacter);
    }
    if name.len() > MAX_NAME_BYTES {
        return Some(NameIssue::TooLong);
    }
    if name.ends_with('.') || name.ends_with(' ') {
        return Some(NameIssue::TrailingDotOrSpace);
    }
    if is_reserved(name) {
        return Some(NameIssue::ReservedName);
    }
    None
}

/// Whether the name is acceptable as a file or directory name
pub fn is_valid_name(name: &str) -> bool {
    check_name(name).is_none()
}

/// Produce a valid name as close to the input as possible
pub fn sanitize_name(name: &str) -> String {
    let stripped = INVALID_CHARS.replace_all(name, "");
    let truncated = truncate_to_bytes(&stripped, MAX_NAME_BYTES);
    let mut result = truncated.trim_end_matches(['.', ' ']).to_string();

    if result.is_empty() {
        result.push('_');
    }
    if is_reserved(&result) {
        let base_end = result.find('.').unwrap_or(result.len());
        result.insert(base_end, '_');
        result = truncate_to_bytes(&result, MAX_NAME_BYTES)
            .trim_end_matches(['.', ' '])
            .to_string();
    }
    result
}

/// Collect a fix for every invalid name, in key order
pub fn find_invalid(names: &TranslatedNames) -> Vec<NameFix> {
    names
        .iter()
        .filter_map(|(key, name)| {
            check_name(name).map(|issue| NameFix {
                key,
                original: name.to_string(),
                sanitized: sanitize_name(name),
                issue,
            })
        })
        .collect()
}

/// Replace every fixed name in place
pub fn apply_fixes(names: &mut TranslatedNames, fixes: &[NameFix]) {
    for fix in fixes {
        names.set(fix.key, fix.sanitized.clone());
    }
}

fn is_reserved(name: &str) -> bool {
    let base = name.split('.').next().unwrap_or(name).trim_end();
    RESERVED_NAMES.iter().any(|r| r.eq_ignore_ascii_case(base))
}

fn truncate_to_bytes(s: &str, max: usize) -> &str {
    if s.len() <= max {
        return s;
    }
    let mut end = max;
    while !s.is_char_boundary(end) {
        end -= 1;
    }
    &s[..end]
}
