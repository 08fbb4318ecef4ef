use anyhow::{Result, anyhow};
use isolang::Language;

/// Language utilities for destination language codes
///
/// Translation backends accept an ISO 639-1 (2-letter) or ISO 639-3
/// (3-letter) code, optionally followed by a region or script subtag such
/// as `zh-cn` or `pt_BR`. This module validates such tags and resolves a
/// human-readable language name for logging.
/// Language code type of the primary subtag
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LanguageCodeType {
    /// ISO 639-1 (2-letter) code
    Part1,
    /// ISO 639-3 (3-letter) code
    Part3,
    /// Legacy code still accepted by translation backends
    Legacy,
}

/// A parsed destination language tag
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LanguageTag {
    /// Lowercase primary language subtag
    pub primary: String,
    /// Lowercase region or script subtag, if any
    pub region: Option<String>,
    /// Kind of code used for the primary subtag
    pub code_type: LanguageCodeType,
}

impl LanguageTag {
    /// Tag in the form sent to the backend: `primary` or `primary-region`
    pub fn to_code(&self) -> String {
        match &self.region {
            Some(region) => format!("{}-{}", self.primary, region),
            None => self.primary.clone(),
        }
    }
}

/// Legacy ISO 639-1 codes still used by Google Translate, mapped to their
/// current equivalents
fn legacy_equivalent(code: &str) -> Option<&'static str> {
    match code {
        "iw" => Some("he"), // Hebrew
        "jw" => Some("jv"), // Javanese
        "in" => Some("id"), // Indonesian
        _ => None,
    }
}

/// Validate a destination language tag such as `ru`, `eng` or `zh-cn`
pub fn validate_language_code(code: &str) -> Result<LanguageTag> {
    let normalized = code.trim().to_lowercase().replace('_', "-");
    let mut parts = normalized.splitn(2, '-');
    let primary = parts.next().unwrap_or_default().to_string();
    let region = parts.next().map(str::to_string);

    if let Some(region) = &region {
        if region.is_empty() || !region.chars().all(|c| c.is_ascii_alphanumeric() || c == '-') {
            return Err(anyhow!("Invalid language code: {}", code));
        }
    }

    let code_type = match primary.len() {
        2 if Language::from_639_1(&primary).is_some() => LanguageCodeType::Part1,
        2 if legacy_equivalent(&primary).is_some() => LanguageCodeType::Legacy,
        3 if Language::from_639_3(&primary).is_some() => LanguageCodeType::Part3,
        _ => return Err(anyhow!("Invalid language code: {}", code)),
    };

    Ok(LanguageTag {
        primary,
        region,
        code_type,
    })
}

/// Get the English language name for a tag
pub fn get_language_name(code: &str) -> Result<String> {
    let tag = validate_language_code(code)?;
    let language = match tag.code_type {
        LanguageCodeType::Part1 => Language::from_639_1(&tag.primary),
        LanguageCodeType::Part3 => Language::from_639_3(&tag.primary),
        LanguageCodeType::Legacy => legacy_equivalent(&tag.primary).and_then(Language::from_639_1),
    }
    .ok_or_else(|| anyhow!("Failed to get language from code: {}", code))?;

    Ok(language.to_name().to_string())
}
