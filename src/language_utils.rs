use anyhow::{Result, anyhow};
use isolang::Language;
use log::{debug, warn};
use std::collections::BTreeMap;
use std::path::Path;

use crate::app_config::LANGUAGE_FILE;
use crate::errors::ConfigError;
use crate::file_utils::FileManager;

/// Language utilities for SMI and ISO language code handling
///
/// This module maps the language classes found in SMI files (`KRCC`, `ENCC`,
/// ...) to the codes written into ASS files, and validates those codes
/// against ISO 639-1 (2-letter) and ISO 639-2 (3-letter).
/// Key of the mandatory fallback entry
pub const UNKNOWN_CODE_KEY: &str = "UNKNOWNCC";

/// Language code type
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LanguageCodeType {
    /// ISO 639-1 (2-letter) code
    Part1,
    /// ISO 639-2/T (3-letter) code
    Part2T,
    /// ISO 639-2/B (3-letter) code
    Part2B,
    /// ISO 639-2 reserved code (`und`, `mul`, `zxx`, `mis`)
    Special,
}

/// Validate if a language code is a valid ISO 639-1 or ISO 639-2 code
pub fn validate_language_code(code: &str) -> Result<LanguageCodeType> {
    let normalized_code = code.trim().to_lowercase();

    // Check for ISO 639-1 (2-letter) code
    if normalized_code.len() == 2 {
        if Language::from_639_1(&normalized_code).is_some() {
            return Ok(LanguageCodeType::Part1);
        }
    }
    // Check for ISO 639-2 (3-letter) code
    else if normalized_code.len() == 3 {
        if Language::from_639_3(&normalized_code).is_some() {
            return Ok(LanguageCodeType::Part2T);
        }

        match normalized_code.as_str() {
            "fre" | "ger" | "dut" | "gre" | "chi" | "cze" | "ice" | "alb" | "arm" | "baq"
            | "bur" | "per" | "geo" | "may" | "mac" | "rum" | "slo" | "wel" => {
                return Ok(LanguageCodeType::Part2B);
            }
            "und" | "mul" | "zxx" | "mis" => return Ok(LanguageCodeType::Special),
            _ => {}
        }
    }

    Err(anyhow!("Invalid language code: {}", code))
}

/// Get the English language name for an ISO code
pub fn get_language_name(code: &str) -> Result<String> {
    let normalized = code.trim().to_lowercase();
    let lang = match normalized.len() {
        2 => Language::from_639_1(&normalized),
        3 => Language::from_639_3(&normalized),
        _ => None,
    }
    .ok_or_else(|| anyhow!("Failed to get language from code: {}", code))?;

    Ok(lang.to_name().to_string())
}

/// SMI→ASS language-code table with a guaranteed fallback entry
#[derive(Debug, Clone)]
pub struct LanguageTable {
    codes: BTreeMap<String, String>,
    fallback: String,
}

impl LanguageTable {
    /// Build a table from raw entries. Keys are upper-cased.
    ///
    /// `source` names where the entries came from and only shows up in
    /// error messages.
    pub fn from_map(entries: BTreeMap<String, String>, source: &str) -> Result<Self, ConfigError> {
        let codes: BTreeMap<String, String> = entries
            .into_iter()
            .map(|(k, v)| (k.trim().to_uppercase(), v))
            .collect();

        let fallback = codes
            .get(UNKNOWN_CODE_KEY)
            .cloned()
            .ok_or_else(|| ConfigError::MissingFallback {
                key: UNKNOWN_CODE_KEY,
                file: source.to_string(),
            })?;

        Ok(Self { codes, fallback })
    }

    /// Load `lan_code.json` from the setting directory
    pub fn load(dir: &Path) -> Result<Self, ConfigError> {
        let entries: BTreeMap<String, String> = FileManager::load_json(dir, LANGUAGE_FILE)?;
        let table = Self::from_map(entries, &dir.join(LANGUAGE_FILE).display().to_string())?;
        debug!("Loaded {} language codes from {:?}", table.len(), dir);
        Ok(table)
    }

    /// Resolve an SMI language code, falling back to `UNKNOWNCC` on a miss
    pub fn resolve(&self, code: &str) -> String {
        match self.lookup(code) {
            Some(found) => found.to_string(),
            None => {
                warn!(
                    "Language code \"{}\" is not found, please add language code to \"{}\"",
                    code, LANGUAGE_FILE
                );
                self.fallback.clone()
            }
        }
    }

    /// Exact lookup without fallback
    pub fn lookup(&self, code: &str) -> Option<&str> {
        self.codes.get(&code.trim().to_uppercase()).map(String::as_str)
    }

    /// Code used for unmapped languages
    pub fn fallback(&self) -> &str {
        &self.fallback
    }

    pub fn len(&self) -> usize {
        self.codes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.codes.is_empty()
    }

    /// All mappings, ordered by SMI code
    pub fn entries(&self) -> impl Iterator<Item = (&str, &str)> {
        self.codes.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Mappings whose target is not an ISO 639 code. The fallback is exempt.
    pub fn unrecognized_codes(&self) -> Vec<(&str, &str)> {
        self.entries()
            .filter(|(k, _)| *k != UNKNOWN_CODE_KEY)
            .filter(|(_, v)| validate_language_code(v).is_err())
            .collect()
    }
}
