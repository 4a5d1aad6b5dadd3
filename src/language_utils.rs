/*!
 * Language utilities for language tag handling.
 *
 * XLIFF `target-language` values are BCP 47-style tags such as `uz`,
 * `uz-UZ` or `uz-Cyrl`. The translation endpoint only understands the
 * primary language subtag, and the ISO 639 checks run on that subtag too.
 */

use anyhow::{Result, anyhow};
use isolang::Language;

/// Language code type
#[derive(Debug, PartialEq, Eq)]
pub enum LanguageCodeType {
    /// ISO 639-1 (2-letter) code
    Part1,
    /// ISO 639-3 (3-letter) code
    Part3,
}

/// Return the primary language subtag of a tag (`uz-Cyrl` -> `uz`, `en_US` -> `en`)
pub fn base_language(tag: &str) -> &str {
    let tag = tag.trim();
    tag.split(['-', '_']).next().unwrap_or(tag)
}

/// Compare two tags ignoring case and the `-`/`_` separator
pub fn tags_match(left: &str, right: &str) -> bool {
    let normalize = |tag: &str| tag.trim().replace('_', "-").to_lowercase();
    normalize(left) == normalize(right)
}

/// Validate that the primary subtag of a tag is an ISO 639-1 or ISO 639-3 code
pub fn validate_language_code(code: &str) -> Result<LanguageCodeType> {
    let normalized_code = base_language(code).to_lowercase();

    match normalized_code.len() {
        2 if Language::from_639_1(&normalized_code).is_some() => Ok(LanguageCodeType::Part1),
        3 if Language::from_639_3(&normalized_code).is_some() => Ok(LanguageCodeType::Part3),
        _ => Err(anyhow!("Invalid language code: {}", code)),
    }
}

/// Get the English name of the language a tag refers to
pub fn get_language_name(code: &str) -> Result<String> {
    let normalized_code = base_language(code).to_lowercase();

    let language = match normalized_code.len() {
        2 => Language::from_639_1(&normalized_code),
        3 => Language::from_639_3(&normalized_code),
        _ => None,
    };

    language
        .map(|lang| lang.to_name().to_string())
        .ok_or_else(|| anyhow!("Unknown language code: {}", code))
}
