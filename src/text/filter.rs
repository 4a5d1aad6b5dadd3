/*!
 * Segment filter deciding which source texts are worth a translation request.
 *
 * Technical strings (placeholders, numbers, addresses, short codes) are left
 * verbatim so the translation endpoint cannot mangle them. The rules are a
 * heuristic: real one to three letter words are skipped as well.
 */

use once_cell::sync::Lazy;
use regex::Regex;

static PLACEHOLDER: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^(?:%[sd]|[%\d\s_.\-])+$").expect("valid placeholder regex"));
static IP_ADDRESS: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\d+\.\d+\.\d+\.\d+$").expect("valid address regex"));
static UPPER_CASE_CODE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[A-Z]{2,3}$").expect("valid code regex"));
static SHORT_TOKEN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[a-zA-Z]{1,3}$").expect("valid token regex"));

/// Why a segment is not sent for translation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkipReason {
    /// Only digits, whitespace, `%`, `-`, `_`, `.` or `%s`/`%d` tokens
    Placeholder,
    /// A dotted quad such as `192.168.1.1`
    IpAddress,
    /// Two or three upper-case letters, e.g. a currency code
    UpperCaseCode,
    /// One to three letters, usually an abbreviation
    ShortToken,
}

/// Return the reason a segment should be kept verbatim, if any
pub fn skip_reason(text: &str) -> Option<SkipReason> {
    if PLACEHOLDER.is_match(text) {
        Some(SkipReason::Placeholder)
    } else if IP_ADDRESS.is_match(text) {
        Some(SkipReason::IpAddress)
    } else if UPPER_CASE_CODE.is_match(text) {
        Some(SkipReason::UpperCaseCode)
    } else if SHORT_TOKEN.is_match(text) {
        Some(SkipReason::ShortToken)
    } else {
        None
    }
}

/// Returns true if the segment should go to the translation provider
pub fn should_translate(text: &str) -> bool {
    skip_reason(text).is_none()
}
