/*!
 * Text-level helpers used by the XLIFF walker.
 *
 * - `script`: Cyrillic / Latin detection
 * - `transliteration`: Uzbek Latin to Cyrillic rule table
 * - `filter`: heuristics for segments that must not be translated
 */

pub use self::filter::{should_translate, skip_reason, SkipReason};
pub use self::script::{classify, contains_cyrillic, contains_latin, ScriptClass};
pub use self::transliteration::latin_to_cyrillic;

pub mod filter;
pub mod script;
pub mod transliteration;
