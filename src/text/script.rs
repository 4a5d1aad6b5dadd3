/*!
 * Script detection for translated segments.
 *
 * The classification is computed from the text every time it is asked for;
 * targets change during a pass, so nothing is cached.
 */

/// Which scripts a piece of text contains
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScriptClass {
    /// Cyrillic code points only (digits and punctuation allowed)
    Cyrillic,
    /// ASCII letters only
    Latin,
    /// Both Cyrillic code points and ASCII letters
    Mixed,
    /// Neither, e.g. numbers, punctuation or other scripts
    Neither,
}

/// Check whether a character is in the Cyrillic block (U+0400..=U+04FF)
pub fn is_cyrillic_char(c: char) -> bool {
    ('\u{0400}'..='\u{04FF}').contains(&c)
}

/// Returns true if the text contains at least one Cyrillic code point
pub fn contains_cyrillic(text: &str) -> bool {
    text.chars().any(is_cyrillic_char)
}

/// Returns true if the text contains at least one ASCII letter
pub fn contains_latin(text: &str) -> bool {
    text.chars().any(|c| c.is_ascii_alphabetic())
}

/// Classify the scripts present in a text
pub fn classify(text: &str) -> ScriptClass {
    match (contains_cyrillic(text), contains_latin(text)) {
        (true, true) => ScriptClass::Mixed,
        (true, false) => ScriptClass::Cyrillic,
        (false, true) => ScriptClass::Latin,
        (false, false) => ScriptClass::Neither,
    }
}
