/*!
 * Uzbek Latin to Uzbek Cyrillic transliteration.
 *
 * The rule table is applied in order as whole-string substring replacements.
 * Order matters in both directions: digraphs must precede their letters, and
 * an earlier rule wins where two multi-character rules overlap (`o‘` before
 * `Yo` turns "Yo‘q" into "Йўқ"). Every replacement is Cyrillic, so no rule's
 * output can feed a later rule.
 */

/// Ordered (Latin, Cyrillic) rules. Case-sensitive: there is no folding.
pub const TRANSLITERATION_RULES: &[(&str, &str)] = &[
    // Digraphs and marked letters
    ("sh", "ш"), ("ch", "ч"), ("ya", "я"), ("yu", "ю"), ("yo", "ё"), ("o‘", "ў"), ("g‘", "ғ"),
    // Marked letters written with the other apostrophe variants
    ("o'", "ў"), ("oʼ", "ў"), ("o’", "ў"), ("g'", "ғ"), ("gʼ", "ғ"), ("g’", "ғ"),
    ("O'", "Ў"), ("Oʼ", "Ў"), ("O’", "Ў"), ("G'", "Ғ"), ("Gʼ", "Ғ"), ("G’", "Ғ"),
    ("Sh", "Ш"), ("Ch", "Ч"), ("Ya", "Я"), ("Yu", "Ю"), ("Yo", "Ё"), ("O‘", "Ў"), ("G‘", "Ғ"),
    // Single letters
    ("a", "а"), ("b", "б"), ("d", "д"), ("e", "э"), ("f", "ф"), ("g", "г"), ("h", "ҳ"),
    ("i", "и"), ("j", "ж"), ("k", "к"), ("l", "л"), ("m", "м"), ("n", "н"), ("o", "о"),
    ("p", "п"), ("q", "қ"), ("r", "р"), ("s", "с"), ("t", "т"), ("u", "у"), ("v", "в"),
    ("x", "х"), ("y", "й"), ("z", "з"), ("A", "А"), ("B", "Б"), ("D", "Д"), ("E", "Э"),
    ("F", "Ф"), ("G", "Г"), ("H", "Ҳ"), ("I", "И"), ("J", "Ж"), ("K", "К"), ("L", "Л"),
    ("M", "М"), ("N", "Н"), ("O", "О"), ("P", "П"), ("Q", "Қ"), ("R", "Р"), ("S", "С"),
    ("T", "Т"), ("U", "У"), ("V", "В"), ("X", "Х"), ("Y", "Й"), ("Z", "З"),
    // Apostrophes become the hard sign
    ("'", "ъ"), ("ʼ", "ъ"), ("’", "ъ"),
];

fn starts_a_rule(c: char) -> bool {
    c.is_ascii_alphabetic() || matches!(c, '\'' | 'ʼ' | '’')
}

/// Transliterate Uzbek Latin text to Uzbek Cyrillic.
///
/// Characters no rule covers (Cyrillic, digits, punctuation, `c`, `w`, ...)
/// are copied unchanged, so text without Latin letters or apostrophes comes
/// back identical.
pub fn latin_to_cyrillic(text: &str) -> String {
    if !text.chars().any(starts_a_rule) {
        return text.to_string();
    }

    TRANSLITERATION_RULES
        .iter()
        .fold(text.to_string(), |acc, (latin, cyrillic)| {
            if acc.contains(latin) {
                acc.replace(latin, cyrillic)
            } else {
                acc
            }
        })
}
