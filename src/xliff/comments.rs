//! Removal of XML comments left inside `<target>` elements.
//!
//! Works on the raw text rather than the parsed tree so everything outside
//! the targets stays byte for byte as it was.

use once_cell::sync::Lazy;
use regex::{Captures, Regex};

static TARGET_ELEMENT: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?s)(<(?:[\w.\-]+:)?target(?:\s[^>]*[^/>])?\s*>)(.*?)(</(?:[\w.\-]+:)?target\s*>)")
        .expect("valid target regex")
});
static COMMENT: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?s)<!--.*?-->").expect("valid comment regex"));

/// Drop blank lines, except one directly following a line with content
fn collapse_blank_lines(text: &str) -> String {
    let mut kept: Vec<&str> = Vec::new();
    for line in text.split('\n') {
        let keep = !line.trim().is_empty() || kept.last().is_some_and(|last| !last.trim().is_empty());
        if keep {
            kept.push(line);
        }
    }
    kept.join("\n")
}

/// Remove every comment inside non-empty `<target>` elements and tidy the
/// blank lines they leave behind. Self-closing targets are not touched.
pub fn strip_target_comments(content: &str) -> String {
    TARGET_ELEMENT
        .replace_all(content, |caps: &Captures| {
            let inner = COMMENT.replace_all(&caps[2], "");
            format!("{}{}{}", &caps[1], collapse_blank_lines(&inner), &caps[3])
        })
        .into_owned()
}
