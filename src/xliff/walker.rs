/*!
 * Per-document passes over the trans-units of an XLIFF file.
 *
 * `translate_document` fills empty or untranslated targets through the
 * translation service. `cyrillize_document` moves a Latin-script document to
 * Cyrillic, transliterating existing targets and translating missing ones.
 * Both passes only touch the in-memory document; writing it back is up to the
 * caller.
 */

use indicatif::ProgressBar;
use log::{debug, warn};

use crate::language_utils::{base_language, tags_match};
use crate::text::{contains_cyrillic, contains_latin, latin_to_cyrillic};
use crate::translation::{SegmentOutcome, TranslationService};
use crate::xliff::model::{STATE_FINAL, XliffDocument};

/// Outcome of a translation pass
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TranslateReport {
    /// Trans-units in the document
    pub total_units: usize,
    /// Targets written with a new translation
    pub translated: usize,
}

/// Settings for the Cyrillic pass
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CyrillicOptions {
    /// Tag written to `target-language`, e.g. `uz-Cyrl`
    pub target_tag: String,
    /// Language requested from the provider for missing targets
    pub base_language: String,
}

impl CyrillicOptions {
    /// Options for a tag, requesting its primary subtag (`uz-Cyrl` -> `uz`)
    pub fn for_tag(target_tag: impl Into<String>) -> Self {
        let target_tag = target_tag.into();
        let base_language = base_language(&target_tag).to_string();
        Self {
            target_tag,
            base_language,
        }
    }
}

/// Whether a document needed work
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CyrillicStatus {
    /// Tag and every target already Cyrillic, document untouched
    AlreadyConverted,
    /// Nothing to change
    Unchanged,
    /// The document was modified and should be saved
    Updated,
}

/// Outcome of a Cyrillic pass
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CyrillicReport {
    pub status: CyrillicStatus,
    /// Existing Latin targets rewritten in Cyrillic
    pub transliterated: usize,
    /// Missing targets filled from a fresh translation
    pub translated: usize,
    /// Missing targets left alone because the provider failed
    pub failed: usize,
}

impl CyrillicReport {
    fn new(status: CyrillicStatus) -> Self {
        Self {
            status,
            transliterated: 0,
            translated: 0,
            failed: 0,
        }
    }

    /// Returns true if the document should be written back
    pub fn is_updated(&self) -> bool {
        self.status == CyrillicStatus::Updated
    }
}

/// Fill empty or untranslated targets with translations of their source
///
/// Every `<file>` gets `target-language` set to `target_language`. Units
/// lacking either `<source>` or `<target>` are left alone.
pub async fn translate_document(
    doc: &mut XliffDocument,
    service: &TranslationService,
    target_language: &str,
    progress: &ProgressBar,
) -> TranslateReport {
    doc.set_target_language(target_language);

    let units = doc.units();
    let mut report = TranslateReport {
        total_units: units.len(),
        translated: 0,
    };
    progress.set_length(units.len() as u64);

    for unit in units {
        progress.inc(1);

        let (Some(source), Some(target)) = (unit.source.as_deref(), unit.target.as_deref()) else {
            continue;
        };
        if !target.is_empty() && target != source {
            continue;
        }

        let translated = service.translate_text(source, target_language).await;
        if translated != source && doc.set_target(unit.index, &translated, None) {
            report.translated += 1;
        }
    }

    report
}

/// Returns true if the document is tagged Cyrillic and has nothing left to do
///
/// Every non-empty target must contain Cyrillic, and every unit with source
/// text must have a target, so units whose translation failed on an earlier
/// run are retried.
pub fn is_already_cyrillic(doc: &XliffDocument, target_tag: &str) -> bool {
    let tagged = doc.file_count() > 0
        && doc
            .target_languages()
            .into_iter()
            .all(|tag| tag.is_some_and(|tag| tags_match(tag, target_tag)));

    tagged
        && doc.units().iter().all(|unit| {
            let target = unit.target_text();
            if target.is_empty() {
                unit.source_text().trim().is_empty()
            } else {
                contains_cyrillic(target)
            }
        })
}

/// Convert a document to Cyrillic
///
/// Cyrillic targets are kept, Latin targets are transliterated, and missing
/// or empty targets are translated to `options.base_language` and then
/// transliterated, with `state="final"`. A failed translation leaves the unit
/// as it was. The status is `Updated` only when a unit changed; retagging alone
/// does not ask for a rewrite.
pub async fn cyrillize_document(
    doc: &mut XliffDocument,
    service: &TranslationService,
    options: &CyrillicOptions,
    progress: &ProgressBar,
) -> CyrillicReport {
    if is_already_cyrillic(doc, &options.target_tag) {
        return CyrillicReport::new(CyrillicStatus::AlreadyConverted);
    }

    let mut report = CyrillicReport::new(CyrillicStatus::Unchanged);
    let mut changed = false;
    doc.set_target_language(&options.target_tag);

    let units = doc.units();
    progress.set_length(units.len() as u64);

    for unit in units {
        progress.inc(1);
        let target = unit.target_text();

        if !target.is_empty() {
            if contains_cyrillic(target) || !contains_latin(target) {
                continue;
            }
            let converted = latin_to_cyrillic(target);
            if converted != target && doc.set_target(unit.index, &converted, None) {
                report.transliterated += 1;
                changed = true;
            }
            continue;
        }

        let source = unit.source_text();
        if source.trim().is_empty() {
            continue;
        }

        let segment = service.translate_segment(source, &options.base_language).await;
        if segment.outcome == SegmentOutcome::Failed {
            warn!(
                "Leaving unit {} without a target, translation failed",
                unit.id.as_deref().unwrap_or("?")
            );
            report.failed += 1;
            continue;
        }

        let converted = latin_to_cyrillic(&segment.text);
        if doc.set_target(unit.index, &converted, Some(STATE_FINAL)) {
            debug!("'{}' -> '{}'", source, converted);
            match segment.outcome {
                SegmentOutcome::Translated => report.translated += 1,
                _ => report.transliterated += 1,
            }
            changed = true;
        }
    }

    if changed {
        report.status = CyrillicStatus::Updated;
    }
    report
}
