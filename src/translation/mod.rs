/*!
 * Translation service for XLIFF segments.
 *
 * - `core`: the service wrapping a provider with skip rules and best-effort
 *   error handling
 */

// Re-export main types for easier usage
pub use self::core::{create_provider, SegmentOutcome, SegmentTranslation, TranslationService};

// Submodules
pub mod core;
