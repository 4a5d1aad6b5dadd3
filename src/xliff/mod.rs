/*!
 * XLIFF 1.2 document handling.
 *
 * - `document`: order-preserving XML tree with parse and serialize
 * - `model`: `file` and `trans-unit` access on top of the tree
 * - `walker`: the translation and Cyrillic passes over a document
 * - `comments`: cleanup of comments inside `<target>` elements
 */

pub use self::comments::strip_target_comments;
pub use self::document::{Element, Node, XmlDocument, XML_DECLARATION};
pub use self::model::{TransUnit, XliffDocument, STATE_FINAL, XLIFF_NAMESPACE};
pub use self::walker::{
    cyrillize_document, is_already_cyrillic, translate_document, CyrillicOptions, CyrillicReport,
    CyrillicStatus, TranslateReport,
};

pub mod comments;
pub mod document;
pub mod model;
pub mod walker;
