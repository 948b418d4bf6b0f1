//! JSON encoding of the database document.
//!
//! Decoding is lenient: an absent blob and a blob that does not parse as a
//! database document both mean "no database".

use tracing::warn;

use crate::error::StorageError;
use crate::types::DatabaseDocument;

/// Serialize a document to its stored textual form.
pub fn encode_document(doc: &DatabaseDocument) -> Result<String, StorageError> {
    serde_json::to_string(doc).map_err(|e| {
        StorageError::Serialization(format!("failed to serialize database document: {e}"))
    })
}

/// Deserialize a stored blob. Returns `None` when the blob is absent or malformed.
pub fn decode_document(name: &str, blob: Option<&str>) -> Option<DatabaseDocument> {
    let blob = blob?;
    match serde_json::from_str::<DatabaseDocument>(blob) {
        Ok(doc) => Some(doc),
        Err(e) => {
            warn!(database = name, error = %e, "ignoring malformed database document");
            None
        }
    }
}
