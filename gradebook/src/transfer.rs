//! Portable JSON export/import of the whole document.
//!
//! Import runs every check before producing a document so a rejected payload
//! can never replace good state:
//!
//! 1. JSON parse
//! 2. JSON Schema (`schemas/document.v1.schema.json`): `semesters` array of
//!    `{ id, name, courses }` objects
//! 3. Typed deserialization of every course
//! 4. Document invariants (unique ids)

use anyhow::{Context, Result};
use jsonschema::validator_for;
use serde_json::Value;
use thiserror::Error;
use tracing::{debug, warn};

use crate::core::invariants::validate_invariants;
use crate::record::Document;

const DOCUMENT_SCHEMA: &str = include_str!("../schemas/document.v1.schema.json");

/// Why an import payload was rejected.
#[derive(Debug, Error)]
pub enum ImportError {
    #[error("import is not valid JSON: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("import does not match the document schema:\n- {}", .0.join("\n- "))]
    Schema(Vec<String>),

    #[error("import has a malformed course or semester: {0}")]
    Shape(String),

    #[error("import violates document invariants:\n- {}", .0.join("\n- "))]
    Invariants(Vec<String>),
}

/// Serialize the document as pretty-printed JSON with a trailing newline.
pub fn export(document: &Document) -> Result<String> {
    let mut buf = serde_json::to_string_pretty(document).context("serialize document")?;
    buf.push('\n');
    Ok(buf)
}

/// Validate and decode an exported document.
///
/// `lastSelectedSemester` is accepted and dropped; selection state is not
/// part of the document.
pub fn import(text: &str) -> Result<Document, ImportError> {
    let document = decode(text)?;
    let errors = validate_invariants(&document);
    if !errors.is_empty() {
        return Err(ImportError::Invariants(errors));
    }
    Ok(document)
}

/// Decode previously persisted state: parse, schema and typed checks only.
///
/// Invariant violations are logged rather than rejected so a stored document
/// is adopted as written.
pub fn restore(text: &str) -> Result<Document, ImportError> {
    let document = decode(text)?;
    for error in validate_invariants(&document) {
        warn!(%error, "stored document violates invariant");
    }
    Ok(document)
}

fn decode(text: &str) -> Result<Document, ImportError> {
    let value: Value = serde_json::from_str(text)?;
    validate_schema(&value)?;
    let document: Document =
        serde_json::from_value(value).map_err(|err| ImportError::Shape(err.to_string()))?;
    debug!(
        semesters = document.semesters.len(),
        courses = document.course_count(),
        "document decoded"
    );
    Ok(document)
}

fn validate_schema(instance: &Value) -> Result<(), ImportError> {
    let schema: Value = serde_json::from_str(DOCUMENT_SCHEMA)?;
    let compiled = validator_for(&schema)
        .map_err(|err| ImportError::Schema(vec![format!("invalid schema: {err}")]))?;
    let messages: Vec<String> = compiled
        .iter_errors(instance)
        .map(|err| err.to_string())
        .collect();
    if !messages.is_empty() {
        return Err(ImportError::Schema(messages));
    }
    Ok(())
}
