//! Courier Result Carriers
//!
//! Every courier operation answers with one of these values. A failure is
//! never raised to the caller; it travels inside the result as a
//! `CourierError`. A carrier holds either its success value or errors,
//! never both.

use base64::Engine;
use bytes::Bytes;
use thiserror::Error;

// ============================================================================
// Errors
// ============================================================================

/// Failure category of a courier operation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    Transport,
    Decode,
    NotFound,
    Unexpected,
}

/// Error attached to a failed courier result
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CourierError {
    /// The provider answered with a non-2xx status
    #[error("{message}")]
    Transport { status: u16, message: String },

    /// A JSON body was expected and could not be parsed
    #[error("{0}")]
    Decode(String),

    /// The lookup answered, but not with exactly one matching shipment
    #[error("{0}")]
    NotFound(String),

    /// Anything else (network, local I/O)
    #[error("{message}")]
    Unexpected { message: String, code: i32 },
}

impl CourierError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            CourierError::Transport { .. } => ErrorKind::Transport,
            CourierError::Decode(_) => ErrorKind::Decode,
            CourierError::NotFound(_) => ErrorKind::NotFound,
            CourierError::Unexpected { .. } => ErrorKind::Unexpected,
        }
    }

    /// Numeric code: HTTP status for transport errors, pass-through code for
    /// unexpected ones, zero otherwise
    pub fn code(&self) -> i32 {
        match self {
            CourierError::Transport { status, .. } => i32::from(*status),
            CourierError::Unexpected { code, .. } => *code,
            _ => 0,
        }
    }
}

// ============================================================================
// Shipment Response
// ============================================================================

/// Result of a shipment operation (create or resolve)
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Response {
    shipment_id: Option<String>,
    tracking_id: Option<String>,
    errors: Vec<CourierError>,
}

impl Response {
    /// Successful result. Either identifier may legitimately be absent
    /// (creation does not yield a tracking number).
    pub fn success(shipment_id: Option<String>, tracking_id: Option<String>) -> Self {
        Response {
            shipment_id,
            tracking_id,
            errors: Vec::new(),
        }
    }

    /// Failed result carrying exactly one error and no identifiers
    pub fn failure(error: CourierError) -> Self {
        Response {
            shipment_id: None,
            tracking_id: None,
            errors: vec![error],
        }
    }

    pub fn shipment_id(&self) -> Option<&str> {
        self.shipment_id.as_deref()
    }

    pub fn tracking_id(&self) -> Option<&str> {
        self.tracking_id.as_deref()
    }

    pub fn errors(&self) -> &[CourierError] {
        &self.errors
    }

    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }

    pub fn first_error(&self) -> Option<&CourierError> {
        self.errors.first()
    }

    /// Convert into `(shipment_id, tracking_id)` or the first error
    pub fn into_result(self) -> Result<(Option<String>, Option<String>), CourierError> {
        match self.errors.into_iter().next() {
            Some(err) => Err(err),
            None => Ok((self.shipment_id, self.tracking_id)),
        }
    }
}

// ============================================================================
// Labels
// ============================================================================

/// Label output format
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum LabelFormat {
    #[default]
    Pdf,
    Zpl,
    Epl,
}

impl LabelFormat {
    pub fn as_str(&self) -> &'static str {
        match self {
            LabelFormat::Pdf => "pdf",
            LabelFormat::Zpl => "zpl",
            LabelFormat::Epl => "epl",
        }
    }
}

impl std::fmt::Display for LabelFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Label content as returned by the courier (usually base64 text)
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Label {
    Content(String),
    Failed(Vec<CourierError>),
}

impl Label {
    pub fn failure(error: CourierError) -> Self {
        Label::Failed(vec![error])
    }

    pub fn content(&self) -> Option<&str> {
        match self {
            Label::Content(content) => Some(content.as_str()),
            Label::Failed(_) => None,
        }
    }

    pub fn errors(&self) -> &[CourierError] {
        match self {
            Label::Content(_) => &[],
            Label::Failed(errors) => errors.as_slice(),
        }
    }

    pub fn has_errors(&self) -> bool {
        !self.errors().is_empty()
    }

    pub fn first_error(&self) -> Option<&CourierError> {
        self.errors().first()
    }

    /// Decode base64 label content into raw document bytes
    ///
    /// Returns `None` for failed labels or content that is not base64.
    pub fn decode_base64(&self) -> Option<Vec<u8>> {
        let content = self.content()?;
        base64::engine::general_purpose::STANDARD
            .decode(content.trim())
            .ok()
    }

    pub fn into_result(self) -> Result<String, CourierError> {
        match self {
            Label::Content(content) => Ok(content),
            Label::Failed(errors) => Err(first_or_unexpected(errors)),
        }
    }
}

/// Raw label document bytes
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LabelFile {
    Data(Bytes),
    Failed(Vec<CourierError>),
}

impl LabelFile {
    pub fn failure(error: CourierError) -> Self {
        LabelFile::Failed(vec![error])
    }

    pub fn data(&self) -> Option<&[u8]> {
        match self {
            LabelFile::Data(data) => Some(data.as_ref()),
            LabelFile::Failed(_) => None,
        }
    }

    pub fn errors(&self) -> &[CourierError] {
        match self {
            LabelFile::Data(_) => &[],
            LabelFile::Failed(errors) => errors.as_slice(),
        }
    }

    pub fn has_errors(&self) -> bool {
        !self.errors().is_empty()
    }

    pub fn first_error(&self) -> Option<&CourierError> {
        self.errors().first()
    }

    pub fn into_result(self) -> Result<Bytes, CourierError> {
        match self {
            LabelFile::Data(data) => Ok(data),
            LabelFile::Failed(errors) => Err(first_or_unexpected(errors)),
        }
    }
}

fn first_or_unexpected(errors: Vec<CourierError>) -> CourierError {
    errors.into_iter().next().unwrap_or(CourierError::Unexpected {
        message: "label request failed".to_string(),
        code: 0,
    })
}
