// Raw table structures produced by the parse strategies
// Author: Gabriel Demetrios Lafis

use std::fmt;

use serde::Serialize;

/// An unvalidated header-and-rows table extracted by one parse strategy
///
/// Headers are order-significant and, coming from an external source, not
/// guaranteed unique. Rows are raw token vectors of arbitrary length; the
/// schema reconciler decides which of them are usable.
#[derive(Debug, Clone)]
pub struct RawTable {
    pub headers: Vec<String>,
    pub rows: Vec<RawRow>,
}

impl RawTable {
    /// Create a raw table with the given headers and no rows
    pub fn new(headers: Vec<String>) -> Self {
        RawTable {
            headers,
            rows: Vec::new(),
        }
    }

    /// Get the number of raw rows
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Check if the table has no rows
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

/// A raw row with its 1-based source line number
#[derive(Debug, Clone)]
pub struct RawRow {
    /// 1-based line number in the source; the header is line 1
    pub line: usize,
    pub fields: Vec<String>,
}

impl RawRow {
    /// Create a raw row
    pub fn new(line: usize, fields: Vec<String>) -> Self {
        RawRow { line, fields }
    }
}

/// Why a raw row was rejected by the schema reconciler
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum RejectReason {
    /// Token count does not match the header column count
    FieldCountMismatch { expected: usize, found: usize },
}

impl fmt::Display for RejectReason {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            RejectReason::FieldCountMismatch { expected, found } => {
                write!(f, "expected {} fields, found {}", expected, found)
            }
        }
    }
}

/// A raw row rejected during reconciliation, retained for diagnostics only
#[derive(Debug, Clone)]
pub struct RejectedRow {
    /// 1-based line number in the source
    pub line: usize,
    pub fields: Vec<String>,
    pub reason: RejectReason,
}
