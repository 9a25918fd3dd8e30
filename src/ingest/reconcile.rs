// Schema reconciliation: the single column-count gate
// Author: Gabriel Demetrios Lafis

use crate::data::{RawRow, RawTable, RejectReason, RejectedRow};

/// Partition raw rows into accepted and rejected
///
/// A row is accepted iff its token count exactly equals the header column
/// count; no type checking is performed. Every parse strategy funnels its
/// output through this one rule, so the cascade stays consistent no matter
/// which strategy produced the table.
pub fn reconcile(table: &RawTable) -> (Vec<RawRow>, Vec<RejectedRow>) {
    let expected = table.headers.len();
    let mut accepted = Vec::new();
    let mut rejected = Vec::new();

    for row in &table.rows {
        if row.fields.len() == expected {
            accepted.push(row.clone());
        } else {
            rejected.push(RejectedRow {
                line: row.line,
                fields: row.fields.clone(),
                reason: RejectReason::FieldCountMismatch {
                    expected,
                    found: row.fields.len(),
                },
            });
        }
    }

    (accepted, rejected)
}
