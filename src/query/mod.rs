// Query module for filtering and aggregation
// Author: Gabriel Demetrios Lafis

mod filter;
mod report;

pub use filter::*;
pub use report::*;
