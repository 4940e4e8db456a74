//! Parameter and result types shared by the analyses and the report layer

mod params;
mod results;

pub use params::{AnalysisParameters, CostModel, MemoryModel};
pub use results::{CostResult, MemoryResult, QueryResult, TruncatedQueryResult};
