/// UI layer: the filter side panel and top bar, plus the chart and table
/// rendering for the central panel. All derivation lives in `crate::data`;
/// these modules only draw what the artifacts describe.

pub mod charts;
pub mod panels;
