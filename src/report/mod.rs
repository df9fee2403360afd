//! Website analysis report.
//!
//! The analyzer calls the proxy for geolocation, registration and performance
//! data, fetches the page to score its meta tags, and combines everything into
//! a [`ReportView`].

mod analyzer;
mod seo;
mod types;

pub use analyzer::{AnalysisError, AnalysisStep, Analyzer};
pub use seo::{analyze_seo, count_meta_tags};
pub use types::{
    DomainSummary, IpSummary, PerformanceSummary, ReportView, SeoAnalysis, SeoScore,
};
