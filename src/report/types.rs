//! Report data structures.
//!
//! The upstream payload types mirror only the fields the report shows; every
//! other field of the provider's JSON is ignored.

use std::collections::HashMap;
use std::fmt;

use serde::Deserialize;

/// Geolocation section.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct IpSummary {
    pub ip: Option<String>,
    pub city: Option<String>,
    pub region: Option<String>,
    pub country: Option<String>,
    pub org: Option<String>,
}

/// Domain registration section.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DomainSummary {
    pub domain_name: Option<String>,
    pub registrar: Option<String>,
    pub created_date: Option<String>,
    pub updated_date: Option<String>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct WhoisEnvelope {
    #[serde(rename = "WhoisRecord")]
    pub(crate) whois_record: WhoisRecord,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct WhoisRecord {
    pub(crate) domain_name: Option<String>,
    pub(crate) registrar_name: Option<String>,
    pub(crate) created_date_normalized: Option<String>,
    pub(crate) updated_date_normalized: Option<String>,
}

impl From<WhoisEnvelope> for DomainSummary {
    fn from(envelope: WhoisEnvelope) -> Self {
        let record = envelope.whois_record;
        DomainSummary {
            domain_name: record.domain_name,
            registrar: record.registrar_name,
            created_date: record.created_date_normalized,
            updated_date: record.updated_date_normalized,
        }
    }
}

/// Page performance section.
#[derive(Debug, Clone, PartialEq)]
pub struct PerformanceSummary {
    /// Lighthouse performance score scaled to 0-100; absent when the
    /// Lighthouse run itself failed
    pub performance_score: Option<f64>,
    pub first_contentful_paint: Option<String>,
    pub speed_index: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct PageSpeedEnvelope {
    pub(crate) lighthouse_result: LighthouseResult,
}

#[derive(Debug, Deserialize)]
pub(crate) struct LighthouseResult {
    pub(crate) categories: LighthouseCategories,
    #[serde(default)]
    pub(crate) audits: HashMap<String, LighthouseAudit>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct LighthouseCategories {
    pub(crate) performance: LighthouseCategory,
}

#[derive(Debug, Deserialize)]
pub(crate) struct LighthouseCategory {
    #[serde(default)]
    pub(crate) score: Option<f64>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct LighthouseAudit {
    pub(crate) display_value: Option<String>,
}

impl From<PageSpeedEnvelope> for PerformanceSummary {
    fn from(envelope: PageSpeedEnvelope) -> Self {
        let result = envelope.lighthouse_result;
        let display = |audit: &str| {
            result
                .audits
                .get(audit)
                .and_then(|a| a.display_value.clone())
        };
        PerformanceSummary {
            performance_score: result.categories.performance.score.map(|s| s * 100.0),
            first_contentful_paint: display("first-contentful-paint"),
            speed_index: display("speed-index"),
        }
    }
}

/// Outcome of the meta-tag heuristic.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SeoScore {
    Good,
    NeedsImprovement,
}

impl fmt::Display for SeoScore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            SeoScore::Good => "Good",
            SeoScore::NeedsImprovement => "Needs Improvement",
        })
    }
}

/// SEO section.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SeoAnalysis {
    pub meta_tag_count: usize,
    pub score: SeoScore,
}

/// The combined report for one analysis.
#[derive(Debug, Clone, PartialEq)]
pub struct ReportView {
    pub website: String,
    pub ip: IpSummary,
    pub domain: DomainSummary,
    pub performance: PerformanceSummary,
    pub seo: SeoAnalysis,
}

fn or_na(value: &Option<String>) -> &str {
    value.as_deref().unwrap_or("N/A")
}

impl fmt::Display for ReportView {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Analysis of {}", self.website)?;
        writeln!(f)?;
        writeln!(f, "IP and Location Info")?;
        writeln!(f, "  IP Address: {}", or_na(&self.ip.ip))?;
        writeln!(
            f,
            "  Location: {}, {}, {}",
            or_na(&self.ip.city),
            or_na(&self.ip.region),
            or_na(&self.ip.country)
        )?;
        writeln!(f, "  Organization: {}", or_na(&self.ip.org))?;
        writeln!(f)?;
        writeln!(f, "Domain Info")?;
        writeln!(f, "  Domain Name: {}", or_na(&self.domain.domain_name))?;
        writeln!(f, "  Registrar: {}", or_na(&self.domain.registrar))?;
        writeln!(f, "  Created Date: {}", or_na(&self.domain.created_date))?;
        writeln!(f, "  Updated Date: {}", or_na(&self.domain.updated_date))?;
        writeln!(f)?;
        writeln!(f, "Performance Info")?;
        match self.performance.performance_score {
            Some(score) => writeln!(f, "  Performance Score: {}", score.round())?,
            None => writeln!(f, "  Performance Score: N/A")?,
        }
        writeln!(
            f,
            "  First Contentful Paint: {}",
            or_na(&self.performance.first_contentful_paint)
        )?;
        writeln!(f, "  Speed Index: {}", or_na(&self.performance.speed_index))?;
        writeln!(f)?;
        writeln!(f, "SEO Analysis")?;
        write!(
            f,
            "  SEO Score: {} ({} meta tags)",
            self.seo.score, self.seo.meta_tag_count
        )
    }
}
