//! Sequential website analysis through the proxy.

use std::fmt;

use reqwest::StatusCode;
use serde::de::DeserializeOwned;
use thiserror::Error;
use url::Url;

use super::seo::analyze_seo;
use super::types::{
    DomainSummary, IpSummary, PageSpeedEnvelope, PerformanceSummary, ReportView, WhoisEnvelope,
};
use crate::config::MAX_RESPONSE_BODY_SIZE;
use crate::utils::sanitize_error_message;
use crate::validation::{extract_host, normalize_website_url};

/// One stage of an analysis, named the way the user sees it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnalysisStep {
    IpInformation,
    DomainInformation,
    PageSpeedInformation,
    PageContent,
}

impl fmt::Display for AnalysisStep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            AnalysisStep::IpInformation => "IP information",
            AnalysisStep::DomainInformation => "domain information",
            AnalysisStep::PageSpeedInformation => "page speed information",
            AnalysisStep::PageContent => "page content",
        })
    }
}

/// Reasons an analysis stops.
#[derive(Error, Debug)]
pub enum AnalysisError {
    #[error("Please enter a website URL")]
    EmptyInput,

    #[error("Invalid URL format. Please enter a valid website URL.")]
    InvalidUrl,

    /// The proxy (or the page) answered with a non-success status.
    #[error("Failed to fetch {step}: {reason}")]
    Rejected { step: AnalysisStep, reason: String },

    #[error("Failed to fetch {step}: {message}")]
    Transport { step: AnalysisStep, message: String },

    #[error("Failed to fetch {step}: unexpected response format")]
    MalformedResponse { step: AnalysisStep },

    #[error("Failed to fetch {step}: response exceeds {limit} bytes")]
    TooLarge { step: AnalysisStep, limit: usize },
}

impl AnalysisError {
    /// The text shown to the user when an analysis fails.
    pub fn user_message(&self) -> String {
        match self {
            AnalysisError::EmptyInput | AnalysisError::InvalidUrl => self.to_string(),
            _ => format!("Sorry, something went wrong. {self}"),
        }
    }

    fn rejected(step: AnalysisStep, status: StatusCode) -> Self {
        AnalysisError::Rejected {
            step,
            reason: status
                .canonical_reason()
                .unwrap_or_else(|| status.as_str())
                .to_string(),
        }
    }

    fn transport(step: AnalysisStep, error: reqwest::Error) -> Self {
        AnalysisError::Transport {
            step,
            message: sanitize_error_message(&error.without_url().to_string()),
        }
    }
}

/// Client side of the proxy: runs the four analysis steps for one website.
#[derive(Debug, Clone)]
pub struct Analyzer {
    client: reqwest::Client,
    proxy_base: Url,
}

impl Analyzer {
    pub fn new(client: reqwest::Client, proxy_base: Url) -> Self {
        Self { client, proxy_base }
    }

    /// Analyzes `input`, stopping at the first failed step.
    ///
    /// Steps run strictly in order (geolocation, registration, performance,
    /// then the page itself), so a failure means no later request is sent.
    ///
    /// # Errors
    ///
    /// Returns the `AnalysisError` of the first step that failed.
    pub async fn analyze(&self, input: &str) -> Result<ReportView, AnalysisError> {
        if input.trim().is_empty() {
            return Err(AnalysisError::EmptyInput);
        }
        let website = normalize_website_url(input).ok_or(AnalysisError::InvalidUrl)?;
        let host = extract_host(&website).ok_or(AnalysisError::InvalidUrl)?;

        log::info!("Analyzing {} (host {})", website, host);

        let ip: IpSummary = self
            .fetch_json(AnalysisStep::IpInformation, self.api_url(&["ipinfo", &host], None)?)
            .await?;

        let whois: WhoisEnvelope = self
            .fetch_json(
                AnalysisStep::DomainInformation,
                self.api_url(&["whois", &host], None)?,
            )
            .await?;

        let pagespeed: PageSpeedEnvelope = self
            .fetch_json(
                AnalysisStep::PageSpeedInformation,
                self.api_url(&["pagespeed"], Some(("url", &website)))?,
            )
            .await?;

        let html = self.fetch_page(&website).await?;
        let seo = analyze_seo(&html);

        Ok(ReportView {
            website,
            ip,
            domain: DomainSummary::from(whois),
            performance: PerformanceSummary::from(pagespeed),
            seo,
        })
    }

    fn api_url(&self, segments: &[&str], query: Option<(&str, &str)>) -> Result<Url, AnalysisError> {
        let mut url = self.proxy_base.clone();
        url.path_segments_mut()
            .map_err(|_| AnalysisError::InvalidUrl)?
            .pop_if_empty()
            .push("api")
            .extend(segments);
        if let Some((key, value)) = query {
            url.query_pairs_mut().append_pair(key, value);
        }
        Ok(url)
    }

    async fn fetch_json<T: DeserializeOwned>(
        &self,
        step: AnalysisStep,
        url: Url,
    ) -> Result<T, AnalysisError> {
        log::debug!("Requesting {}", step);
        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| AnalysisError::transport(step, e))?;

        let status = response.status();
        if !status.is_success() {
            log::warn!("Fetching {} failed with status {}", step, status);
            return Err(AnalysisError::rejected(step, status));
        }

        let body = response
            .bytes()
            .await
            .map_err(|e| AnalysisError::transport(step, e))?;
        serde_json::from_slice(&body).map_err(|e| {
            log::warn!("Unexpected {} payload: {}", step, e);
            AnalysisError::MalformedResponse { step }
        })
    }

    async fn fetch_page(&self, website: &str) -> Result<String, AnalysisError> {
        let step = AnalysisStep::PageContent;
        let response = self
            .client
            .get(website)
            .send()
            .await
            .map_err(|e| AnalysisError::transport(step, e))?;

        let status = response.status();
        if !status.is_success() {
            return Err(AnalysisError::rejected(step, status));
        }

        // Reject early when the declared size is already over the cap
        if let Some(length) = response.content_length() {
            if length > MAX_RESPONSE_BODY_SIZE as u64 {
                log::warn!("Page body of {} bytes exceeds the size limit", length);
                return Err(AnalysisError::TooLarge {
                    step,
                    limit: MAX_RESPONSE_BODY_SIZE,
                });
            }
        }

        let body = read_capped(response, step, MAX_RESPONSE_BODY_SIZE).await?;
        Ok(String::from_utf8_lossy(&body).into_owned())
    }
}

/// Reads the response body chunk by chunk, giving up once it grows past
/// `limit` bytes. Covers chunked responses that declare no length.
async fn read_capped(
    mut response: reqwest::Response,
    step: AnalysisStep,
    limit: usize,
) -> Result<Vec<u8>, AnalysisError> {
    let mut body = Vec::new();
    while let Some(chunk) = response
        .chunk()
        .await
        .map_err(|e| AnalysisError::transport(step, e))?
    {
        if body.len() + chunk.len() > limit {
            log::warn!("Page body exceeds the size limit of {} bytes", limit);
            return Err(AnalysisError::TooLarge { step, limit });
        }
        body.extend_from_slice(&chunk);
    }
    Ok(body)
}
