//! Upstream provider definitions and request URL construction.

use strum_macros::EnumIter;
use url::Url;

use crate::config::{Credential, Credentials, UpstreamEndpoints};
use crate::error_handling::{FailureCategory, ProxyError};

/// The third-party services the proxy relays to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, EnumIter)]
pub enum Provider {
    /// IP geolocation (ipinfo.io)
    IpInfo,
    /// Domain registration (WhoisXML API)
    Whois,
    /// Page performance (Google PageSpeed Insights)
    PageSpeed,
}

impl Provider {
    /// Short label used in log lines.
    pub fn label(&self) -> &'static str {
        match self {
            Provider::IpInfo => "ipinfo",
            Provider::Whois => "whois",
            Provider::PageSpeed => "pagespeed",
        }
    }

    pub fn endpoint<'a>(&self, endpoints: &'a UpstreamEndpoints) -> &'a Url {
        match self {
            Provider::IpInfo => &endpoints.ipinfo,
            Provider::Whois => &endpoints.whois,
            Provider::PageSpeed => &endpoints.pagespeed,
        }
    }

    pub fn credential<'a>(&self, credentials: &'a Credentials) -> &'a Credential {
        match self {
            Provider::IpInfo => &credentials.ipinfo,
            Provider::Whois => &credentials.whois,
            Provider::PageSpeed => &credentials.pagespeed,
        }
    }

    /// Builds the outbound request URL for an already validated identifier.
    ///
    /// The identifier is always inserted through `url`'s encoders, as one path
    /// segment or one query value, never by string interpolation.
    ///
    /// - IpInfo: `{base}/{identifier}/json?token={credential}`
    /// - Whois: `{base}?apiKey={credential}&domainName={identifier}&outputFormat=JSON`
    /// - PageSpeed: `{base}?url={identifier}&key={credential}`
    ///
    /// # Errors
    ///
    /// Returns `UpstreamUnreachable(MalformedRequest)` if the base URL cannot
    /// carry path segments.
    pub fn lookup_url(
        &self,
        base: &Url,
        identifier: &str,
        credential: &Credential,
    ) -> Result<Url, ProxyError> {
        let mut url = base.clone();
        match self {
            Provider::IpInfo => {
                url.path_segments_mut()
                    .map_err(|_| ProxyError::UpstreamUnreachable(FailureCategory::MalformedRequest))?
                    .pop_if_empty()
                    .push(identifier)
                    .push("json");
                url.query_pairs_mut()
                    .append_pair("token", credential.expose());
            }
            Provider::Whois => {
                url.query_pairs_mut()
                    .append_pair("apiKey", credential.expose())
                    .append_pair("domainName", identifier)
                    .append_pair("outputFormat", "JSON");
            }
            Provider::PageSpeed => {
                url.query_pairs_mut()
                    .append_pair("url", identifier)
                    .append_pair("key", credential.expose());
            }
        }
        Ok(url)
    }
}

impl std::fmt::Display for Provider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}
