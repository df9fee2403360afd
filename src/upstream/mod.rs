//! Upstream providers.
//!
//! The proxy knows three providers (geolocation, registration, performance).
//! [`Relay`] builds the outbound URL with the server-held credential and
//! forwards one request per lookup; responses are never interpreted.

mod provider;
mod relay;

pub use provider::Provider;
pub use relay::{Relay, UpstreamReply};
