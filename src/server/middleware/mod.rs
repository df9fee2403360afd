//! Router middleware.

mod access_log;
mod origin;

pub use access_log::access_log;
pub use origin::origin_policy;
