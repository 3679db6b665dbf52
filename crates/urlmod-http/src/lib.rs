//! HTTP transport for the urlmod resolve/load hooks.
//!
//! Wires [`urlmod_core::NetworkLoader`] to a reqwest client (rustls).
//!
//! # Quick Start
//!
//! ```no_run
//! use urlmod_core::{LoadContext, ParentContext, Resolution};
//! use urlmod_http::hooks_from_env;
//!
//! # async fn example() -> anyhow::Result<()> {
//! let hooks = hooks_from_env()?;
//!
//! if let Resolution::Resolved(module) =
//!     hooks.resolve("https://esm.example.com/pkg/index.mjs", ParentContext::new())?
//! {
//!     let outcome = hooks.load(&module.url, LoadContext::new()).await?;
//!     if let Some(loaded) = outcome.loaded() {
//!         println!("{} bytes of {}", loaded.source.len(), loaded.format);
//!     }
//! }
//! # Ok(())
//! # }
//! ```
//!
//! # Configuration
//!
//! | Environment Variable | Description |
//! |---------------------|-------------|
//! | `URLMOD_HTTP_TIMEOUT` | Request timeout in seconds (default: none) |
//! | `URLMOD_HTTP_USER_AGENT` | `User-Agent` header (default: `urlmod/<version>`) |
//! | `URLMOD_HTTP_MAX_REDIRECTS` | Redirect limit (default: 10) |
//!
//! plus the hook variables documented in `urlmod-core`.

pub mod client;
pub mod config;

pub use client::HttpTransport;
pub use config::{HttpTransportConfig, USER_AGENT_VALUE};

use urlmod_core::{HookConfig, HookResult, NetworkLoader, UrlModuleHooks};

/// Load hook fetching over HTTP(S).
pub type HttpModuleLoader = NetworkLoader<HttpTransport>;

/// Resolve and load hooks fetching over HTTP(S).
pub type HttpModuleHooks = UrlModuleHooks<HttpTransport>;

/// Build both hooks.
pub fn hooks(config: HookConfig, transport: HttpTransportConfig) -> HookResult<HttpModuleHooks> {
    Ok(UrlModuleHooks::new(config, HttpTransport::new(transport)?))
}

/// Build both hooks from environment variables.
pub fn hooks_from_env() -> HookResult<HttpModuleHooks> {
    hooks(HookConfig::from_env()?, HttpTransportConfig::from_env()?)
}
