//! Resolve and load hooks for importing modules from http(s) locators.
//!
//! A host module system consults two hooks per import:
//!
//! - **resolve** turns a specifier plus its parent context into a canonical
//!   locator, or defers to the rest of the host chain
//! - **load** turns a locator into a format tag and raw source bytes, or
//!   defers
//!
//! Both hooks return tagged outcomes ([`Resolution`], [`LoadOutcome`]) and
//! offer `*_with` dispatchers that call the host's `next` continuation when
//! they defer. Fetching goes through the [`Transport`] trait; see the
//! `urlmod-http` crate for the reqwest-backed implementation.
//!
//! # Quick Start
//!
//! ```no_run
//! use urlmod_core::{HookConfig, LoadContext, ParentContext, Resolution, UrlModuleHooks};
//! # use urlmod_core::{Locator, Transport, TransportError, TransportResponse};
//! # struct MyTransport;
//! # #[async_trait::async_trait]
//! # impl Transport for MyTransport {
//! #     async fn fetch(&self, _: &Locator) -> Result<TransportResponse, TransportError> {
//! #         Ok(TransportResponse::new(200, "OK", b"export {}".to_vec()))
//! #     }
//! # }
//!
//! # async fn example() -> anyhow::Result<()> {
//! let hooks = UrlModuleHooks::new(HookConfig::default(), MyTransport);
//!
//! let context = ParentContext::new().with_parent("https://example.com/app/main.mjs");
//! if let Resolution::Resolved(module) = hooks.resolve("./dep.mjs", context)? {
//!     let outcome = hooks.load(&module.url, LoadContext::new()).await?;
//!     println!("{:?}", outcome.loaded().map(|m| m.format));
//! }
//! # Ok(())
//! # }
//! ```
//!
//! # Configuration
//!
//! | Environment Variable | Description |
//! |---------------------|-------------|
//! | `URLMOD_CJS_FORMAT` | `.cjs` classification: `commonjs` (default) or `module` |
//! | `URLMOD_BARE_PARENT` | bare specifiers under a network parent: `forward` (default) or `detach` |

pub mod config;
pub mod context;
pub mod error;
pub mod format;
pub mod hooks;
pub mod load;
pub mod locator;
pub mod outcome;
pub mod resolve;
pub mod transport;

pub use config::HookConfig;
pub use context::{LoadContext, ParentContext};
pub use error::{HookError, HookResult};
pub use format::{CommonJsPolicy, ModuleFormat};
pub use hooks::UrlModuleHooks;
pub use load::NetworkLoader;
pub use locator::{is_network_addressed, is_relative_reference, Locator, SpecifierKind};
pub use outcome::{
    DeferredLoad, DeferredResolve, LoadOutcome, LoadedModule, Resolution, ResolvedModule,
};
pub use resolve::{BareSpecifierParent, NetworkResolver};
pub use transport::{Transport, TransportError, TransportResponse};
