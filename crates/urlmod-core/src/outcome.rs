//! Hook outcomes.
//!
//! Each hook either decides (terminal, short-circuiting the rest of the
//! chain) or defers with the request it wants the rest of the chain to see.
//! The enums make "decided and deferred" unrepresentable.

use serde::{Deserialize, Serialize};

use crate::context::{LoadContext, ParentContext};
use crate::error::{HookError, HookResult};
use crate::format::ModuleFormat;

/// A resolved module locator.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResolvedModule {
    /// Canonical locator of the module.
    pub url: String,

    /// Skip any remaining resolvers.
    pub short_circuit: bool,
}

impl ResolvedModule {
    /// Terminal decision of this layer.
    pub fn terminal(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            short_circuit: true,
        }
    }
}

/// Request handed to the next resolver.
#[derive(Debug, Clone, PartialEq)]
pub struct DeferredResolve {
    pub specifier: String,
    pub context: ParentContext,
}

/// Outcome of the resolve hook.
#[derive(Debug, Clone, PartialEq)]
pub enum Resolution {
    Resolved(ResolvedModule),
    Deferred(DeferredResolve),
}

impl Resolution {
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Resolved(_))
    }

    pub fn resolved(&self) -> Option<&ResolvedModule> {
        match self {
            Self::Resolved(module) => Some(module),
            Self::Deferred(_) => None,
        }
    }

    pub fn deferred(&self) -> Option<&DeferredResolve> {
        match self {
            Self::Resolved(_) => None,
            Self::Deferred(request) => Some(request),
        }
    }
}

/// Module source ready for the host to parse.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoadedModule {
    pub format: ModuleFormat,

    /// Raw response bytes, never transcoded.
    pub source: Vec<u8>,

    /// Skip any remaining loaders.
    pub short_circuit: bool,
}

impl LoadedModule {
    /// Terminal decision of this layer.
    pub fn terminal(format: ModuleFormat, source: Vec<u8>) -> Self {
        Self {
            format,
            source,
            short_circuit: true,
        }
    }

    /// Decode the source as UTF-8 for text formats.
    ///
    /// Invalid bytes are an error, never replaced.
    pub fn source_text(&self, locator: &str) -> HookResult<&str> {
        std::str::from_utf8(&self.source).map_err(|e| HookError::Decode {
            locator: locator.to_string(),
            message: e.to_string(),
        })
    }
}

/// Request handed to the next loader.
#[derive(Debug, Clone, PartialEq)]
pub struct DeferredLoad {
    pub locator: String,
    pub context: LoadContext,
}

/// Outcome of the load hook.
#[derive(Debug, Clone, PartialEq)]
pub enum LoadOutcome {
    Loaded(LoadedModule),
    Deferred(DeferredLoad),
}

impl LoadOutcome {
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Loaded(_))
    }

    pub fn loaded(&self) -> Option<&LoadedModule> {
        match self {
            Self::Loaded(module) => Some(module),
            Self::Deferred(_) => None,
        }
    }

    pub fn deferred(&self) -> Option<&DeferredLoad> {
        match self {
            Self::Loaded(_) => None,
            Self::Deferred(request) => Some(request),
        }
    }
}
