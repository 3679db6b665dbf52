//! Resolve hook.
//!
//! Decision table, first match wins:
//! 1. `http(s)://` specifier → terminal, specifier verbatim
//! 2. parent absent or not a network locator → defer, context unchanged
//! 3. `./` or `../` specifier → terminal, joined against the parent
//! 4. anything else (bare names, builtins) → defer

use std::str::FromStr;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::context::ParentContext;
use crate::error::{HookError, HookResult};
use crate::locator::{is_network_addressed, Locator, SpecifierKind};
use crate::outcome::{DeferredResolve, Resolution, ResolvedModule};

/// What happens to a network parent when a bare specifier is deferred.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum BareSpecifierParent {
    /// Forward the context unchanged.
    #[default]
    Forward,

    /// Drop the parent locator so the host resolves the name from its own
    /// root instead of from a URL it cannot search.
    Detach,
}

impl FromStr for BareSpecifierParent {
    type Err = HookError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "forward" => Ok(Self::Forward),
            "detach" => Ok(Self::Detach),
            other => Err(HookError::Config {
                message: format!(
                    "unknown bare specifier parent policy '{}' (expected forward or detach)",
                    other
                ),
            }),
        }
    }
}

/// Resolves network specifiers; defers everything else.
#[derive(Debug, Clone, Copy, Default)]
pub struct NetworkResolver {
    bare_parent: BareSpecifierParent,
}

impl NetworkResolver {
    pub fn new(bare_parent: BareSpecifierParent) -> Self {
        Self { bare_parent }
    }

    pub fn bare_parent(&self) -> BareSpecifierParent {
        self.bare_parent
    }

    /// Decide on a resolve request.
    ///
    /// # Examples
    ///
    /// ```
    /// use urlmod_core::{NetworkResolver, ParentContext, Resolution};
    ///
    /// let resolver = NetworkResolver::default();
    /// let context = ParentContext::new().with_parent("https://example.com/a/b.mjs");
    ///
    /// match resolver.resolve("../c.mjs", context).unwrap() {
    ///     Resolution::Resolved(module) => assert_eq!(module.url, "https://example.com/c.mjs"),
    ///     Resolution::Deferred(_) => unreachable!(),
    /// }
    /// ```
    pub fn resolve(&self, specifier: &str, context: ParentContext) -> HookResult<Resolution> {
        let kind = SpecifierKind::classify(specifier);

        if kind == SpecifierKind::Network {
            // Validate, but hand back exactly what was written.
            Locator::parse(specifier)?;
            debug!(specifier = %specifier, kind = %kind, "resolved network specifier");
            return Ok(Resolution::Resolved(ResolvedModule::terminal(specifier)));
        }

        let Some(parent) = context
            .parent_locator()
            .filter(|parent| is_network_addressed(parent))
        else {
            debug!(
                specifier = %specifier,
                kind = %kind,
                parent = ?context.parent_locator(),
                "local parent, deferring"
            );
            return Ok(defer(specifier, context));
        };

        if kind == SpecifierKind::Relative {
            // Only a relative specifier needs the parent as a URL.
            let parent = Locator::parse(parent)?;
            let locator = parent.join(specifier)?;
            debug!(
                specifier = %specifier,
                parent = %parent,
                locator = %locator,
                "resolved relative specifier against network parent"
            );
            return Ok(Resolution::Resolved(ResolvedModule::terminal(String::from(
                locator,
            ))));
        }

        debug!(
            specifier = %specifier,
            kind = %kind,
            parent = %parent,
            policy = ?self.bare_parent,
            "bare specifier under network parent, deferring"
        );
        let context = match self.bare_parent {
            BareSpecifierParent::Forward => context,
            BareSpecifierParent::Detach => context.without_parent(),
        };
        Ok(defer(specifier, context))
    }

    /// Resolve, calling `next` exactly once if this hook defers.
    ///
    /// Errors returned by `next` are passed through untouched; this hook's
    /// own errors are converted with `E: From<HookError>`.
    pub fn resolve_with<F, E>(
        &self,
        specifier: &str,
        context: ParentContext,
        next: F,
    ) -> Result<ResolvedModule, E>
    where
        F: FnOnce(String, ParentContext) -> Result<ResolvedModule, E>,
        E: From<HookError>,
    {
        match self.resolve(specifier, context)? {
            Resolution::Resolved(module) => Ok(module),
            Resolution::Deferred(request) => next(request.specifier, request.context),
        }
    }
}

fn defer(specifier: &str, context: ParentContext) -> Resolution {
    Resolution::Deferred(DeferredResolve {
        specifier: specifier.to_string(),
        context,
    })
}
