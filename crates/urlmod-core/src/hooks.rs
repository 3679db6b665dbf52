//! Resolver and loader bundled for registration with a host.

use crate::config::HookConfig;
use crate::context::{LoadContext, ParentContext};
use crate::error::HookResult;
use crate::load::NetworkLoader;
use crate::outcome::{LoadOutcome, Resolution};
use crate::resolve::NetworkResolver;
use crate::transport::Transport;

/// Both hooks sharing one configuration.
#[derive(Debug, Clone)]
pub struct UrlModuleHooks<T> {
    resolver: NetworkResolver,
    loader: NetworkLoader<T>,
}

impl<T: Transport> UrlModuleHooks<T> {
    pub fn new(config: HookConfig, transport: T) -> Self {
        Self {
            resolver: NetworkResolver::new(config.bare_parent),
            loader: NetworkLoader::with_policy(transport, config.commonjs),
        }
    }

    /// Hooks configured from the environment (see [`HookConfig::from_env`]).
    pub fn from_env(transport: T) -> HookResult<Self> {
        Ok(Self::new(HookConfig::from_env()?, transport))
    }

    pub fn resolver(&self) -> &NetworkResolver {
        &self.resolver
    }

    pub fn loader(&self) -> &NetworkLoader<T> {
        &self.loader
    }

    pub fn resolve(&self, specifier: &str, context: ParentContext) -> HookResult<Resolution> {
        self.resolver.resolve(specifier, context)
    }

    pub async fn load(&self, locator: &str, context: LoadContext) -> HookResult<LoadOutcome> {
        self.loader.load(locator, context).await
    }
}
