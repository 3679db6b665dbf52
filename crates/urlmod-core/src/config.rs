//! Hook configuration.

use serde::{Deserialize, Serialize};

use crate::error::HookResult;
use crate::format::CommonJsPolicy;
use crate::resolve::BareSpecifierParent;

/// Policy knobs for the resolve and load hooks.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct HookConfig {
    /// How `.cjs` locators are classified.
    #[serde(default)]
    pub commonjs: CommonJsPolicy,

    /// What a bare specifier under a network parent defers with.
    #[serde(default)]
    pub bare_parent: BareSpecifierParent,
}

impl HookConfig {
    /// Create config from environment variables.
    ///
    /// | Variable | Description |
    /// |----------|-------------|
    /// | `URLMOD_CJS_FORMAT` | `commonjs` (default) or `module` |
    /// | `URLMOD_BARE_PARENT` | `forward` (default) or `detach` |
    ///
    /// Unset or empty variables fall back to defaults; unknown values are
    /// configuration errors.
    pub fn from_env() -> HookResult<Self> {
        let mut config = Self::default();

        if let Some(value) = env_value("URLMOD_CJS_FORMAT") {
            config.commonjs = value.parse()?;
        }
        if let Some(value) = env_value("URLMOD_BARE_PARENT") {
            config.bare_parent = value.parse()?;
        }

        Ok(config)
    }

    pub fn with_commonjs(mut self, policy: CommonJsPolicy) -> Self {
        self.commonjs = policy;
        self
    }

    pub fn with_bare_parent(mut self, policy: BareSpecifierParent) -> Self {
        self.bare_parent = policy;
        self
    }
}

fn env_value(name: &str) -> Option<String> {
    std::env::var(name).ok().filter(|v| !v.trim().is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::HookError;
    use serial_test::serial;

    fn clear_env() {
        std::env::remove_var("URLMOD_CJS_FORMAT");
        std::env::remove_var("URLMOD_BARE_PARENT");
    }

    #[test]
    #[serial]
    fn test_from_env_defaults() {
        clear_env();
        let config = HookConfig::from_env().unwrap();
        assert_eq!(config, HookConfig::default());
        assert_eq!(config.commonjs, CommonJsPolicy::Distinct);
        assert_eq!(config.bare_parent, BareSpecifierParent::Forward);
    }

    #[test]
    #[serial]
    fn test_from_env_overrides() {
        clear_env();
        std::env::set_var("URLMOD_CJS_FORMAT", "module");
        std::env::set_var("URLMOD_BARE_PARENT", "detach");

        let config = HookConfig::from_env().unwrap();
        assert_eq!(config.commonjs, CommonJsPolicy::AsModule);
        assert_eq!(config.bare_parent, BareSpecifierParent::Detach);
        clear_env();
    }

    #[test]
    #[serial]
    fn test_from_env_rejects_unknown_value() {
        clear_env();
        std::env::set_var("URLMOD_CJS_FORMAT", "esm");
        let result = HookConfig::from_env();
        assert!(matches!(result, Err(HookError::Config { .. })));
        clear_env();
    }

    #[test]
    fn test_builder_and_serde() {
        let config = HookConfig::default()
            .with_commonjs(CommonJsPolicy::AsModule)
            .with_bare_parent(BareSpecifierParent::Detach);

        let json = serde_json::to_value(config).unwrap();
        assert_eq!(
            json,
            serde_json::json!({"commonjs": "as-module", "bare_parent": "detach"})
        );

        let parsed: HookConfig = serde_json::from_str("{}").unwrap();
        assert_eq!(parsed, HookConfig::default());
    }
}
