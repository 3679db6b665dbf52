//! Specifier classification and network locators.
//!
//! Classification is purely textual:
//! - `https://cdn.example.com/lib.mjs` → network-addressed
//! - `./util.mjs`, `../shared/index.mjs` → relative reference
//! - `lodash`, `node:fs`, `/abs/path.mjs`, `http:foo` → opaque (host business)

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use url::Url;

use crate::error::{HookError, HookResult};

const NETWORK_PREFIXES: [&str; 2] = ["http://", "https://"];
const RELATIVE_PREFIXES: [&str; 2] = ["./", "../"];

/// Whether `input` names a network resource.
///
/// Only the `scheme://` form counts; `http:foo` is left to the host.
pub fn is_network_addressed(input: &str) -> bool {
    NETWORK_PREFIXES
        .iter()
        .any(|prefix| input.starts_with(prefix))
}

/// Whether `input` is a `./` or `../` reference.
pub fn is_relative_reference(input: &str) -> bool {
    RELATIVE_PREFIXES
        .iter()
        .any(|prefix| input.starts_with(prefix))
}

/// Kind of a specifier as written in importing code.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SpecifierKind {
    /// Absolute `http://` or `https://` URL.
    Network,

    /// `./` or `../` reference.
    Relative,

    /// Anything else: bare names, builtin ids, absolute paths, other schemes.
    Opaque,
}

impl SpecifierKind {
    /// Classify a specifier. Every input maps to exactly one kind.
    pub fn classify(specifier: &str) -> Self {
        if is_network_addressed(specifier) {
            Self::Network
        } else if is_relative_reference(specifier) {
            Self::Relative
        } else {
            Self::Opaque
        }
    }
}

impl fmt::Display for SpecifierKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Network => write!(f, "network"),
            Self::Relative => write!(f, "relative"),
            Self::Opaque => write!(f, "opaque"),
        }
    }
}

/// An absolute `http`/`https` URL naming a module's source.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Locator(Url);

impl Locator {
    /// Parse a network locator.
    ///
    /// # Examples
    ///
    /// ```
    /// use urlmod_core::Locator;
    ///
    /// let locator = Locator::parse("https://example.com/a/b.mjs").unwrap();
    /// assert_eq!(locator.path(), "/a/b.mjs");
    ///
    /// // Relative and opaque specifiers are not locators.
    /// assert!(Locator::parse("./b.mjs").is_err());
    /// assert!(Locator::parse("http:b.mjs").is_err());
    /// ```
    pub fn parse(input: &str) -> HookResult<Self> {
        if !is_network_addressed(input) {
            return Err(HookError::InvalidLocator {
                input: input.to_string(),
                reason: "expected an absolute http:// or https:// URL".to_string(),
            });
        }

        let url = Url::parse(input).map_err(|e| HookError::InvalidLocator {
            input: input.to_string(),
            reason: e.to_string(),
        })?;

        Self::from_url(url)
    }

    /// Wrap an already-parsed URL, rejecting non-network schemes.
    pub fn from_url(url: Url) -> HookResult<Self> {
        match url.scheme() {
            "http" | "https" if url.has_host() => Ok(Self(url)),
            scheme => Err(HookError::InvalidLocator {
                input: url.to_string(),
                reason: format!("unsupported scheme '{}'", scheme),
            }),
        }
    }

    /// Resolve `reference` against this locator using URL relative-resolution
    /// rules (path merging, dot-segment removal, query/fragment replacement).
    pub fn join(&self, reference: &str) -> HookResult<Self> {
        let url = self.0.join(reference).map_err(|e| HookError::InvalidLocator {
            input: reference.to_string(),
            reason: format!("cannot resolve against {}: {}", self.0, e),
        })?;

        Self::from_url(url)
    }

    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }

    pub fn as_url(&self) -> &Url {
        &self.0
    }

    /// URL path, without query or fragment.
    pub fn path(&self) -> &str {
        self.0.path()
    }
}

impl fmt::Display for Locator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.0.as_str())
    }
}

impl FromStr for Locator {
    type Err = HookError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl TryFrom<String> for Locator {
    type Error = HookError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<Locator> for String {
    fn from(locator: Locator) -> Self {
        locator.0.into()
    }
}

impl AsRef<str> for Locator {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}
