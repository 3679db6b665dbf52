//! Module format classification from locator suffixes.
//!
//! Network responses carry no trustworthy content type, so the path suffix
//! is the only signal used:
//!
//! | Suffix | Format |
//! |--------|--------|
//! | `.json` | `json` |
//! | `.mjs` | `module` |
//! | `.wasm` | `wasm` |
//! | `.cjs` | `commonjs` (or `module`, see [`CommonJsPolicy`]) |
//! | anything else | `module` |

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::HookError;
use crate::locator::Locator;

/// How the host must parse fetched source.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ModuleFormat {
    /// ES module.
    Module,

    /// CommonJS.
    CommonJs,

    /// JSON document.
    Json,

    /// WebAssembly binary.
    Wasm,
}

impl ModuleFormat {
    /// Classify a path (or any string) by suffix.
    pub fn from_path(path: &str, commonjs: CommonJsPolicy) -> Self {
        if path.ends_with(".json") {
            Self::Json
        } else if path.ends_with(".mjs") {
            Self::Module
        } else if path.ends_with(".wasm") {
            Self::Wasm
        } else if path.ends_with(".cjs") {
            match commonjs {
                CommonJsPolicy::Distinct => Self::CommonJs,
                CommonJsPolicy::AsModule => Self::Module,
            }
        } else {
            Self::Module
        }
    }

    /// Classify a locator by its URL path; query and fragment are ignored.
    pub fn from_locator(locator: &Locator, commonjs: CommonJsPolicy) -> Self {
        Self::from_path(locator.path(), commonjs)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Module => "module",
            Self::CommonJs => "commonjs",
            Self::Json => "json",
            Self::Wasm => "wasm",
        }
    }

    /// Whether the source is meant to be read as text.
    pub fn is_text(&self) -> bool {
        !matches!(self, Self::Wasm)
    }
}

impl fmt::Display for ModuleFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ModuleFormat {
    type Err = HookError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "module" => Ok(Self::Module),
            "commonjs" => Ok(Self::CommonJs),
            "json" => Ok(Self::Json),
            "wasm" => Ok(Self::Wasm),
            other => Err(HookError::Config {
                message: format!("unknown module format '{}'", other),
            }),
        }
    }
}

/// Whether `.cjs` gets its own format.
///
/// Some hosts only accept ES modules from non-file sources; `AsModule`
/// folds `.cjs` into the default instead.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum CommonJsPolicy {
    #[default]
    Distinct,
    AsModule,
}

impl FromStr for CommonJsPolicy {
    type Err = HookError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "commonjs" | "distinct" => Ok(Self::Distinct),
            "module" | "as-module" => Ok(Self::AsModule),
            other => Err(HookError::Config {
                message: format!("unknown .cjs policy '{}' (expected commonjs or module)", other),
            }),
        }
    }
}
