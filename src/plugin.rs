//! Theme plugin references.
//!
//! Plugins are opaque to this crate: the name identifies the plugin to the
//! external build pipeline and the options are passed through untouched.
//! Both spellings are accepted in config files:
//!
//! ```toml
//! plugins = ["ion"]
//!
//! [[integrations.plugins]]
//! name = "ion"
//! options = { accent = "violet" }
//! ```

use crate::config::ConfigError;
use serde::de::{self, MapAccess, Visitor};
use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;

/// A plugin as written in a config file.
#[derive(Debug, Clone)]
pub enum RawPlugin {
    /// Bare plugin name, no options.
    Name(String),
    Spec(RawPluginSpec),
}

/// Strings become [`RawPlugin::Name`] and tables go through
/// [`RawPluginSpec`], so an unknown key is reported by name.
impl<'de> Deserialize<'de> for RawPlugin {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct RawPluginVisitor;

        impl<'de> Visitor<'de> for RawPluginVisitor {
            type Value = RawPlugin;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("a plugin name or a table with `name` and `options`")
            }

            fn visit_str<E: de::Error>(self, v: &str) -> Result<RawPlugin, E> {
                Ok(RawPlugin::Name(v.to_string()))
            }

            fn visit_string<E: de::Error>(self, v: String) -> Result<RawPlugin, E> {
                Ok(RawPlugin::Name(v))
            }

            fn visit_map<A: MapAccess<'de>>(self, map: A) -> Result<RawPlugin, A::Error> {
                RawPluginSpec::deserialize(de::value::MapAccessDeserializer::new(map))
                    .map(RawPlugin::Spec)
            }
        }

        deserializer.deserialize_any(RawPluginVisitor)
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RawPluginSpec {
    pub name: Option<String>,
    #[serde(default)]
    pub options: Option<serde_json::Value>,
}

/// A validated plugin reference.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PluginSpec {
    pub name: String,
    /// Plugin-owned configuration, `Null` when none was given.
    #[serde(skip_serializing_if = "serde_json::Value::is_null")]
    pub options: serde_json::Value,
}

/// Validate a plugin list, preserving its order.
///
/// `at` is the config path of the list, used in error messages.
pub fn resolve_plugins(raw: Vec<RawPlugin>, at: &str) -> Result<Vec<PluginSpec>, ConfigError> {
    raw.into_iter()
        .enumerate()
        .map(|(i, plugin)| resolve_plugin(plugin, &format!("{at}[{i}]")))
        .collect()
}

fn resolve_plugin(raw: RawPlugin, at: &str) -> Result<PluginSpec, ConfigError> {
    let (name, options) = match raw {
        RawPlugin::Name(name) => (Some(name), None),
        RawPlugin::Spec(spec) => (spec.name, spec.options),
    };
    let name = name.ok_or_else(|| ConfigError::invalid(at, "name is required"))?;
    if name.trim().is_empty() {
        return Err(ConfigError::invalid(at, "name must not be empty"));
    }
    Ok(PluginSpec {
        name,
        options: options.unwrap_or(serde_json::Value::Null),
    })
}
