//! Serde data-file structs for life-support profile definitions.
//!
//! These structs define the on-disk format for supplies, rules, and
//! converters. They are deserialized from RON, TOML, or JSON profile
//! files and then resolved into core types by [`crate::Profile::resolve`].

use habitat_core::converter::Converter;
use habitat_core::modifier::Modifier;
use serde::Deserialize;

/// A whole profile file.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ProfileData {
    #[serde(default)]
    pub supplies: Vec<SupplyData>,
    #[serde(default)]
    pub rules: Vec<RuleData>,
    #[serde(default)]
    pub converters: Vec<ConverterData>,
}

/// A resource the profile knows about, with default pod outfitting.
#[derive(Debug, Clone, Deserialize)]
pub struct SupplyData {
    pub resource: String,
    /// Units granted per crew seat when outfitting a pod.
    #[serde(default)]
    pub on_pod: f64,
}

/// A crew rule definition in a data file.
#[derive(Debug, Clone, Deserialize)]
pub struct RuleData {
    pub name: String,
    pub input: String,
    #[serde(default)]
    pub output: Option<String>,
    /// Units of output produced per unit of input consumed.
    #[serde(default = "default_ratio")]
    pub ratio: f64,
    pub rate: f64,
    /// Seconds between firings; zero (the default) means continuous.
    #[serde(default)]
    pub interval: f64,
    #[serde(default)]
    pub modifiers: Vec<Modifier>,
}

fn default_ratio() -> f64 {
    1.0
}

/// A converter instance: a device name plus its variant.
#[derive(Debug, Clone, Deserialize)]
pub struct ConverterData {
    pub name: String,
    pub kind: Converter,
}
