//! Habitat Profile -- data-driven life-support content.
//!
//! A profile names the resources a station tracks and the rules and
//! converters that move them: how much oxygen a crew member breathes,
//! how often meals fire, what the scrubber reclaims. Profiles are
//! written as RON, TOML, or JSON data files, parsed into
//! [`schema::ProfileData`], and resolved into validated core types.
//!
//! ```rust,ignore
//! let profile = habitat_profile::load_profile(Path::new("data/"))?;
//! for rule in &profile.rules {
//!     rule.apply(&storage, cache, &env, &mut states[rule.name.clone()], elapsed);
//! }
//! ```

use std::collections::HashSet;

use habitat_core::converter::{Converter, ELECTRIC_CHARGE};
use habitat_core::modifier::Modifier;
use habitat_core::rule::Rule;
use habitat_core::storage::Part;

pub mod loader;
pub mod schema;

pub use loader::{Format, ProfileError, find_profile_file, load_profile, parse_profile};

use schema::ProfileData;

// ===========================================================================
// Resolved profile types
// ===========================================================================

/// A resource the profile tracks, with default pod outfitting.
#[derive(Debug, Clone, PartialEq)]
pub struct Supply {
    pub resource: String,
    /// Units granted per crew seat when outfitting a pod.
    pub on_pod: f64,
}

/// A converter instance: device name plus variant.
#[derive(Debug, Clone, PartialEq)]
pub struct NamedConverter {
    pub name: String,
    pub kind: Converter,
}

/// A validated life-support profile.
#[derive(Debug, Clone, Default)]
pub struct Profile {
    pub supplies: Vec<Supply>,
    pub rules: Vec<Rule>,
    pub converters: Vec<NamedConverter>,
}

impl Profile {
    /// Resolve raw file data into a validated profile.
    ///
    /// Checks name uniqueness per kind, positivity of every rate-like
    /// field, and that rules and converters only reference resources a
    /// supply declares.
    pub fn resolve(data: ProfileData) -> Result<Self, ProfileError> {
        let mut declared: HashSet<String> = HashSet::new();
        for supply in &data.supplies {
            if !declared.insert(supply.resource.clone()) {
                return Err(ProfileError::DuplicateName {
                    kind: "supply",
                    name: supply.resource.clone(),
                });
            }
        }

        let check_declared =
            |resource: &str, referenced_by: String| -> Result<(), ProfileError> {
                if declared.contains(resource) {
                    Ok(())
                } else {
                    Err(ProfileError::UnknownResource {
                        resource: resource.to_string(),
                        referenced_by,
                    })
                }
            };

        let mut rule_names: HashSet<String> = HashSet::new();
        let mut rules = Vec::with_capacity(data.rules.len());
        for rule in data.rules {
            if !rule_names.insert(rule.name.clone()) {
                return Err(ProfileError::DuplicateName {
                    kind: "rule",
                    name: rule.name,
                });
            }
            let non_positive = |field| ProfileError::NonPositive {
                kind: "rule",
                name: rule.name.clone(),
                field,
            };
            if rule.rate <= 0.0 {
                return Err(non_positive("rate"));
            }
            if rule.ratio <= 0.0 {
                return Err(non_positive("ratio"));
            }
            if rule.interval < 0.0 {
                return Err(non_positive("interval"));
            }
            check_declared(&rule.input, format!("rule '{}'", rule.name))?;
            if let Some(output) = &rule.output {
                check_declared(output, format!("rule '{}'", rule.name))?;
            }
            rules.push(Rule {
                name: rule.name,
                input: rule.input,
                output: rule.output,
                ratio: rule.ratio,
                rate: rule.rate,
                interval: rule.interval,
                modifiers: rule.modifiers,
            });
        }

        let mut converter_names: HashSet<String> = HashSet::new();
        let mut converters = Vec::with_capacity(data.converters.len());
        for converter in data.converters {
            if !converter_names.insert(converter.name.clone()) {
                return Err(ProfileError::DuplicateName {
                    kind: "converter",
                    name: converter.name,
                });
            }
            validate_converter(&converter.name, &converter.kind, &check_declared)?;
            converters.push(NamedConverter {
                name: converter.name,
                kind: converter.kind,
            });
        }

        Ok(Self {
            supplies: data
                .supplies
                .into_iter()
                .map(|s| Supply {
                    resource: s.resource,
                    on_pod: s.on_pod,
                })
                .collect(),
            rules,
            converters,
        })
    }

    pub fn supply(&self, resource: &str) -> Option<&Supply> {
        self.supplies.iter().find(|s| s.resource == resource)
    }

    pub fn rule(&self, name: &str) -> Option<&Rule> {
        self.rules.iter().find(|r| r.name == name)
    }

    pub fn converter(&self, name: &str) -> Option<&NamedConverter> {
        self.converters.iter().find(|c| c.name == name)
    }

    /// Build a fully-stocked pod part for `crew` seats from the
    /// profile's supply defaults. Supplies with no pod allotment are
    /// skipped.
    pub fn outfit_pod(&self, crew: u32) -> Part {
        let mut pod = Part::new("pod");
        for supply in &self.supplies {
            if supply.on_pod > 0.0 {
                let amount = supply.on_pod * f64::from(crew);
                pod = pod.with_container(&supply.resource, amount, amount);
            }
        }
        pod
    }

    /// The built-in station profile: breathing, meals, water, cabin
    /// climate, plus a scrubber, a water recycler, and a greenhouse.
    pub fn default_station() -> Self {
        let supplies = [
            (ELECTRIC_CHARGE, 150.0),
            ("Oxygen", 120.0),
            ("Water", 40.0),
            ("Food", 110.0),
            ("CarbonDioxide", 0.0),
            ("WasteWater", 0.0),
            ("Waste", 0.0),
        ]
        .into_iter()
        .map(|(resource, on_pod)| Supply {
            resource: resource.to_string(),
            on_pod,
        })
        .collect();

        let rules = vec![
            Rule {
                name: "breathing".to_string(),
                input: "Oxygen".to_string(),
                output: Some("CarbonDioxide".to_string()),
                ratio: 1.0,
                rate: 0.005,
                interval: 0.0,
                modifiers: vec![Modifier::Breathable],
            },
            Rule {
                name: "drinking".to_string(),
                input: "Water".to_string(),
                output: Some("WasteWater".to_string()),
                ratio: 1.0,
                rate: 0.8,
                interval: 7200.0,
                modifiers: Vec::new(),
            },
            Rule {
                name: "eating".to_string(),
                input: "Food".to_string(),
                output: Some("Waste".to_string()),
                ratio: 0.5,
                rate: 0.5,
                interval: 21600.0,
                modifiers: Vec::new(),
            },
            Rule {
                name: "climatization".to_string(),
                input: ELECTRIC_CHARGE.to_string(),
                output: None,
                ratio: 1.0,
                rate: 0.0001,
                interval: 0.0,
                modifiers: vec![Modifier::Volume],
            },
        ];

        let converters = vec![
            NamedConverter {
                name: "co2-scrubber".to_string(),
                kind: Converter::Scrubber {
                    power: 0.05,
                    input: "CarbonDioxide".to_string(),
                    input_rate: 0.02,
                    output: "Oxygen".to_string(),
                    efficiency: 0.75,
                },
            },
            NamedConverter {
                name: "water-recycler".to_string(),
                kind: Converter::Recycler {
                    power: 0.04,
                    input: "WasteWater".to_string(),
                    input_rate: 0.01,
                    output: "Water".to_string(),
                    ratio: 0.85,
                    dump: false,
                },
            },
            NamedConverter {
                name: "greenhouse".to_string(),
                kind: Converter::Greenhouse {
                    power: 0.2,
                    input: "Water".to_string(),
                    input_rate: 0.001,
                    crop: "Food".to_string(),
                    harvest_size: 30.0,
                    growth_time: 648_000.0,
                },
            },
        ];

        Self {
            supplies,
            rules,
            converters,
        }
    }
}

/// Positivity and resource checks for one converter.
fn validate_converter(
    name: &str,
    kind: &Converter,
    check_declared: &impl Fn(&str, String) -> Result<(), ProfileError>,
) -> Result<(), ProfileError> {
    let non_positive = |field| ProfileError::NonPositive {
        kind: "converter",
        name: name.to_string(),
        field,
    };
    let referenced_by = || format!("converter '{name}'");

    let power = match kind {
        Converter::Scrubber { power, .. }
        | Converter::Recycler { power, .. }
        | Converter::Greenhouse { power, .. }
        | Converter::Harvester { power, .. } => *power,
    };
    if power < 0.0 {
        return Err(non_positive("power"));
    }
    if power > 0.0 {
        check_declared(ELECTRIC_CHARGE, referenced_by())?;
    }

    match kind {
        Converter::Scrubber {
            input,
            input_rate,
            output,
            efficiency,
            ..
        } => {
            if *input_rate <= 0.0 {
                return Err(non_positive("input_rate"));
            }
            if *efficiency <= 0.0 {
                return Err(non_positive("efficiency"));
            }
            check_declared(input, referenced_by())?;
            check_declared(output, referenced_by())?;
        }
        Converter::Recycler {
            input,
            input_rate,
            output,
            ratio,
            ..
        } => {
            if *input_rate <= 0.0 {
                return Err(non_positive("input_rate"));
            }
            if *ratio <= 0.0 {
                return Err(non_positive("ratio"));
            }
            check_declared(input, referenced_by())?;
            check_declared(output, referenced_by())?;
        }
        Converter::Greenhouse {
            input,
            input_rate,
            crop,
            harvest_size,
            growth_time,
            ..
        } => {
            if *input_rate <= 0.0 {
                return Err(non_positive("input_rate"));
            }
            if *harvest_size <= 0.0 {
                return Err(non_positive("harvest_size"));
            }
            if *growth_time <= 0.0 {
                return Err(non_positive("growth_time"));
            }
            check_declared(input, referenced_by())?;
            check_declared(crop, referenced_by())?;
        }
        Converter::Harvester {
            output,
            output_rate,
            ..
        } => {
            if *output_rate <= 0.0 {
                return Err(non_positive("output_rate"));
            }
            check_declared(output, referenced_by())?;
        }
    }

    Ok(())
}

// ===========================================================================
// Tests
// ===========================================================================
