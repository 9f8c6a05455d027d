//! Character Catalog
//!
//! In-memory CRUD store of character templates. The simulation only reads
//! from it through [`TemplateSource`] when a match is set up; nothing in a
//! tick touches the catalog.

use std::collections::BTreeMap;
use serde::{Serialize, Deserialize};
use tracing::debug;

use crate::core::fixed::{to_fixed, FIXED_LIMIT};
use crate::core::rng::DeterministicRng;
use crate::error::SetupError;
use crate::game::config::SimParams;
use crate::game::fighter::FighterProfile;
use crate::game::state::MatchState;

/// Character definition as stored in the catalog.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CharacterTemplate {
    /// Catalog id (0 until added)
    pub id: u32,
    /// Display name
    pub name: String,
    /// Starting and maximum health
    pub health_base: u32,
    /// Damage scale (1.0 = base damage)
    pub attack_multiplier: f64,
    /// Fighting style label, informational only
    pub style: String,
    /// Matches this character has played
    pub matches_played: u32,
}

impl Default for CharacterTemplate {
    fn default() -> Self {
        Self {
            id: 0,
            name: String::new(),
            health_base: 100,
            attack_multiplier: 1.0,
            style: String::new(),
            matches_played: 0,
        }
    }
}

impl CharacterTemplate {
    /// Unsaved template with default stats.
    pub fn new(name: impl Into<String>, style: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            style: style.into(),
            ..Self::default()
        }
    }
}

impl TryFrom<&CharacterTemplate> for FighterProfile {
    type Error = SetupError;

    fn try_from(template: &CharacterTemplate) -> Result<Self, Self::Error> {
        let invalid = |reason| SetupError::InvalidTemplate {
            name: template.name.clone(),
            reason,
        };

        if template.health_base == 0 {
            return Err(invalid("health_base must be positive"));
        }
        let multiplier = template.attack_multiplier;
        if !multiplier.is_finite() || multiplier <= 0.0 || multiplier > FIXED_LIMIT {
            return Err(invalid("attack_multiplier must be finite and positive"));
        }
        let attack_multiplier = to_fixed(multiplier);
        if attack_multiplier <= 0 {
            return Err(invalid("attack_multiplier is below fixed-point precision"));
        }

        Ok(FighterProfile {
            name: template.name.clone(),
            health_base: template.health_base,
            attack_multiplier,
        })
    }
}

/// Anything that can look up character templates by id.
pub trait TemplateSource {
    /// Template with this id, if any.
    fn template(&self, id: u32) -> Option<&CharacterTemplate>;
}

/// In-memory catalog. Ids are assigned sequentially from 1 and never reused.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct CharacterCatalog {
    templates: BTreeMap<u32, CharacterTemplate>,
    next_id: u32,
}

const SAMPLE_NAMES: [&str; 8] = [
    "Ryu", "Ken", "Chun", "Sagat", "Blanka", "Guile", "Zangief", "Dhalsim",
];

const SAMPLE_STYLES: [&str; 5] = ["Karate", "Boxing", "Muay Thai", "Wrestling", "Kung Fu"];

const SAMPLE_HEALTH: [u32; 3] = [800, 1000, 1200];

const SAMPLE_MULTIPLIERS: [f64; 4] = [0.75, 1.0, 1.25, 1.5];

impl CharacterCatalog {
    /// Empty catalog.
    pub fn new() -> Self {
        Self::default()
    }

    /// Store a template, assigning and returning its id. Any id already on
    /// the template is overwritten.
    pub fn add(&mut self, mut template: CharacterTemplate) -> u32 {
        self.next_id += 1;
        let id = self.next_id;
        template.id = id;
        debug!(id, name = %template.name, "character added");
        self.templates.insert(id, template);
        id
    }

    /// Template by id.
    pub fn get(&self, id: u32) -> Option<&CharacterTemplate> {
        self.templates.get(&id)
    }

    /// All templates in id order.
    pub fn all(&self) -> Vec<&CharacterTemplate> {
        self.templates.values().collect()
    }

    /// Number of templates.
    pub fn len(&self) -> usize {
        self.templates.len()
    }

    /// True when the catalog holds nothing.
    pub fn is_empty(&self) -> bool {
        self.templates.is_empty()
    }

    /// Replace the template with `template.id`. Returns false if no such id.
    pub fn update(&mut self, template: CharacterTemplate) -> bool {
        match self.templates.get_mut(&template.id) {
            Some(slot) => {
                *slot = template;
                true
            }
            None => false,
        }
    }

    /// Remove a template. Returns false if no such id.
    pub fn delete(&mut self, id: u32) -> bool {
        self.templates.remove(&id).is_some()
    }

    /// Add `count` randomly rolled templates.
    pub fn generate_sample_data(&mut self, count: u32, rng: &mut DeterministicRng) {
        for i in 0..count {
            let name = rng.choose(&SAMPLE_NAMES).copied().unwrap_or("Fighter");
            let style = rng.choose(&SAMPLE_STYLES).copied().unwrap_or("Karate");
            let template = CharacterTemplate {
                id: 0,
                name: format!("{name} #{}", i + 1),
                health_base: rng.choose(&SAMPLE_HEALTH).copied().unwrap_or(1000),
                attack_multiplier: rng.choose(&SAMPLE_MULTIPLIERS).copied().unwrap_or(1.0),
                style: style.to_string(),
                matches_played: rng.next_int_range(0, 499),
            };
            self.add(template);
        }
    }
}

impl TemplateSource for CharacterCatalog {
    fn template(&self, id: u32) -> Option<&CharacterTemplate> {
        self.get(id)
    }
}

impl MatchState {
    /// Set up a match from two catalog entries (P1, P2).
    pub fn from_catalog(
        params: &SimParams,
        source: &impl TemplateSource,
        ids: [u32; 2],
    ) -> Result<Self, SetupError> {
        let profile = |id: u32| -> Result<FighterProfile, SetupError> {
            let template = source.template(id).ok_or(SetupError::UnknownCharacter(id))?;
            FighterProfile::try_from(template)
        };
        Ok(Self::new(params, [profile(ids[0])?, profile(ids[1])?]))
    }
}
