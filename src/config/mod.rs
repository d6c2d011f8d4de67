//! Scoring weights per content type, plus runtime overrides parsed from JSON.

use std::fs;
use std::path::Path;

use anyhow::{ensure, Context, Result};
use serde::{Deserialize, Serialize};

use crate::types::ContentType;

const BIAS_LIMIT: f32 = 4.0;
const BOOST_LIMIT: f32 = 4.0;

/// Additive biases and boosts applied on top of the scanner's base scores.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScoringWeights {
    pub terminator_bias: f32,
    pub clause_bias: f32,
    pub line_bias: f32,
    pub paragraph_bias: f32,
    pub dialogue_boost: f32,
    pub marker_boost: f32,
    pub balance_boost: f32,
}

impl ScoringWeights {
    pub fn for_content(content_type: ContentType) -> Self {
        match content_type {
            ContentType::Story => Self {
                terminator_bias: 0.0,
                clause_bias: 0.0,
                line_bias: 0.0,
                paragraph_bias: 0.0,
                dialogue_boost: 2.0,
                marker_boost: 1.5,
                balance_boost: 1.0,
            },
            // Line structure carries the verse; commas inside a line rarely do.
            ContentType::Lyrics => Self {
                terminator_bias: -0.5,
                clause_bias: -1.0,
                line_bias: 1.5,
                paragraph_bias: 1.0,
                dialogue_boost: 1.0,
                marker_boost: 1.0,
                balance_boost: 1.0,
            },
            ContentType::ChildrenBook => Self {
                terminator_bias: 1.0,
                clause_bias: -0.5,
                line_bias: 0.5,
                paragraph_bias: 1.0,
                dialogue_boost: 1.5,
                marker_boost: 1.5,
                balance_boost: 1.0,
            },
            ContentType::Commercial => Self {
                terminator_bias: 0.5,
                clause_bias: 0.0,
                line_bias: 0.5,
                paragraph_bias: 0.5,
                dialogue_boost: 1.0,
                marker_boost: 2.0,
                balance_boost: 1.5,
            },
        }
    }
}

impl Default for ScoringWeights {
    fn default() -> Self {
        Self::for_content(ContentType::default())
    }
}

/// Weights for every content type.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScoringProfile {
    pub story: ScoringWeights,
    pub lyrics: ScoringWeights,
    pub children_book: ScoringWeights,
    pub commercial: ScoringWeights,
}

impl ScoringProfile {
    pub fn weights(&self, content_type: ContentType) -> &ScoringWeights {
        match content_type {
            ContentType::Story => &self.story,
            ContentType::Lyrics => &self.lyrics,
            ContentType::ChildrenBook => &self.children_book,
            ContentType::Commercial => &self.commercial,
        }
    }

    fn weights_mut(&mut self, content_type: ContentType) -> &mut ScoringWeights {
        match content_type {
            ContentType::Story => &mut self.story,
            ContentType::Lyrics => &mut self.lyrics,
            ContentType::ChildrenBook => &mut self.children_book,
            ContentType::Commercial => &mut self.commercial,
        }
    }
}

impl Default for ScoringProfile {
    fn default() -> Self {
        Self {
            story: ScoringWeights::for_content(ContentType::Story),
            lyrics: ScoringWeights::for_content(ContentType::Lyrics),
            children_book: ScoringWeights::for_content(ContentType::ChildrenBook),
            commercial: ScoringWeights::for_content(ContentType::Commercial),
        }
    }
}

/// Runtime override document, e.g. `{"story": {"dialogueBoost": 2.5}}`.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RuntimeProfile {
    #[serde(default)]
    pub story: Option<RuntimeWeights>,
    #[serde(default)]
    pub lyrics: Option<RuntimeWeights>,
    #[serde(default, alias = "childrenBook")]
    pub children_book: Option<RuntimeWeights>,
    #[serde(default)]
    pub commercial: Option<RuntimeWeights>,
}

impl RuntimeProfile {
    fn entries(&self) -> [(ContentType, Option<&RuntimeWeights>); 4] {
        [
            (ContentType::Story, self.story.as_ref()),
            (ContentType::Lyrics, self.lyrics.as_ref()),
            (ContentType::ChildrenBook, self.children_book.as_ref()),
            (ContentType::Commercial, self.commercial.as_ref()),
        ]
    }

    pub fn validate(&self) -> Result<()> {
        for (content_type, overrides) in self.entries() {
            if let Some(weights) = overrides {
                weights
                    .validate()
                    .with_context(|| format!("invalid weights for {}", content_type))?;
            }
        }
        Ok(())
    }

    pub fn to_profile(&self) -> ScoringProfile {
        let mut profile = ScoringProfile::default();
        for (content_type, overrides) in self.entries() {
            if let Some(weights) = overrides {
                weights.apply(profile.weights_mut(content_type));
            }
        }
        profile
    }
}

/// Partial weights; unset fields keep the built-in value.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RuntimeWeights {
    #[serde(default, alias = "terminatorBias")]
    pub terminator_bias: Option<f32>,
    #[serde(default, alias = "clauseBias")]
    pub clause_bias: Option<f32>,
    #[serde(default, alias = "lineBias")]
    pub line_bias: Option<f32>,
    #[serde(default, alias = "paragraphBias")]
    pub paragraph_bias: Option<f32>,
    #[serde(default, alias = "dialogueBoost", alias = "dialogue")]
    pub dialogue_boost: Option<f32>,
    #[serde(default, alias = "markerBoost", alias = "marker")]
    pub marker_boost: Option<f32>,
    #[serde(default, alias = "balanceBoost", alias = "balance")]
    pub balance_boost: Option<f32>,
}

impl RuntimeWeights {
    fn validate(&self) -> Result<()> {
        let biases = [
            ("terminator_bias", self.terminator_bias),
            ("clause_bias", self.clause_bias),
            ("line_bias", self.line_bias),
            ("paragraph_bias", self.paragraph_bias),
        ];
        for (name, value) in biases {
            if let Some(value) = value {
                ensure!(
                    value.is_finite() && value.abs() <= BIAS_LIMIT,
                    "{} must be within ±{}, got {}",
                    name,
                    BIAS_LIMIT,
                    value
                );
            }
        }
        let boosts = [
            ("dialogue_boost", self.dialogue_boost),
            ("marker_boost", self.marker_boost),
            ("balance_boost", self.balance_boost),
        ];
        for (name, value) in boosts {
            if let Some(value) = value {
                ensure!(
                    value.is_finite() && (0.0..=BOOST_LIMIT).contains(&value),
                    "{} must be within 0..={}, got {}",
                    name,
                    BOOST_LIMIT,
                    value
                );
            }
        }
        Ok(())
    }

    fn apply(&self, target: &mut ScoringWeights) {
        let fields = [
            (self.terminator_bias, &mut target.terminator_bias),
            (self.clause_bias, &mut target.clause_bias),
            (self.line_bias, &mut target.line_bias),
            (self.paragraph_bias, &mut target.paragraph_bias),
            (self.dialogue_boost, &mut target.dialogue_boost),
            (self.marker_boost, &mut target.marker_boost),
            (self.balance_boost, &mut target.balance_boost),
        ];
        for (value, slot) in fields {
            if let Some(value) = value {
                *slot = value;
            }
        }
    }
}

/// Build a profile from a weights file or inline JSON; defaults when neither is given.
pub fn load_profile(path: Option<&Path>, json: Option<&str>) -> Result<ScoringProfile> {
    let runtime = if let Some(p) = path {
        let data =
            fs::read_to_string(p).with_context(|| format!("Failed to read weights file {:?}", p))?;
        parse_runtime_profile(&data)?
    } else if let Some(raw) = json {
        parse_runtime_profile(raw)?
    } else {
        return Ok(ScoringProfile::default());
    };
    runtime.validate().context("Weights validation failed")?;
    Ok(runtime.to_profile())
}

fn parse_runtime_profile(raw: &str) -> Result<RuntimeProfile> {
    let profile: RuntimeProfile =
        serde_json::from_str(raw).context("Failed to parse weights JSON")?;
    Ok(profile)
}
