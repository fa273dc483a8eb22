//! Named AI profiles: heuristic weight bundles loaded from TOML.
//!
//! A profile starts from a named preset ("default", "aggressive",
//! "defensive") and may override individual weights. The `[production]`
//! table maps difficulty tiers to profile names.

use std::collections::HashMap;
use std::path::Path;

use serde::Deserialize;

use crate::ai::evaluator::{preset, EvalWeights, DEFAULT_WEIGHTS};
use crate::engine::models::AiDifficulty;

#[derive(Debug, Deserialize, Clone, Default)]
pub struct AiProfile {
    pub description: Option<String>,
    /// Named preset to start from; defaults to "default".
    pub eval_profile: Option<String>,

    // Individual weight overrides.
    pub complete_group: Option<f64>,
    pub partial_group: Option<f64>,
    pub pair_bonus: Option<f64>,
    pub joker_value: Option<f64>,
    pub middle_tile_penalty: Option<f64>,
    pub discard_risk_weight: Option<f64>,
    pub noise: Option<f64>,
}

impl AiProfile {
    /// Resolve to concrete weights: preset base, then field overrides.
    pub fn to_weights(&self) -> EvalWeights {
        let base = self
            .eval_profile
            .as_deref()
            .and_then(preset)
            .unwrap_or(&DEFAULT_WEIGHTS);
        EvalWeights {
            complete_group: self.complete_group.unwrap_or(base.complete_group),
            partial_group: self.partial_group.unwrap_or(base.partial_group),
            pair_bonus: self.pair_bonus.unwrap_or(base.pair_bonus),
            joker_value: self.joker_value.unwrap_or(base.joker_value),
            middle_tile_penalty: self
                .middle_tile_penalty
                .unwrap_or(base.middle_tile_penalty),
            discard_risk_weight: self
                .discard_risk_weight
                .unwrap_or(base.discard_risk_weight),
            noise: self.noise.unwrap_or(base.noise),
        }
    }
}

/// Maps difficulty tiers to profile names.
#[derive(Debug, Deserialize, Clone, Default)]
pub struct ProductionConfig {
    pub beginner: Option<String>,
    pub intermediate: Option<String>,
    pub advanced: Option<String>,
    pub default: Option<String>,
}

impl ProductionConfig {
    pub fn resolve(&self, difficulty: AiDifficulty) -> Option<&str> {
        let tier = match difficulty {
            AiDifficulty::Beginner => &self.beginner,
            AiDifficulty::Intermediate => &self.intermediate,
            AiDifficulty::Advanced => &self.advanced,
        };
        tier.as_deref().or(self.default.as_deref())
    }
}

/// Top-level TOML file structure.
#[derive(Debug, Deserialize, Clone, Default)]
pub struct AiProfilesFile {
    #[serde(default)]
    pub profiles: HashMap<String, AiProfile>,
    #[serde(default)]
    pub production: ProductionConfig,
}

impl AiProfilesFile {
    /// Weights for a difficulty tier, falling back to the built-in defaults
    /// when no profile is mapped or the mapped name is missing.
    pub fn weights_for(&self, difficulty: AiDifficulty) -> EvalWeights {
        self.production
            .resolve(difficulty)
            .and_then(|name| self.profiles.get(name))
            .map(|p| p.to_weights())
            .unwrap_or_else(|| DEFAULT_WEIGHTS.clone())
    }
}

/// Load profiles from a TOML file at the given path.
pub fn load_profiles(path: &Path) -> Result<AiProfilesFile, String> {
    let content = std::fs::read_to_string(path)
        .map_err(|e| format!("Failed to read {}: {}", path.display(), e))?;
    toml::from_str(&content).map_err(|e| format!("Failed to parse {}: {}", path.display(), e))
}

/// Try well-known paths, returning built-in defaults if none parse.
pub fn load_default_profiles() -> AiProfilesFile {
    let candidates = ["ai_profiles.toml", "../ai_profiles.toml", "/etc/okey/ai_profiles.toml"];
    for path in &candidates {
        let p = Path::new(path);
        if p.exists() {
            match load_profiles(p) {
                Ok(profiles) => {
                    tracing::info!(path = %p.display(), count = profiles.profiles.len(), "loaded AI profiles");
                    return profiles;
                }
                Err(e) => {
                    tracing::warn!(path = %p.display(), error = %e, "failed to load AI profiles");
                }
            }
        }
    }
    tracing::info!("no ai_profiles.toml found, using built-in defaults");
    AiProfilesFile::default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_profile_overrides_preset() {
        let profile = AiProfile {
            eval_profile: Some("defensive".into()),
            joker_value: Some(9.0),
            ..Default::default()
        };
        let weights = profile.to_weights();
        assert_eq!(weights.joker_value, 9.0);
        assert_eq!(weights.discard_risk_weight, 3.0); // from the preset
    }

    #[test]
    fn test_unknown_preset_falls_back_to_default() {
        let profile = AiProfile {
            eval_profile: Some("bogus".into()),
            ..Default::default()
        };
        assert_eq!(profile.to_weights(), *DEFAULT_WEIGHTS);
    }

    #[test]
    fn test_load_profiles_from_toml() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            r#"
[profiles.careful]
description = "risk-averse tuning"
eval_profile = "defensive"
noise = 0.1

[profiles.wild]
eval_profile = "aggressive"

[production]
advanced = "careful"
default = "wild"
"#
        )
        .unwrap();

        let loaded = load_profiles(file.path()).unwrap();
        assert_eq!(loaded.profiles.len(), 2);

        let advanced = loaded.weights_for(AiDifficulty::Advanced);
        assert_eq!(advanced.noise, 0.1);
        assert_eq!(advanced.discard_risk_weight, 3.0);

        // Unmapped tiers route through the default profile.
        let beginner = loaded.weights_for(AiDifficulty::Beginner);
        assert_eq!(beginner.discard_risk_weight, 0.5);
    }

    #[test]
    fn test_malformed_toml_is_an_error() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "profiles = 3").unwrap();
        assert!(load_profiles(file.path()).is_err());
    }

    #[test]
    fn test_empty_file_weights_are_defaults() {
        let file = AiProfilesFile::default();
        assert_eq!(file.weights_for(AiDifficulty::Intermediate), *DEFAULT_WEIGHTS);
    }
}
