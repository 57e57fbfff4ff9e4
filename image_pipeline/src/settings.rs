use std::path::Path;

use serde::Deserialize;

use crate::PipelineError;

/// Square edge in pixels and AVIF quality (0-100).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub struct ThumbSpec {
    pub size: u32,
    pub quality: u8,
}

/// 2x the displayed 180px hero and 120px carousel tiles, for retina screens.
pub const HERO_SPEC: ThumbSpec = ThumbSpec {
    size: 360,
    quality: 85,
};
pub const CAROUSEL_SPEC: ThumbSpec = ThumbSpec {
    size: 240,
    quality: 80,
};
pub const DEFAULT_SPEED: u8 = 6;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct PipelineSettings {
    pub hero: ThumbSpec,
    pub carousel: ThumbSpec,
    pub speed: u8,
}

impl Default for PipelineSettings {
    fn default() -> Self {
        Self {
            hero: HERO_SPEC,
            carousel: CAROUSEL_SPEC,
            speed: DEFAULT_SPEED,
        }
    }
}

impl PipelineSettings {
    pub fn from_toml_str(contents: &str) -> Result<Self, PipelineError> {
        toml::from_str(contents).map_err(|err| PipelineError::Config(err.to_string()))
    }

    pub fn load(path: &Path) -> Result<Self, PipelineError> {
        let contents = std::fs::read_to_string(path).map_err(|source| PipelineError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&contents)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_toml_keeps_defaults() {
        let settings = PipelineSettings::from_toml_str("").expect("parse");
        assert_eq!(settings, PipelineSettings::default());
    }

    #[test]
    fn partial_toml_overrides_fields() {
        let settings = PipelineSettings::from_toml_str(
            "speed = 9\n\n[carousel]\nsize = 320\nquality = 70\n",
        )
        .expect("parse");
        assert_eq!(settings.speed, 9);
        assert_eq!(settings.carousel, ThumbSpec { size: 320, quality: 70 });
        assert_eq!(settings.hero, HERO_SPEC);
    }

    #[test]
    fn bad_toml_is_a_config_error() {
        let err = PipelineSettings::from_toml_str("speed = \"fast\"").expect_err("error");
        assert!(matches!(err, PipelineError::Config(_)));
    }
}
