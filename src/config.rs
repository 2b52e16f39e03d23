use clap::ValueEnum;
use std::path::PathBuf;

use crate::error::{AppError, AppResult};
use crate::model::common::PokemonId;

pub const DEFAULT_OUTPUT_PATH: &str = "pokemon.json";
pub const DEFAULT_ID_START: PokemonId = 1;
pub const DEFAULT_ID_END: PokemonId = 1025;
pub const DEFAULT_WRAP_WIDTH: usize = 50;
pub const DEFAULT_CONCURRENCY: usize = 1;
pub const MAX_CONCURRENCY: usize = 64;

pub const HTTP_TIMEOUT_SECONDS: u64 = 35;
pub const HTTP_CONNECT_TIMEOUT: u64 = 20;

pub const DEFAULT_POKEMON_URL: &str = "https://pokeapi.co/api/v2/pokemon";
pub const DEFAULT_SPECIES_URL: &str = "https://pokeapi.co/api/v2/pokemon-species";

pub const USER_AGENT: &str = concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION"));

pub const ENDPOINT_POKEMON: &str = "pokemon";
pub const ENDPOINT_SPECIES: &str = "pokemon-species";

pub const ENGLISH: &str = "en";
pub const GENERATION_SIZE: PokemonId = 100;

pub const PROGRESS_LOG_INTERVAL: usize = 50;

/// Which flavor-text languages end up in `desc`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum LanguageFilter {
    /// Keep only entries whose language code is `en`.
    #[value(name = "en-only")]
    EnglishOnly,
    /// Keep every language, grouped by language then version.
    #[default]
    #[value(name = "all")]
    All,
}

impl LanguageFilter {
    pub fn accepts(self, language: &str) -> bool {
        match self {
            LanguageFilter::EnglishOnly => language == ENGLISH,
            LanguageFilter::All => true,
        }
    }
}

#[derive(Debug, Clone)]
pub struct ScrapeConfig {
    pub id_start: PokemonId,
    pub id_end: PokemonId,
    pub output_path: PathBuf,
    pub wrap_width: usize,
    pub include_stats: bool,
    pub language_filter: LanguageFilter,
    pub pokemon_url: String,
    pub species_url: String,
    pub concurrency: usize,
    pub schema_out: Option<PathBuf>,
}

impl Default for ScrapeConfig {
    fn default() -> Self {
        Self {
            id_start: DEFAULT_ID_START,
            id_end: DEFAULT_ID_END,
            output_path: PathBuf::from(DEFAULT_OUTPUT_PATH),
            wrap_width: DEFAULT_WRAP_WIDTH,
            include_stats: true,
            language_filter: LanguageFilter::default(),
            pokemon_url: DEFAULT_POKEMON_URL.to_string(),
            species_url: DEFAULT_SPECIES_URL.to_string(),
            concurrency: DEFAULT_CONCURRENCY,
            schema_out: None,
        }
    }
}

impl ScrapeConfig {
    pub fn validate(&self) -> AppResult<()> {
        if self.id_start < 1 {
            return Err(AppError::Argument(format!(
                "Range start must be a positive id, got {}",
                self.id_start
            )));
        }
        if self.id_end < self.id_start {
            return Err(AppError::Argument(format!(
                "Range end ({}) is before range start ({})",
                self.id_end, self.id_start
            )));
        }
        if self.wrap_width == 0 {
            return Err(AppError::Argument("Wrap width must be at least 1".into()));
        }
        if self.concurrency == 0 || self.concurrency > MAX_CONCURRENCY {
            return Err(AppError::Argument(format!(
                "Concurrency must be between 1 and {}, got {}",
                MAX_CONCURRENCY, self.concurrency
            )));
        }
        if self.pokemon_url.trim().is_empty() || self.species_url.trim().is_empty() {
            return Err(AppError::ConfigError("Endpoint URLs must not be empty".into()));
        }
        Ok(())
    }

    pub fn ids(&self) -> std::ops::RangeInclusive<PokemonId> {
        self.id_start..=self.id_end
    }

    pub fn total_ids(&self) -> usize {
        (self.id_end - self.id_start + 1).max(0) as usize
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_valid_and_match_latest_snapshot() {
        let cfg = ScrapeConfig::default();
        cfg.validate().unwrap();
        assert_eq!(cfg.total_ids(), 1025);
        assert_eq!(cfg.pokemon_url, DEFAULT_POKEMON_URL);
        assert_eq!(cfg.species_url, DEFAULT_SPECIES_URL);
        assert!(cfg.include_stats);
        assert_eq!(cfg.language_filter, LanguageFilter::All);
    }

    #[test]
    fn rejects_inverted_range_and_zero_width() {
        let cfg = ScrapeConfig {
            id_start: 10,
            id_end: 9,
            ..Default::default()
        };
        assert!(matches!(cfg.validate(), Err(AppError::Argument(_))));

        let cfg = ScrapeConfig {
            wrap_width: 0,
            ..Default::default()
        };
        assert!(cfg.validate().is_err());

        let cfg = ScrapeConfig {
            id_start: 0,
            ..Default::default()
        };
        assert!(cfg.validate().is_err());
    }

    #[test]
    fn english_only_filter() {
        assert!(LanguageFilter::EnglishOnly.accepts("en"));
        assert!(!LanguageFilter::EnglishOnly.accepts("fr"));
        assert!(LanguageFilter::All.accepts("ja-Hrkt"));
    }
}
