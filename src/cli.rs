use crate::config::{self, LanguageFilter, ScrapeConfig};
use crate::error::{AppError, AppResult};
use crate::logging::{log, LogLevel};
use crate::model::common::PokemonId;
use clap::Parser;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(
    author,
    version,
    about = "Fetches Pokémon identity, stats and flavor text from PokéAPI into one JSON file.",
    long_about = None
)]
pub struct CliArgs {
    #[arg(
        long,
        env = "POKEDEX_START",
        default_value_t = config::DEFAULT_ID_START,
        help = "First Pokémon id to fetch"
    )]
    start: PokemonId,

    #[arg(
        long,
        env = "POKEDEX_END",
        default_value_t = config::DEFAULT_ID_END,
        help = "Last Pokémon id to fetch (inclusive)"
    )]
    end: PokemonId,

    #[arg(
        short, long,
        env = "POKEDEX_OUTPUT",
        default_value = config::DEFAULT_OUTPUT_PATH,
        value_name = "FILE_PATH",
        help = "Output JSON file"
    )]
    output: String,

    #[arg(
        long,
        env = "POKEDEX_WRAP_WIDTH",
        default_value_t = config::DEFAULT_WRAP_WIDTH,
        help = "Maximum characters per flavor-text line"
    )]
    wrap_width: usize,

    #[arg(long, env = "POKEDEX_NO_STATS", help = "Leave base stats out of the records")]
    no_stats: bool,

    #[arg(
        short, long,
        env = "POKEDEX_LANGUAGES",
        value_enum,
        default_value_t = LanguageFilter::All,
        help = "Flavor-text languages to keep"
    )]
    languages: LanguageFilter,

    #[arg(
        long,
        env = "POKEDEX_POKEMON_URL",
        default_value = config::DEFAULT_POKEMON_URL,
        help = "Base URL of the pokemon endpoint"
    )]
    pokemon_url: String,

    #[arg(
        long,
        env = "POKEDEX_SPECIES_URL",
        default_value = config::DEFAULT_SPECIES_URL,
        help = "Base URL of the pokemon-species endpoint"
    )]
    species_url: String,

    #[arg(
        long,
        env = "POKEDEX_CONCURRENCY",
        default_value_t = config::DEFAULT_CONCURRENCY,
        help = "Ids fetched at the same time (output order is unaffected)"
    )]
    concurrency: usize,

    #[arg(long, value_name = "FILE_PATH", help = "Also write the JSON Schema of the output file")]
    schema_out: Option<String>,

    #[arg(
        long,
        value_name = "FILE_PATH",
        help = "Offline mode: local `pokemon` endpoint JSON to assemble",
        requires = "test_species_file"
    )]
    test_pokemon_file: Option<String>,

    #[arg(
        long,
        value_name = "FILE_PATH",
        help = "Offline mode: local `pokemon-species` endpoint JSON to assemble",
        requires = "test_pokemon_file"
    )]
    test_species_file: Option<String>,

    #[arg(
        long,
        default_value = "test_output.json",
        value_name = "OUTPUT_FILE",
        help = "Output file name for offline mode",
        requires = "test_pokemon_file"
    )]
    test_output_file: String,
}

impl CliArgs {
    pub fn get_test_files(&self) -> Option<(PathBuf, PathBuf)> {
        match (&self.test_pokemon_file, &self.test_species_file) {
            (Some(p), Some(s)) => Some((PathBuf::from(p), PathBuf::from(s))),
            _ => None,
        }
    }

    pub fn get_test_output_file(&self) -> PathBuf {
        PathBuf::from(&self.test_output_file)
    }

    pub fn to_config(&self) -> AppResult<ScrapeConfig> {
        let cfg = ScrapeConfig {
            id_start: self.start,
            id_end: self.end,
            output_path: PathBuf::from(&self.output),
            wrap_width: self.wrap_width,
            include_stats: !self.no_stats,
            language_filter: self.languages,
            pokemon_url: self.pokemon_url.trim().to_string(),
            species_url: self.species_url.trim().to_string(),
            concurrency: self.concurrency,
            schema_out: self.schema_out.as_deref().map(PathBuf::from),
        };
        cfg.validate()?;

        if cfg.concurrency > 1 {
            log(
                LogLevel::Info,
                &format!(
                    "Fetching up to {} ids at once; output stays in id order.",
                    cfg.concurrency
                ),
            );
        }
        if self.get_test_files().is_some() && cfg.schema_out.is_some() {
            return Err(AppError::Argument(
                "--schema-out cannot be combined with offline mode".into(),
            ));
        }
        Ok(cfg)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> CliArgs {
        let mut full = vec!["pokedex_update"];
        full.extend_from_slice(args);
        CliArgs::try_parse_from(full).unwrap()
    }

    #[test]
    fn defaults_produce_full_snapshot_config() {
        let cfg = parse(&[]).to_config().unwrap();
        assert_eq!(cfg.id_start, 1);
        assert_eq!(cfg.id_end, 1025);
        assert_eq!(cfg.wrap_width, 50);
        assert_eq!(cfg.output_path, PathBuf::from("pokemon.json"));
        assert!(cfg.include_stats);
        assert_eq!(cfg.language_filter, LanguageFilter::All);
    }

    #[test]
    fn older_revision_behaviour_via_flags() {
        let cfg = parse(&["--end", "1008", "--no-stats", "--languages", "en-only"])
            .to_config()
            .unwrap();
        assert_eq!(cfg.total_ids(), 1008);
        assert!(!cfg.include_stats);
        assert_eq!(cfg.language_filter, LanguageFilter::EnglishOnly);
    }

    #[test]
    fn inverted_range_is_an_argument_error() {
        let err = parse(&["--start", "20", "--end", "10"]).to_config().unwrap_err();
        assert!(matches!(err, AppError::Argument(_)));
    }

    #[test]
    fn offline_mode_needs_both_fixtures() {
        let full = ["pokedex_update", "--test-pokemon-file", "p.json"];
        assert!(CliArgs::try_parse_from(full).is_err());

        let args = parse(&["--test-pokemon-file", "p.json", "--test-species-file", "s.json"]);
        let (p, s) = args.get_test_files().unwrap();
        assert_eq!(p, PathBuf::from("p.json"));
        assert_eq!(s, PathBuf::from("s.json"));
        assert_eq!(args.get_test_output_file(), PathBuf::from("test_output.json"));
    }
}
