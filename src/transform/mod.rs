pub mod description;
pub mod record;
pub mod text;

use crate::api::model::{ApiPokemon, ApiSpecies};
use crate::config::ScrapeConfig;
use crate::model::output::PokemonRecord;

/// Turns one pair of endpoint payloads into the persisted record.
pub fn transform_entry(
    pokemon: ApiPokemon,
    species: &ApiSpecies,
    cfg: &ScrapeConfig,
) -> PokemonRecord {
    let primary = record::primary_from_api(pokemon, cfg.include_stats);
    let desc = description::build_description(
        &species.flavor_text_entries,
        cfg.wrap_width,
        cfg.language_filter,
    );
    record::assemble(primary, desc)
}
