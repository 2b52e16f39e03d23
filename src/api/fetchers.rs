use super::DexSource;
use crate::config::LanguageFilter;
use crate::error::AppResult;
use crate::logging::{log, LogLevel};
use crate::model::common::PokemonId;
use crate::model::raw::{RawDescription, RawPrimary};
use crate::transform::{description, record};

pub async fn fetch_primary<S: DexSource>(
    source: &S,
    id: PokemonId,
    include_stats: bool,
) -> AppResult<RawPrimary> {
    match source.fetch_pokemon(id).await {
        Ok(data) => {
            if data.id != id {
                log(
                    LogLevel::Info,
                    &format!("Primary Fetch #{} - API answered with id {}.", id, data.id),
                );
            }
            Ok(record::primary_from_api(data, include_stats))
        }
        Err(e) => {
            log(
                LogLevel::Warning,
                &format!("Failed to fetch data for Pokémon ID {}: {}", id, e.skip_reason()),
            );
            Err(e)
        }
    }
}

pub async fn fetch_description<S: DexSource>(
    source: &S,
    id: PokemonId,
    wrap_width: usize,
    filter: LanguageFilter,
) -> AppResult<RawDescription> {
    match source.fetch_species(id).await {
        Ok(data) => {
            let desc =
                description::build_description(&data.flavor_text_entries, wrap_width, filter);
            if desc.is_empty() {
                log(
                    LogLevel::Info,
                    &format!("Species Fetch #{} - OK but no flavor text kept.", id),
                );
            } else {
                tracing::debug!(
                    "Species Fetch #{} - kept {} flavor text(s) in {} language(s).",
                    id,
                    desc.entry_count(),
                    desc.by_language.len()
                );
            }
            Ok(desc)
        }
        Err(e) => {
            log(
                LogLevel::Warning,
                &format!(
                    "Failed to fetch species data for Pokémon ID {}: {}",
                    id,
                    e.skip_reason()
                ),
            );
            Err(e)
        }
    }
}
