use crate::api::client::parse_body;
use crate::api::model::{ApiPokemon, ApiSpecies};
use crate::config::{self, ScrapeConfig};
use crate::error::{AppError, AppResult};
use crate::io;
use crate::logging::{log, LogLevel};
use crate::model::output::PokemonRecord;
use crate::transform;
use bytes::Bytes;
use std::path::{Path, PathBuf};
use tokio::fs;

async fn read_fixture(path: &Path) -> AppResult<Bytes> {
    if !fs::try_exists(path).await.unwrap_or(false) {
        return Err(AppError::Argument(format!(
            "Test input file not found: {}",
            path.display()
        )));
    }
    Ok(Bytes::from(fs::read(path).await?))
}

/// Assembles one record from local copies of the two endpoint payloads.
pub async fn assemble_from_files(
    pokemon_path: &Path,
    species_path: &Path,
    cfg: &ScrapeConfig,
) -> AppResult<PokemonRecord> {
    let pokemon_bytes = read_fixture(pokemon_path).await?;
    let species_bytes = read_fixture(species_path).await?;

    let pokemon: ApiPokemon = parse_body(&pokemon_bytes, config::ENDPOINT_POKEMON, 0)?;
    let species: ApiSpecies = parse_body(&species_bytes, config::ENDPOINT_SPECIES, pokemon.id)?;

    Ok(transform::transform_entry(pokemon, &species, cfg))
}

pub async fn test_record_transform(
    pokemon_path: &Path,
    species_path: &Path,
    output_path: PathBuf,
    cfg: &ScrapeConfig,
) -> AppResult<()> {
    log(LogLevel::Info, "--- Running Offline Record Transform ---");
    log(
        LogLevel::Info,
        &format!(
            "Input files: {} + {}",
            pokemon_path.display(),
            species_path.display()
        ),
    );
    log(
        LogLevel::Info,
        &format!("Output file: {}", output_path.display()),
    );

    let record = match assemble_from_files(pokemon_path, species_path, cfg).await {
        Ok(record) => record,
        Err(e) => {
            log(LogLevel::Error, &format!("Transformation failed: {:?}", e));
            return Err(e);
        }
    };

    log(
        LogLevel::Success,
        &format!(
            "Assembled #{} '{}' with {} language(s).",
            record.idx,
            record.slug,
            record.desc.len()
        ),
    );
    let log_ctx = format!("Offline Record (#{})", record.idx);
    io::save_json(output_path.clone(), vec![record], log_ctx).await?;
    log(
        LogLevel::Success,
        &format!(
            "Successfully saved transformed data to {}",
            output_path.display()
        ),
    );
    Ok(())
}
