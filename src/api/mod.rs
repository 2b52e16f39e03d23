pub mod client;
pub mod fetchers;
pub mod model;

use crate::error::AppResult;
use crate::model::common::PokemonId;
use model::{ApiPokemon, ApiSpecies};
use std::future::Future;

/// Where raw creature payloads come from. `ApiClient` talks to the REST API;
/// tests plug in canned responses.
pub trait DexSource {
    fn fetch_pokemon(&self, id: PokemonId) -> impl Future<Output = AppResult<ApiPokemon>> + Send;

    fn fetch_species(&self, id: PokemonId) -> impl Future<Output = AppResult<ApiSpecies>> + Send;
}
