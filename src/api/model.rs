use crate::model::common::{deserialize_flexible_i64, deserialize_string_or_empty, PokemonId};
use serde::Deserialize;

#[derive(Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct ApiNamedResource {
    pub name: String,
    #[serde(default)]
    pub url: Option<String>,
}

/// `GET {pokemon_url}/{id}`
#[derive(Deserialize, Debug, Clone)]
pub struct ApiPokemon {
    pub name: String,
    #[serde(deserialize_with = "deserialize_flexible_i64")]
    pub id: PokemonId,
    #[serde(default)]
    pub stats: Vec<ApiStat>,
}

#[derive(Deserialize, Debug, Clone)]
pub struct ApiStat {
    #[serde(deserialize_with = "deserialize_flexible_i64")]
    pub base_stat: i64,
    pub stat: ApiNamedResource,
}

/// `GET {species_url}/{id}`
#[derive(Deserialize, Debug, Clone)]
pub struct ApiSpecies {
    pub flavor_text_entries: Vec<ApiFlavorTextEntry>,
}

#[derive(Deserialize, Debug, Clone)]
pub struct ApiFlavorTextEntry {
    #[serde(default, deserialize_with = "deserialize_string_or_empty")]
    pub flavor_text: String,
    pub language: ApiNamedResource,
    pub version: ApiNamedResource,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_pokemon_payload_ignoring_extra_fields() {
        let body = r#"{
            "id": 25,
            "name": "pikachu",
            "height": 4,
            "stats": [
                {"base_stat": 35, "effort": 0, "stat": {"name": "hp", "url": "https://pokeapi.co/api/v2/stat/1/"}},
                {"base_stat": 55, "effort": 0, "stat": {"name": "attack", "url": "https://pokeapi.co/api/v2/stat/2/"}}
            ]
        }"#;
        let p: ApiPokemon = serde_json::from_str(body).unwrap();
        assert_eq!(p.id, 25);
        assert_eq!(p.name, "pikachu");
        assert_eq!(p.stats.len(), 2);
        assert_eq!(p.stats[1].stat.name, "attack");
    }

    #[test]
    fn species_without_flavor_entries_is_malformed() {
        assert!(serde_json::from_str::<ApiSpecies>(r#"{"id": 25}"#).is_err());
    }

    #[test]
    fn pokemon_without_id_is_malformed() {
        assert!(serde_json::from_str::<ApiPokemon>(r#"{"name": "pikachu", "stats": []}"#).is_err());
    }
}
