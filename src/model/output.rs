use super::common::{DescriptionMap, PokemonId, StatMap};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq, JsonSchema, Default)]
pub struct LocalizedName {
    pub en: String,
}

/// One entry of the generated `pokemon.json` array.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq, JsonSchema)]
pub struct PokemonRecord {
    pub idx: PokemonId,
    pub slug: String,
    pub gen: i64,
    pub name: LocalizedName,
    #[serde(default)]
    pub desc: DescriptionMap,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stats: Option<StatMap>,
    /// Always empty; alternate forms are not scraped yet.
    #[serde(default)]
    pub forms: Vec<String>,
}
