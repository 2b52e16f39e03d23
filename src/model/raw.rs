use super::common::{DescriptionMap, PokemonId, StatMap};

/// Identity and base stats pulled from the `pokemon` endpoint.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawPrimary {
    pub slug: String,
    pub numeric_id: PokemonId,
    /// `None` when stats collection is switched off.
    pub stats: Option<StatMap>,
}

/// Cleaned and wrapped flavor texts from the `pokemon-species` endpoint.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RawDescription {
    pub by_language: DescriptionMap,
}

impl RawDescription {
    pub fn is_empty(&self) -> bool {
        self.by_language.is_empty()
    }

    pub fn entry_count(&self) -> usize {
        self.by_language.values().map(|versions| versions.len()).sum()
    }
}
