use crate::api::model::ApiPokemon;
use crate::config::GENERATION_SIZE;
use crate::model::common::{PokemonId, StatMap};
use crate::model::output::{LocalizedName, PokemonRecord};
use crate::model::raw::{RawDescription, RawPrimary};
use crate::transform::text::capitalize_first;

/// Coarse generation bucket: ids 1..=100 are gen 1, 101..=200 gen 2, and so on.
#[inline]
pub fn generation_for(idx: PokemonId) -> i64 {
    (idx - 1).div_euclid(GENERATION_SIZE) + 1
}

pub fn primary_from_api(api: ApiPokemon, include_stats: bool) -> RawPrimary {
    let stats = include_stats.then(|| {
        let mut map = StatMap::new();
        for s in api.stats {
            map.insert(s.stat.name, s.base_stat);
        }
        map
    });

    RawPrimary {
        slug: api.name,
        numeric_id: api.id,
        stats,
    }
}

pub fn assemble(primary: RawPrimary, description: RawDescription) -> PokemonRecord {
    let idx = primary.numeric_id;
    PokemonRecord {
        idx,
        gen: generation_for(idx),
        name: LocalizedName {
            en: capitalize_first(&primary.slug),
        },
        slug: primary.slug,
        desc: description.by_language,
        stats: primary.stats,
        forms: Vec::new(),
    }
}
