use crate::api::model::ApiFlavorTextEntry;
use crate::config::LanguageFilter;
use crate::model::raw::RawDescription;
use crate::transform::text::{clean_flavor_text, wrap_text};

/// Merge rule for a repeated `(language, version)` slot: the incoming text wins.
#[inline]
pub fn last_write_wins(_existing: String, incoming: String) -> String {
    incoming
}

/// Groups flavor texts by language then version, cleaning and wrapping each
/// one to `wrap_width`. Entries rejected by `filter` are dropped.
pub fn build_description(
    entries: &[ApiFlavorTextEntry],
    wrap_width: usize,
    filter: LanguageFilter,
) -> RawDescription {
    let mut description = RawDescription::default();

    for entry in entries {
        let language = entry.language.name.as_str();
        if !filter.accepts(language) {
            continue;
        }
        let text = wrap_text(&clean_flavor_text(&entry.flavor_text), wrap_width);

        let versions = description
            .by_language
            .entry(language.to_string())
            .or_default();
        let merged = match versions.remove(&entry.version.name) {
            Some(existing) => last_write_wins(existing, text),
            None => text,
        };
        versions.insert(entry.version.name.clone(), merged);
    }

    description
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::model::ApiNamedResource;

    fn entry(language: &str, version: &str, text: &str) -> ApiFlavorTextEntry {
        ApiFlavorTextEntry {
            flavor_text: text.to_string(),
            language: ApiNamedResource {
                name: language.to_string(),
                url: None,
            },
            version: ApiNamedResource {
                name: version.to_string(),
                url: None,
            },
        }
    }

    #[test]
    fn groups_by_language_then_version() {
        let entries = vec![
            entry("en", "red", "A mouse\nPokemon."),
            entry("fr", "x", "Une souris."),
            entry("en", "blue", "Electric\x0cmouse."),
        ];
        let desc = build_description(&entries, 50, LanguageFilter::All);

        assert_eq!(desc.by_language.len(), 2);
        assert_eq!(desc.by_language["en"]["red"], "A mouse Pokemon.");
        assert_eq!(desc.by_language["en"]["blue"], "Electric mouse.");
        assert_eq!(desc.by_language["fr"]["x"], "Une souris.");
        assert_eq!(desc.entry_count(), 3);
    }

    #[test]
    fn repeated_slot_keeps_the_later_entry() {
        let entries = vec![
            entry("en", "red", "first"),
            entry("en", "red", "second"),
        ];
        let desc = build_description(&entries, 50, LanguageFilter::All);
        assert_eq!(desc.by_language["en"].len(), 1);
        assert_eq!(desc.by_language["en"]["red"], "second");
    }

    #[test]
    fn english_only_drops_other_languages() {
        let entries = vec![entry("ja", "red", "ねずみ"), entry("en", "red", "Mouse.")];
        let desc = build_description(&entries, 50, LanguageFilter::EnglishOnly);
        assert_eq!(desc.by_language.keys().collect::<Vec<_>>(), vec!["en"]);
    }

    #[test]
    fn texts_are_wrapped_to_width() {
        let entries = vec![entry(
            "en",
            "yellow",
            "It keeps its tail raised to monitor its surroundings.",
        )];
        let desc = build_description(&entries, 20, LanguageFilter::All);
        assert_eq!(
            desc.by_language["en"]["yellow"],
            "It keeps its tail\nraised to monitor\nits surroundings."
        );
    }

    #[test]
    fn no_entries_gives_empty_description() {
        let desc = build_description(&[], 50, LanguageFilter::All);
        assert!(desc.is_empty());
    }
}
