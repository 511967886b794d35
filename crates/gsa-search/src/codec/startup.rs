//! Choosing the initial filter spec at launch.

use tracing::debug;

use super::url::from_query_string;
use crate::filter::FilterSpec;

/// Where the initial filter spec came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FilterSource {
    /// Decoded from the launch location's query string.
    Url,
    /// Loaded from the state store.
    Storage,
    /// Neither source had anything; the identity spec.
    Defaults,
}

/// The initial filter spec and its origin.
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedFilters {
    pub spec: FilterSpec,
    pub source: FilterSource,
}

/// Merges the launch query string and the stored spec.
///
/// The query string wins when it constrains at least one field. Otherwise the
/// stored spec is used, and failing that the defaults. Fields the winning
/// source does not mention keep their default (unconstrained) value; the two
/// sources are never mixed.
pub fn resolve_initial_filters(url_query: Option<&str>, stored: Option<FilterSpec>) -> ResolvedFilters {
    if let Some(spec) = url_query.map(from_query_string).filter(|s| !s.is_identity()) {
        debug!("initial filters taken from query string");
        return ResolvedFilters {
            spec,
            source: FilterSource::Url,
        };
    }

    match stored {
        Some(spec) => {
            debug!("initial filters taken from storage");
            ResolvedFilters {
                spec,
                source: FilterSource::Storage,
            }
        }
        None => ResolvedFilters {
            spec: FilterSpec::default(),
            source: FilterSource::Defaults,
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn stored() -> FilterSpec {
        let mut spec = FilterSpec::default();
        spec.toggle_agency("VA");
        spec.add_keyword("help desk");
        spec
    }

    #[test]
    fn test_url_wins_when_non_empty() {
        let resolved = resolve_initial_filters(Some("agencies=DHS"), Some(stored()));
        assert_eq!(resolved.source, FilterSource::Url);
        assert_eq!(resolved.spec.agencies, vec!["DHS"]);
        // Nothing leaks in from storage.
        assert!(resolved.spec.keywords.is_empty());
    }

    #[test]
    fn test_empty_url_falls_back_to_storage() {
        let resolved = resolve_initial_filters(Some(""), Some(stored()));
        assert_eq!(resolved.source, FilterSource::Storage);
        assert_eq!(resolved.spec, stored());
    }

    #[test]
    fn test_url_with_only_unknown_keys_falls_back_to_storage() {
        let resolved = resolve_initial_filters(Some("?ref=newsletter"), Some(stored()));
        assert_eq!(resolved.source, FilterSource::Storage);
    }

    #[test]
    fn test_nothing_gives_defaults() {
        let resolved = resolve_initial_filters(None, None);
        assert_eq!(resolved.source, FilterSource::Defaults);
        assert!(resolved.spec.is_identity());
    }
}
