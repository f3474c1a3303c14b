use crate::models::Place;

/// Default cap on the number of search results shown
pub const DEFAULT_RESULT_LIMIT: usize = 10;

/// Outcome of a place search
///
/// `Idle` and `NoMatches` are both empty but mean different things to the
/// front end: nothing to show yet versus an explicit "no matches" state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SearchResults<'a> {
    Idle,
    NoMatches,
    Matches(Vec<&'a Place>),
}

impl<'a> SearchResults<'a> {
    pub fn places(&self) -> &[&'a Place] {
        match self {
            SearchResults::Matches(places) => places,
            SearchResults::Idle | SearchResults::NoMatches => &[],
        }
    }

    pub fn len(&self) -> usize {
        self.places().len()
    }

    pub fn is_empty(&self) -> bool {
        self.places().is_empty()
    }
}

/// Check if a place matches a lowercase search needle
#[inline]
pub fn matches_query(place: &Place, needle: &str) -> bool {
    place.display_name.to_lowercase().contains(needle)
        || place.official_name.to_lowercase().contains(needle)
}

/// Case-insensitive substring filter over a dataset
///
/// Returns at most `limit` places in dataset order, and nothing at all for
/// a blank query.
pub fn filter<'a>(dataset: &'a [Place], query: &str, limit: usize) -> Vec<&'a Place> {
    if query.trim().is_empty() {
        return Vec::new();
    }

    let needle = query.to_lowercase();
    dataset
        .iter()
        .filter(|place| matches_query(place, &needle))
        .take(limit)
        .collect()
}

/// Like [`filter`], but keeps "no query" apart from "no matches"
pub fn search<'a>(dataset: &'a [Place], query: &str, limit: usize) -> SearchResults<'a> {
    if query.trim().is_empty() {
        return SearchResults::Idle;
    }

    let matches = filter(dataset, query, limit);
    if matches.is_empty() {
        SearchResults::NoMatches
    } else {
        SearchResults::Matches(matches)
    }
}
