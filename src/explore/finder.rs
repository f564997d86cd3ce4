// Track finder - narrows the catalogue by tag filters and free-text search
// All filters are ANDed; order only matters for the breadcrumb trail

use regex::Regex;
use std::collections::BTreeMap;
use std::sync::LazyLock;
use tracing::{debug, warn};

use super::names::normalise_name;
use crate::catalogue::{Filter, Track, FLAG_CATEGORY};

static TAG_WORD: LazyLock<Regex> =
    LazyLock::new(|| Regex::new("([a-z]+):(.*)").expect("valid regex"));

/// Parse filter tokens, skipping malformed ones rather than failing the search
pub fn parse_filters<S: AsRef<str>>(tokens: &[S]) -> Vec<Filter> {
    tokens
        .iter()
        .filter_map(|token| match Filter::parse(token.as_ref()) {
            Ok(filter) => Some(filter),
            Err(e) => {
                warn!("Ignoring filter {:?}: {}", token.as_ref(), e);
                None
            }
        })
        .collect()
}

/// Hide tracks a room doesn't want to show.
///
/// `"category:anime"` hides a track whose categories are *all* hidden (a track
/// tagged anime + jpop survives unless jpop is hidden too; a track without any
/// category survives). A bare `"broken"` hides tracks flagged "broken".
pub fn apply_hidden<S: AsRef<str>>(tracks: &[Track], hidden_tags: &[S]) -> Vec<Track> {
    // {"category": ["anime", "retro"], "broken": []}
    let mut hidden: BTreeMap<&str, Vec<&str>> = BTreeMap::new();
    for tag in hidden_tags {
        let (key, value) = tag.as_ref().split_once(':').unwrap_or((tag.as_ref(), ""));
        let values = hidden.entry(key).or_default();
        if !value.is_empty() {
            values.push(value);
        }
    }

    tracks
        .iter()
        .filter(|track| {
            hidden.iter().all(|(key, hidden_values)| {
                if hidden_values.is_empty() {
                    !track.has_tag(FLAG_CATEGORY, key)
                } else {
                    match track.tag(key) {
                        None => true,
                        Some(values) => values.iter().any(|v| !hidden_values.contains(&v.as_str())),
                    }
                }
            })
        })
        .cloned()
        .collect()
}

/// Keep tracks carrying every one of the filters
pub fn apply_tags(tracks: &[Track], filters: &[Filter]) -> Vec<Track> {
    tracks
        .iter()
        .filter(|track| filters.iter().all(|filter| track.matches(filter)))
        .cloned()
        .collect()
}

/// Keep tracks where any tag value contains the search text, case-insensitively
pub fn apply_search(tracks: &[Track], search: &str) -> Vec<Track> {
    let search = search.trim();
    if search.is_empty() {
        return tracks.to_vec();
    }
    let search = search.to_lowercase();

    tracks
        .iter()
        .filter(|track| {
            track
                .tags
                .values()
                .flatten()
                .any(|value| value.to_lowercase().contains(&search))
        })
        .cloned()
        .collect()
}

/// Move "foo:bar" words out of the search box and into the filter list
pub fn text_to_filters<S: AsRef<str>>(filters: &[S], search: &str) -> (Vec<String>, String) {
    let mut out_filters: Vec<String> = filters.iter().map(|f| f.as_ref().to_string()).collect();
    let mut words = Vec::new();
    for word in search.split(' ') {
        if TAG_WORD.is_match(word) {
            out_filters.push(word.to_string());
        } else {
            words.push(word);
        }
    }
    (out_filters, words.join(" "))
}

/// All the searching in one place: typed tags become filters, filters narrow,
/// then the remaining text narrows further. Catalogue order is kept.
pub fn find_tracks<S: AsRef<str>>(tracks: &[Track], filters: &[S], search: &str) -> Vec<Track> {
    let (tokens, search) = text_to_filters(filters, search);
    let filters = parse_filters(&tokens);
    let found = apply_search(&apply_tags(tracks, &filters), &search);
    debug!(
        "find_tracks: {} of {} tracks match {} filters + {:?}",
        found.len(),
        tracks.len(),
        filters.len(),
        search
    );
    found
}

/// The list a room browses: hidden tags removed, forced tags applied, sorted
/// by normalised title
pub fn room_track_list<S: AsRef<str>>(
    tracks: &[Track],
    hidden_tags: &[S],
    forced_tags: &[S],
) -> Vec<Track> {
    let visible = apply_hidden(tracks, hidden_tags);
    let mut list = apply_tags(&visible, &parse_filters(forced_tags));
    list.sort_by_cached_key(|track| normalise_name(track.title()));
    list
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalogue::fixtures::{ids, small_tracks, track};

    fn two_tracks() -> Vec<Track> {
        let tracks = small_tracks();
        vec![tracks[0].clone(), tracks[2].clone()]
    }

    const NONE: &[&str] = &[];

    #[test]
    fn test_apply_tags() {
        let tracks = small_tracks();
        assert_eq!(apply_tags(&tracks, &[]).len(), 7);
        assert_eq!(ids(&apply_tags(&tracks, &parse_filters(&["from:Gundam"]))), vec!["track_id_2"]);
        assert!(apply_tags(&tracks, &parse_filters(&["asdf:anime"])).is_empty());
        assert!(apply_tags(&tracks, &parse_filters(&["from:asdfa"])).is_empty());
        assert_eq!(
            ids(&apply_tags(&tracks, &parse_filters(&["retro"]))),
            vec!["track_id_1", "track_id_2"]
        );
        // same category twice narrows rather than widens
        assert_eq!(
            ids(&apply_tags(&tracks, &parse_filters(&["category:anime", "category:jpop"]))),
            vec!["track_id_3"]
        );
    }

    #[test]
    fn test_apply_search() {
        let tracks = two_tracks();
        assert_eq!(ids(&apply_search(&tracks, "")), vec!["track_id_1", "track_id_3"]);
        assert_eq!(ids(&apply_search(&tracks, "  LOVE ")), vec!["track_id_1"]);
        assert_eq!(ids(&apply_search(&tracks, "k-on")), vec!["track_id_3"]);
        assert!(apply_search(&tracks, "asdgadfgds").is_empty());
    }

    #[test]
    fn test_apply_hidden() {
        let tracks = two_tracks();
        assert_eq!(apply_hidden(&tracks, NONE).len(), 2);
        assert_eq!(ids(&apply_hidden(&tracks, &["retro"])), vec!["track_id_3"]);
        assert_eq!(apply_hidden(&tracks, &["asdfasd"]).len(), 2);
        // track 3 is anime + jpop, so hiding anime alone doesn't hide it
        assert_eq!(ids(&apply_hidden(&tracks, &["category:anime"])), vec!["track_id_3"]);
        assert!(apply_hidden(&tracks, &["category:anime", "category:jpop"]).is_empty());
        assert_eq!(apply_hidden(&tracks, &["asdfasd:anime"]).len(), 2);
        assert_eq!(apply_hidden(&tracks, &["category:asdfasd"]).len(), 2);
    }

    #[test]
    fn test_text_to_filters() {
        assert_eq!(
            text_to_filters(&["foo:bar"], "baz"),
            (vec!["foo:bar".to_string()], "baz".to_string())
        );
        assert_eq!(text_to_filters(NONE, ""), (vec![], String::new()));
        assert_eq!(
            text_to_filters(NONE, "foo:bar"),
            (vec!["foo:bar".to_string()], String::new())
        );
        assert_eq!(
            text_to_filters(NONE, "love from:Macross song"),
            (vec!["from:Macross".to_string()], "love song".to_string())
        );
    }

    #[test]
    fn test_find_tracks() {
        let tracks = small_tracks();
        assert_eq!(find_tracks(&tracks, NONE, ""), tracks);
        assert_eq!(ids(&find_tracks(&tracks, &["category:jpop"], "little")), vec!["track_id_6"]);
        assert_eq!(ids(&find_tracks(&tracks, NONE, "category:anime love")), vec!["track_id_1", "track_id_4"]);
        // malformed filters are skipped, not fatal
        assert_eq!(find_tracks(&tracks, &["", "from:"], "").len(), 7);
    }

    #[test]
    fn test_find_tracks_large_unnarrowed() {
        let tracks: Vec<Track> = (0..10_000)
            .map(|i| {
                track(
                    &format!("track_id_{}", i),
                    &[
                        ("title", &[format!("Test Track {}", i).as_str()]),
                        ("from", &["Macross"]),
                        ("category", &["anime"]),
                        ("", &["retro"]),
                    ],
                )
            })
            .collect();
        let found = find_tracks(&tracks, &["category:anime", "from:Macross"], "mac");
        assert_eq!(found.len(), 10_000);
    }

    #[test]
    fn test_room_track_list() {
        let tracks = small_tracks();
        let list = room_track_list(&tracks, &["retro"], &["category:anime"]);
        let titles: Vec<&str> = list.iter().map(|t| t.title()).collect();
        assert_eq!(titles, vec!["Don't Say Lazy", "Gurenge", "Sakura Saku"]);
    }
}
