use std::collections::BTreeMap;

use crate::catalogue::Track;

/// value -> number of tracks carrying it
pub type ValueCounts = BTreeMap<String, usize>;

/// category -> value counts, over one track selection
pub type TagSummary = BTreeMap<String, ValueCounts>;

/// Find all the tags in the current selection and how many tracks carry each
/// value, eg `{"category": {"anime": 1619, "jpop": 195}, "vocaltrack": {...}}`.
///
/// Titles are unique per track, so they're left out. Every value occurrence
/// counts, so a value listed twice on one track counts twice.
pub fn summarise_tags<'a, I>(tracks: I) -> TagSummary
where
    I: IntoIterator<Item = &'a Track>,
{
    let mut summary = TagSummary::new();
    for track in tracks {
        for (category, values) in track.tags.iter().filter(|(category, _)| *category != "title") {
            for value in values {
                *summary
                    .entry(category.clone())
                    .or_default()
                    .entry(value.clone())
                    .or_insert(0) += 1;
            }
        }
    }
    summary
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalogue::fixtures::{small_tracks, track};

    fn counts(pairs: &[(&str, usize)]) -> ValueCounts {
        pairs.iter().map(|(v, n)| (v.to_string(), *n)).collect()
    }

    #[test]
    fn test_summarise_fixture() {
        let summary = summarise_tags(&small_tracks());

        assert_eq!(summary["category"], counts(&[("anime", 5), ("jpop", 3)]));
        assert_eq!(summary[""], counts(&[("minami", 1), ("retro", 2)]));
        assert_eq!(summary["length"], counts(&[("short", 2)]));
        assert_eq!(summary["Macross"], counts(&[("Do You Remember Love?", 1)]));
        assert_eq!(
            summary["use"],
            counts(&[("ending", 1), ("insert", 1), ("op1", 2), ("op2", 1), ("opening", 5)])
        );
        assert_eq!(summary["from"].len(), 7);
        assert!(summary["from"].values().all(|&n| n == 1));
        assert_eq!(summary["artist"]["alice"], 2);
        assert_eq!(summary["artist"].values().sum::<usize>(), 8);
        assert_eq!(summary["year"].len(), 6);
        assert!(!summary.contains_key("title"));
        assert_eq!(summary.len(), 8);
    }

    #[test]
    fn test_summarise_empty() {
        let none: Vec<Track> = Vec::new();
        assert!(summarise_tags(&none).is_empty());
    }

    #[test]
    fn test_repeated_value_counts_twice() {
        let tracks = vec![track("x", &[("title", &["X"]), ("use", &["op", "op"])])];
        assert_eq!(summarise_tags(&tracks)["use"]["op"], 2);
    }
}
