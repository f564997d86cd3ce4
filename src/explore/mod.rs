// Explore - the browse screen's brains
// search + filters in, headed sections of tracks or filter choices out

pub mod advisor;  // what to filter by next
pub mod finder;   // narrows the catalogue
pub mod grouper;  // turns a result set into sections
pub mod info;     // per-track subtitle
pub mod names;    // sort/group normalisation
pub mod summary;  // tag value counts

pub use advisor::suggest_next_filters;
pub use finder::{apply_hidden, apply_search, apply_tags, find_tracks, room_track_list, text_to_filters};
pub use grouper::{group_tracks, Section, TrackGrouper};
pub use info::track_info;
pub use names::{filter_token, normalise_cmp, normalise_name, un_the};
pub use summary::{summarise_tags, TagSummary, ValueCounts};

use rand::seq::SliceRandom;

use crate::catalogue::Track;

/// A shuffled copy; the caller's order is left alone
pub fn shuffled<T: Clone>(items: &[T]) -> Vec<T> {
    let mut copy = items.to_vec();
    copy.shuffle(&mut rand::thread_rng());
    copy
}

/// Search, then group: everything the browse screen needs for one render
pub fn explore<S: AsRef<str>>(
    grouper: &TrackGrouper,
    tracks: &[Track],
    filters: &[S],
    search: &str,
) -> Vec<(String, Section)> {
    grouper.group(filters, &find_tracks(tracks, filters, search))
}
