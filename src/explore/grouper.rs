// Track grouper - decides how to render a result set of any size
//
// A "section" is one heading's worth of content: a list of tracks, a list of
// filter values to pick from, or filter values grouped by first letter.

use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashSet};
use tracing::debug;

use super::advisor::suggest_next_filters;
use super::names::{normalise_name, sort_names, the_to_suffix};
use super::summary::{summarise_tags, TagSummary, ValueCounts};
use crate::catalogue::{Filter, Track};
use crate::config::ExploreConfig;

pub const NO_RESULTS: &str = "No Results";
/// Heading for tracks no filter section covers. When they are the whole
/// result the heading is left empty instead: the screen shows an untitled list.
pub const LEFTOVERS: &str = "Tracks";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Section {
    Tracks(Vec<Track>),
    Filters(ValueCounts),
    Groups(BTreeMap<String, ValueCounts>),
}

impl Section {
    pub fn tracks(&self) -> Option<&[Track]> {
        match self {
            Section::Tracks(tracks) => Some(tracks.as_slice()),
            _ => None,
        }
    }

    pub fn filters(&self) -> Option<&ValueCounts> {
        match self {
            Section::Filters(values) => Some(values),
            _ => None,
        }
    }

    pub fn groups(&self) -> Option<&BTreeMap<String, ValueCounts>> {
        match self {
            Section::Groups(groups) => Some(groups),
            _ => None,
        }
    }
}

/// Values of a filter list in display order
pub fn sorted_values(values: &ValueCounts) -> Vec<&str> {
    let mut names: Vec<&str> = values.keys().map(String::as_str).collect();
    sort_names(&mut names);
    names
}

/// Split a long value list by first letter. "The X" is listed under both "T"
/// and, as "X, The", under "X", for people looking for either spelling.
pub fn group_by_letter(values: &ValueCounts) -> BTreeMap<String, ValueCounts> {
    let mut groups: BTreeMap<String, ValueCounts> = BTreeMap::new();
    for (name, &count) in values {
        let initial = first_letter(&normalise_name(name));
        groups.entry(initial).or_default().insert(name.clone(), count);

        if let Some(suffixed) = the_to_suffix(name) {
            let initial = first_letter_upper(&suffixed);
            groups.entry(initial).or_default().insert(suffixed, count);
        }
    }
    groups
}

fn first_letter(name: &str) -> String {
    name.chars().next().map(String::from).unwrap_or_default()
}

fn first_letter_upper(name: &str) -> String {
    name.chars()
        .next()
        .map(|c| c.to_uppercase().collect())
        .unwrap_or_default()
}

#[derive(Debug, Clone, Default)]
pub struct TrackGrouper {
    config: ExploreConfig,
}

impl TrackGrouper {
    pub fn new(config: ExploreConfig) -> Self {
        Self { config }
    }

    /// Given 0 to LOTS of tracks, decide how best to list them.
    ///
    /// Returns `(heading, section)` pairs in display order. Tracks that no
    /// filter section covers end up in a trailing "Tracks" section (or an
    /// untitled one when it's the only section).
    pub fn group<S: AsRef<str>>(&self, filters: &[S], tracks: &[Track]) -> Vec<(String, Section)> {
        if tracks.is_empty() {
            return vec![(NO_RESULTS.to_string(), Section::Tracks(Vec::new()))];
        }

        let summary = summarise_tags(tracks);
        let mut sections = Vec::new();
        let leftovers = if tracks.len() < self.config.few_tracks {
            self.subheadings(filters, tracks, &summary, &mut sections)
        } else {
            self.prompts(filters, tracks, &summary, &mut sections)
        };

        if !leftovers.is_empty() {
            let heading = if sections.is_empty() { "" } else { LEFTOVERS };
            sections.push((
                heading.to_string(),
                Section::Tracks(leftovers.into_iter().cloned().collect()),
            ));
        }

        sections
    }

    /// Few tracks: list them, split by the children of the most recent filter
    /// when it has any ("from:Macross" -> one section per "Macross:*" value)
    fn subheadings<'t, S: AsRef<str>>(
        &self,
        filters: &[S],
        tracks: &'t [Track],
        summary: &TagSummary,
        sections: &mut Vec<(String, Section)>,
    ) -> Vec<&'t Track> {
        let parent = filters
            .last()
            .and_then(|f| Filter::parse(f.as_ref()).ok())
            .filter(|f| !f.is_flag())
            .map(|f| f.value);
        let Some((parent, children)) = parent.and_then(|p| summary.get_key_value(&p)) else {
            return tracks.iter().collect();
        };

        let mut children: Vec<&str> = children.keys().map(String::as_str).collect();
        sort_names(&mut children);
        debug!("Listing {} tracks under {} '{}' subheadings", tracks.len(), children.len(), parent);

        let mut found: HashSet<&str> = HashSet::new();
        for child in children {
            let in_section: Vec<&Track> = tracks.iter().filter(|t| t.has_tag(parent, child)).collect();
            found.extend(in_section.iter().map(|&t| t.id.as_str()));
            sections.push((
                child.to_string(),
                Section::Tracks(in_section.into_iter().cloned().collect()),
            ));
        }

        tracks.iter().filter(|t| !found.contains(t.id.as_str())).collect()
    }

    /// Many tracks: prompt for more filters rather than listing everything
    fn prompts<'t, S: AsRef<str>>(
        &self,
        filters: &[S],
        tracks: &'t [Track],
        summary: &TagSummary,
        sections: &mut Vec<(String, Section)>,
    ) -> Vec<&'t Track> {
        let mut next = suggest_next_filters(filters, summary);
        // No sensible suggestion: try every tag we have, rather than listing
        // 50+ tracks with no filters at all
        if next.is_empty() {
            let used: Vec<&str> = filters
                .iter()
                .filter_map(|f| f.as_ref().split(':').next())
                .collect();
            next = summary
                .keys()
                .filter(|key| !key.is_empty() && !used.contains(&key.as_str()))
                .cloned()
                .collect();
        }
        // Drop suggestions which would give 0 results
        next.retain(|key| summary.contains_key(key));

        let mut leftovers: Vec<&Track> = tracks.iter().collect();
        for key in next {
            let values = &summary[&key];
            if values.len() == 1 && values.values().next() == Some(&tracks.len()) {
                debug!("Skipping '{}': every track has the same value", key);
                continue;
            }

            let section = if values.len() > self.config.group_over {
                Section::Groups(group_by_letter(values))
            } else {
                Section::Filters(values.clone())
            };
            debug!("Prompting for '{}' with {} values", key, values.len());
            leftovers.retain(|t| !t.has_category(&key));
            sections.push((key, section));
        }
        leftovers
    }
}

/// Group with the default thresholds
pub fn group_tracks<S: AsRef<str>>(filters: &[S], tracks: &[Track]) -> Vec<(String, Section)> {
    TrackGrouper::default().group(filters, tracks)
}
