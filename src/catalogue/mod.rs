// Track catalogue - the tagged track list every room browses
// Loaded once per session from the server's tracks.json, read-only afterwards

pub mod filter;

pub use filter::{Filter, FilterError};

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs;
use std::path::Path;
use thiserror::Error;
use tracing::info;

/// Tag category -> ordered values. The first value is the primary one.
pub type Tags = BTreeMap<String, Vec<String>>;

/// Category holding single flag tags like "retro" or "minami"
pub const FLAG_CATEGORY: &str = "";

#[derive(Debug, Error)]
pub enum CatalogueError {
    #[error("Failed to read catalogue: {0}")]
    Io(#[from] std::io::Error),
    #[error("Failed to parse catalogue JSON: {0}")]
    Json(#[from] serde_json::Error),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Track {
    pub id: String,
    #[serde(default)]
    pub duration: f64, // seconds
    #[serde(default)]
    pub tags: Tags,
}

impl Track {
    pub fn new(id: impl Into<String>, tags: Tags) -> Self {
        Self {
            id: id.into(),
            duration: 0.0,
            tags,
        }
    }

    /// Primary title, or "" for tracks that somehow lack one
    pub fn title(&self) -> &str {
        self.primary("title").unwrap_or("")
    }

    pub fn tag(&self, category: &str) -> Option<&[String]> {
        self.tags.get(category).map(Vec::as_slice)
    }

    pub fn primary(&self, category: &str) -> Option<&str> {
        self.tags
            .get(category)
            .and_then(|values| values.first())
            .map(String::as_str)
    }

    pub fn has_category(&self, category: &str) -> bool {
        self.tags.contains_key(category)
    }

    pub fn has_tag(&self, category: &str, value: &str) -> bool {
        self.tags
            .get(category)
            .map_or(false, |values| values.iter().any(|v| v == value))
    }

    pub fn matches(&self, filter: &Filter) -> bool {
        self.has_tag(&filter.category, &filter.value)
    }
}

/// Parse a tracks.json body: an object mapping track id to track.
/// Tracks come back in file order.
pub fn parse_catalogue(json: &str) -> Result<Vec<Track>, CatalogueError> {
    let tracks: serde_json::Map<String, serde_json::Value> = serde_json::from_str(json)?;
    tracks
        .into_iter()
        .map(|(_, track)| serde_json::from_value::<Track>(track).map_err(CatalogueError::from))
        .collect()
}

/// Load the catalogue from disk
pub fn load_catalogue<P: AsRef<Path>>(path: P) -> Result<Vec<Track>, CatalogueError> {
    let path = path.as_ref();
    let content = fs::read_to_string(path)?;
    let tracks = parse_catalogue(&content)?;
    info!("Loaded {} tracks from {}", tracks.len(), path.display());
    Ok(tracks)
}

/// Shortest value of a tag (first one wins on ties), "" when the tag is missing
pub fn shortest_tag(values: Option<&[String]>) -> &str {
    values
        .and_then(|values| values.iter().min_by_key(|v| v.chars().count()))
        .map_or("", String::as_str)
}

/// Follow a parent/child tag chain down to its leaf.
///
/// Given `from:Macross` and `Macross:Macross Frontier`, starting at "from"
/// yields "Macross Frontier". Starting at a missing category yields the
/// category name itself.
pub fn last_tag<'a>(tags: &'a Tags, start: &'a str) -> &'a str {
    let mut tag = start;
    // Each hop visits a category; more hops than categories means a cycle
    for _ in 0..=tags.len() {
        match tags.get(tag).and_then(|values| values.first()) {
            Some(child) => tag = child.as_str(),
            None => break,
        }
    }
    tag
}

#[cfg(test)]
pub(crate) mod fixtures {
    use super::*;
    use serde_json::json;

    /// Seven tracks covering every tag shape the explorer cares about
    pub(crate) fn small_tracks() -> Vec<Track> {
        let catalogue = json!({
            "track_id_1": {
                "id": "track_id_1",
                "duration": 90,
                "tags": {
                    "title": ["Do You Remember Love?"],
                    "from": ["Macross"],
                    "Macross": ["Do You Remember Love?"],
                    "category": ["anime"],
                    "use": ["opening", "op1"],
                    "artist": ["alice"],
                    "year": ["1984"],
                    "length": ["short"],
                    "": ["retro"]
                }
            },
            "track_id_2": {
                "id": "track_id_2",
                "duration": 120,
                "tags": {
                    "title": ["Tobe! Gundam"],
                    "from": ["Gundam"],
                    "category": ["anime"],
                    "use": ["opening", "op1"],
                    "artist": ["bob"],
                    "year": ["1990"],
                    "": ["retro"]
                }
            },
            "track_id_3": {
                "id": "track_id_3",
                "duration": 200,
                "tags": {
                    "title": ["Don't Say Lazy"],
                    "from": ["K-On!"],
                    "category": ["anime", "jpop"],
                    "use": ["ending"],
                    "artist": ["carol", "alice"],
                    "year": ["2010"],
                    "": ["minami"]
                }
            },
            "track_id_4": {
                "id": "track_id_4",
                "duration": 95,
                "tags": {
                    "title": ["Sakura Saku"],
                    "from": ["Love Hina"],
                    "category": ["anime"],
                    "use": ["opening", "op2"],
                    "artist": ["dave"],
                    "year": ["2000"],
                    "length": ["short"]
                }
            },
            "track_id_5": {
                "id": "track_id_5",
                "duration": 240,
                "tags": {
                    "title": ["Gurenge"],
                    "from": ["Demon Slayer"],
                    "category": ["anime"],
                    "use": ["opening"],
                    "artist": ["eve"],
                    "year": ["2020"]
                }
            },
            "track_id_6": {
                "id": "track_id_6",
                "duration": 180,
                "tags": {
                    "title": ["Little Date"],
                    "from": ["Ranma"],
                    "category": ["jpop"],
                    "use": ["insert"],
                    "artist": ["frank"],
                    "year": ["2005"]
                }
            },
            "track_id_7": {
                "id": "track_id_7",
                "duration": 210,
                "tags": {
                    "title": ["Mystery Song"],
                    "from": ["Unknown"],
                    "category": ["jpop"],
                    "use": ["opening"],
                    "artist": ["grace"]
                }
            }
        });
        parse_catalogue(&catalogue.to_string()).expect("fixture catalogue parses")
    }

    pub(crate) fn track(id: &str, tags: &[(&str, &[&str])]) -> Track {
        let tags = tags
            .iter()
            .map(|(k, vs)| (k.to_string(), vs.iter().map(|v| v.to_string()).collect()))
            .collect();
        Track::new(id, tags)
    }

    pub(crate) fn ids(tracks: &[Track]) -> Vec<&str> {
        tracks.iter().map(|t| t.id.as_str()).collect()
    }
}
