// Kara Explore Library - catalogue browsing for the karaoke room
// Pure functions over a loaded catalogue, so any frontend can drive them

pub mod catalogue; // tracks, tags, filter tokens
pub mod config;    // thresholds and room restrictions
pub mod explore;   // search, summaries, suggestions, grouping
pub mod queue;     // queue timing helpers
pub mod settings;  // text field -> typed setting value

// Export the stuff frontends actually use
pub use catalogue::{load_catalogue, parse_catalogue, CatalogueError, Filter, FilterError, Track};
pub use config::{Config, ExploreConfig, RoomConfig};
pub use explore::{explore, find_tracks, group_tracks, suggest_next_filters, track_info, Section, TrackGrouper};
pub use queue::QueueItem;
pub use settings::{copy_type, SettingValue};
