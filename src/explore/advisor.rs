// Next-filter advisor - which facet should the user be offered next?
//
//   [no search]    -> category (anime, game, jpop), vocalstyle, vocaltrack, lang
//   category:anime -> from (gundam, macross, one piece)
//   category:jpop  -> artist (akb48, mell, x japan), from
//   from:gundam    -> gundam (wing, waltz, unicorn)

use super::summary::TagSummary;
use crate::catalogue::Filter;

/// Shown before anything has been picked
pub const DEFAULT_SUGGESTIONS: &[&str] = &["category", "vocalstyle", "vocaltrack", "lang"];

/// Hand-picked follow-ups for filters where we know what people look for next
pub fn curated_suggestions(filter: &str) -> Option<&'static [&'static str]> {
    let next: &'static [&'static str] = match filter {
        "category:anime" | "category:cartoon" | "category:game" | "category:jdrama"
        | "category:tokusatsu" => &["from"],
        "category:jpop" | "category:kpop" => &["artist", "from"],
        "category:vocaloid" => &["artist"],
        "vocalstyle:male" | "vocalstyle:female" => &["artist"],
        "vocalstyle:duet" | "vocalstyle:group" => &["artist", "from"],
        "lang:jp" | "lang:en" => &["category", "vocalstyle", "vocaltrack"],
        "vocaltrack:on" | "vocaltrack:off" => &["category", "vocalstyle", "lang"],
        _ => return None,
    };
    Some(next)
}

/// Suggest the categories to prompt for next, given the drill-down path so far.
///
/// A filter whose value is itself a category in the summary ("from:Macross"
/// with "Macross:Frontier" sub-tags) drills into that category first. An
/// empty result means "no idea", and the caller decides how to fall back.
/// Curated follow-ups are trimmed to categories the summary actually has.
pub fn suggest_next_filters<S: AsRef<str>>(filters: &[S], summary: &TagSummary) -> Vec<String> {
    let Some(last): Option<&str> = filters.last().map(|f| f.as_ref()) else {
        return DEFAULT_SUGGESTIONS.iter().map(|s| s.to_string()).collect();
    };

    if let Ok(filter) = Filter::parse(last) {
        if summary.contains_key(&filter.value) {
            return vec![filter.value];
        }
    }

    curated_suggestions(last)
        .map(|next| {
            next.iter()
                .filter(|category| summary.contains_key(**category))
                .map(|s| s.to_string())
                .collect()
        })
        .unwrap_or_default()
}
