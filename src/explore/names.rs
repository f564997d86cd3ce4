// Name normalisation for sorting and letter-grouping
// "_Macross_", "macross" and "MACROSS" all land in the same place

use regex::Regex;
use std::cmp::Ordering;
use std::sync::LazyLock;

static NON_ALPHANUMERIC: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[^a-zA-Z0-9]").expect("valid regex"));

/// Uppercase with punctuation stripped, unless punctuation is all we have
pub fn normalise_name(name: &str) -> String {
    let stripped = NON_ALPHANUMERIC.replace_all(name, "");
    if stripped.is_empty() {
        name.to_uppercase()
    } else {
        stripped.to_uppercase()
    }
}

/// Legacy comparator: 1 when `a` sorts after `b`, otherwise -1 (ties included).
///
/// Not a total order, so never hand it to a sort; use [`normalise_ordering`].
pub fn normalise_cmp(a: &str, b: &str) -> i32 {
    if normalise_name(a) > normalise_name(b) {
        1
    } else {
        -1
    }
}

/// Total order on normalised names. Ties compare `Equal`, so a stable sort
/// keeps names that normalise identically in their input order.
pub fn normalise_ordering(a: &str, b: &str) -> Ordering {
    normalise_name(a).cmp(&normalise_name(b))
}

/// Stable sort by normalised name
pub fn sort_names<S: AsRef<str>>(names: &mut [S]) {
    names.sort_by_cached_key(|name| normalise_name(name.as_ref()));
}

/// "The Wombles" -> "Wombles, The", for listing under the second word's letter
pub fn the_to_suffix(name: &str) -> Option<String> {
    let prefix = name.get(..4)?;
    if !prefix.eq_ignore_ascii_case("the ") || name.len() <= 4 {
        return None;
    }
    Some(format!("{}, {}", &name[4..], &name[..3]))
}

/// "Wombles, The" -> "The Wombles", the spelling filters are stored in
pub fn un_the(name: &str) -> String {
    let len = name.len();
    match name.get(len.saturating_sub(5)..) {
        Some(suffix) if len >= 5 && suffix.eq_ignore_ascii_case(", the") => {
            format!("{} {}", &name[len - 3..], &name[..len - 5])
        }
        _ => name.to_string(),
    }
}

/// Build the filter token for a value picked from a filter list.
/// Flags have no category, so their token is the bare value.
pub fn filter_token(category: &str, display_value: &str) -> String {
    if category.is_empty() {
        return un_the(display_value);
    }
    format!("{}:{}", category, un_the(display_value))
}
