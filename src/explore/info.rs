use crate::catalogue::Track;

/// Which tags are worth a subtitle, by the track's primary category
pub fn info_tags_for_category(category: Option<&str>) -> &'static [&'static str] {
    match category {
        Some("vocaloid") | Some("jpop") => &["artist"],
        Some("meme") => &["from"],
        _ => &["from", "use", "length"],
    }
}

/// One-line subtitle for a track in a list, eg "Macross - opening, op1 - short".
///
/// Tags repeating the title are left out, and so is the series when the user
/// already filtered by it.
pub fn track_info<S: AsRef<str>>(filters: &[S], track: &Track) -> String {
    let searched_from: Vec<&str> = filters
        .iter()
        .filter_map(|f| f.as_ref().strip_prefix("from:"))
        .collect();
    let title = track.title();

    info_tags_for_category(track.primary("category"))
        .iter()
        .filter_map(|&tag| track.tag(tag).map(|values| (tag, values)))
        .filter(|(_, values)| values.first().map(String::as_str) != Some(title))
        .filter(|(tag, values)| {
            *tag != "from" || !values.first().map_or(false, |v| searched_from.contains(&v.as_str()))
        })
        .map(|(_, values)| values.join(", "))
        .collect::<Vec<_>>()
        .join(" - ")
}
