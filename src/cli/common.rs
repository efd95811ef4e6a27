//! Helpers shared by the command implementations.

/// Turn a directory slug into a human-readable display name
/// (`hero-banner` becomes `Hero Banner`).
#[must_use]
pub fn humanize_slug(slug: &str) -> String {
    slug.split(['-', '_'])
        .filter(|part| !part.is_empty())
        .map(|part| {
            let mut chars = part.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

/// Find the known name closest to `input` for a "did you mean" hint.
///
/// Only reasonably close matches qualify; a wildly different input returns
/// `None` rather than a confusing suggestion.
#[must_use]
pub fn closest_name<'a>(input: &str, candidates: impl IntoIterator<Item = &'a str>) -> Option<&'a str> {
    candidates
        .into_iter()
        .map(|candidate| (strsim::jaro_winkler(input, candidate), candidate))
        .filter(|(score, _)| *score > 0.8)
        .max_by(|(a, _), (b, _)| a.total_cmp(b))
        .map(|(_, candidate)| candidate)
}
