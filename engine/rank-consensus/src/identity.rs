/// Normalize a player display name into its canonical identity key
///
/// Lower-cases the name, strips periods and apostrophes, collapses whitespace
/// runs into a single space and trims both ends. "A.J. Brown" and "aj  brown"
/// both become "aj brown".
pub fn normalize(name: &str) -> String {
    let stripped: String =
        name.to_lowercase().chars().filter(|c| *c != '.' && *c != '\'').collect();

    stripped.split(is_name_space).filter(|word| !word.is_empty()).collect::<Vec<_>>().join(" ")
}

/// Whitespace as scraped pages use it: Unicode White_Space minus NEL (U+0085),
/// plus the byte-order mark (U+FEFF) that some pages prepend to cell text
fn is_name_space(c: char) -> bool {
    (c.is_whitespace() && c != '\u{85}') || c == '\u{feff}'
}

/// Stable URL-safe player slug ("A.J. Brown" -> "aj-brown")
pub fn to_player_id(name: &str) -> String {
    normalize(name).replace(' ', "-")
}

/// Strategy deciding which display names refer to the same player
///
/// The consensus builder groups records by the key returned here, so an
/// alternate matcher can be plugged in without touching the aggregation.
pub trait IdentityResolver {
    /// Map a display name to its grouping key
    fn resolve_identity(&self, name: &str) -> String;
}

/// Exact match on the normalized name
///
/// Cheap and reproducible, but it will not merge a nickname with a legal
/// name or a name with a suffix ("Jr") with one without.
#[derive(Debug, Clone, Copy, Default)]
pub struct NormalizedNameResolver;

impl IdentityResolver for NormalizedNameResolver {
    fn resolve_identity(&self, name: &str) -> String {
        normalize(name)
    }
}
