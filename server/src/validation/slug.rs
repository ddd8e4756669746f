use unicode_normalization::UnicodeNormalization;

/// Derive a lowercase kebab-case slug from a display name.
///
/// The name is NFKD-decomposed and whatever is still non-ASCII is dropped,
/// so `Crème` and `Creme` share a slug. ASCII letters and digits are kept
/// (lowercased); every run of anything else collapses into a single `-`.
/// Leading and trailing separators are dropped, so a name with no ASCII
/// alphanumerics yields an empty slug.
pub fn slugify(name: &str) -> String {
    let mut slug = String::with_capacity(name.len());
    let mut pending_dash = false;

    for ch in name.nfkd().filter(char::is_ascii) {
        if ch.is_ascii_alphanumeric() {
            if pending_dash && !slug.is_empty() {
                slug.push('-');
            }
            pending_dash = false;
            slug.push(ch.to_ascii_lowercase());
        } else {
            pending_dash = true;
        }
    }

    slug
}
