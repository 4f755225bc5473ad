//! Slug generation for guide and page names.

/// Convert a display name into a URL-safe slug.
///
/// Lower-cases the input, replaces spaces with hyphens, and drops a fixed
/// set of punctuation (`'`, `@`, `!`, `?`, `&`, `:`, `;`, `<`, `>`). Every
/// other character passes through lower-cased. Hyphen runs left behind by
/// the substitutions collapse to a single hyphen, and leading or trailing
/// hyphens are removed.
///
/// # Examples
///
/// ```
/// use lgx::slugify;
///
/// assert_eq!(slugify("Research & Data: A Guide!"), "research-data-a-guide");
/// assert_eq!(slugify("Adam's Guide"), "adams-guide");
/// assert_eq!(slugify(""), "");
/// ```
pub fn slugify(name: &str) -> String {
    name.chars()
        .flat_map(char::to_lowercase)
        .filter_map(|c| match c {
            ' ' => Some('-'),
            '\'' | '@' | '!' | '?' | '&' | ':' | ';' | '<' | '>' => None,
            other => Some(other),
        })
        .collect::<String>()
        .split('-')
        .filter(|s| !s.is_empty())
        .collect::<Vec<_>>()
        .join("-")
}
