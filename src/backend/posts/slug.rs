/// URL slug for a post title
///
/// Words separated by single spaces are joined with `-`, the result is
/// lowercased and anything outside `[a-z0-9-]` is dropped. Equal titles
/// give equal slugs.
pub fn slugify(title: &str) -> String {
    title
        .split(' ')
        .collect::<Vec<_>>()
        .join("-")
        .to_lowercase()
        .chars()
        .filter(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || *c == '-')
        .collect()
}
