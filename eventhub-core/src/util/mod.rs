pub mod sort;
pub mod validate;

/// Trims the name of a tag, category or zone. Inner whitespace is kept as given.
pub fn trim_name(name: &str) -> String {
    name.trim().to_owned()
}

/// Reduces an arbitrary folder name to `[a-z0-9_-]`.
///
/// Returns `None` if nothing is left.
pub fn sanitize_folder_name(folder: &str) -> Option<String> {
    let mut sanitized = String::with_capacity(folder.len());
    for c in folder.trim().chars() {
        let c = c.to_ascii_lowercase();
        if c.is_ascii_lowercase() || c.is_ascii_digit() || c == '_' || c == '-' {
            sanitized.push(c);
        } else if !sanitized.ends_with('-') {
            sanitized.push('-');
        }
    }
    let sanitized = sanitized.trim_matches('-');
    if sanitized.is_empty() {
        None
    } else {
        Some(sanitized.to_owned())
    }
}
