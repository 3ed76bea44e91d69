/// Name used when an upload part carries no filename.
const DEFAULT_UPLOAD_NAME: &str = "image";

/// Replace every character outside `[A-Za-z0-9_.-]` with `_`.
pub fn sanitize_filename(filename: &str) -> String {
    filename
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || matches!(c, '_' | '.' | '-') {
                c
            } else {
                '_'
            }
        })
        .collect()
}

/// Collision-resistant stored filename: `{millis}-{sanitized original}`.
pub fn timestamped_filename(millis: i64, original: Option<&str>) -> String {
    format!(
        "{millis}-{}",
        sanitize_filename(original.unwrap_or(DEFAULT_UPLOAD_NAME))
    )
}
