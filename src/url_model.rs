//! File-name derivation from a source URL, used as the bar's prefix label.

/// Extracts the last non-empty path segment from a URL.
///
/// Query and fragment are ignored. Input that does not parse as a URL falls
/// back to the last `/`-separated segment of the raw string. Returns `None`
/// when no usable segment exists (empty path, root, `.` or `..`).
pub fn filename_from_url_path(url: &str) -> Option<String> {
    let segment = match url::Url::parse(url) {
        Ok(parsed) => parsed
            .path()
            .split('/')
            .filter(|s| !s.is_empty())
            .last()
            .map(str::to_string)?,
        Err(_) => {
            let raw = url.split(['?', '#']).next().unwrap_or_default();
            raw.split('/').filter(|s| !s.is_empty()).last()?.to_string()
        }
    };
    if segment == "." || segment == ".." {
        return None;
    }
    Some(segment)
}
