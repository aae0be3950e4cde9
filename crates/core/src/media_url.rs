//! Resolution of backend storage paths into fetchable asset URLs.
//!
//! The backend hands out key-frame and media paths in several shapes: absolute
//! URLs, public `/media/...` paths, absolute filesystem paths that embed the
//! media root, Windows paths, and bare relative names. All of them are mapped
//! onto `<base>/media/...`.

/// Public path prefix under which the backend serves static assets
pub const MEDIA_ROOT: &str = "/media/";

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MediaUrlResolver {
    base_url: String,
}

impl MediaUrlResolver {
    pub fn new(base_url: &str) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Resolve a raw path. An empty input yields an empty string, which callers
    /// treat as "asset unavailable".
    pub fn resolve(&self, raw_path: &str) -> String {
        resolve_media_url(&self.base_url, raw_path)
    }
}

pub fn resolve_media_url(base_url: &str, raw_path: &str) -> String {
    if raw_path.is_empty() {
        return String::new();
    }

    if raw_path.starts_with("http://") || raw_path.starts_with("https://") {
        return raw_path.to_string();
    }

    let normalized = raw_path.replace('\\', "/");

    if normalized.starts_with(MEDIA_ROOT) {
        return format!("{}{}", base_url, normalized);
    }

    // Filesystem prefixes ahead of the public root are discarded.
    if let Some(index) = normalized.rfind(MEDIA_ROOT) {
        return format!("{}{}", base_url, &normalized[index..]);
    }

    let relative = normalized
        .strip_prefix("./")
        .or_else(|| normalized.strip_prefix('/'))
        .unwrap_or(&normalized);

    format!("{}{}{}", base_url, MEDIA_ROOT, relative)
}

#[cfg(test)]
mod tests {
    use super::*;

    const BASE: &str = "http://127.0.0.1:8000";

    fn resolve(raw: &str) -> String {
        MediaUrlResolver::new(BASE).resolve(raw)
    }

    #[test]
    fn empty_path_is_unavailable() {
        assert_eq!(resolve(""), "");
    }

    #[test]
    fn absolute_urls_pass_through() {
        assert_eq!(
            resolve("https://cdn.example.com/media/frame.jpg"),
            "https://cdn.example.com/media/frame.jpg"
        );
        assert_eq!(resolve("http://other/x.jpg"), "http://other/x.jpg");
    }

    #[test]
    fn public_media_path_is_prefixed() {
        assert_eq!(
            resolve("/media/keyframes/a_0.jpg"),
            "http://127.0.0.1:8000/media/keyframes/a_0.jpg"
        );
    }

    #[test]
    fn windows_path_is_normalized() {
        assert_eq!(
            resolve(r"C:\data\media\frame1.jpg"),
            "http://127.0.0.1:8000/media/frame1.jpg"
        );
    }

    #[test]
    fn embedded_media_root_discards_leading_segments() {
        assert_eq!(
            resolve("/srv/app/data/03-processed/media/keyframes/b_3.jpg"),
            "http://127.0.0.1:8000/media/keyframes/b_3.jpg"
        );
    }

    #[test]
    fn last_media_root_occurrence_wins() {
        assert_eq!(
            resolve("/srv/media/archive/media/frame.jpg"),
            "http://127.0.0.1:8000/media/frame.jpg"
        );
    }

    #[test]
    fn bare_names_resolve_under_media_root() {
        assert_eq!(resolve("frame1.jpg"), "http://127.0.0.1:8000/media/frame1.jpg");
        assert_eq!(
            resolve("./keyframes/frame1.jpg"),
            "http://127.0.0.1:8000/media/keyframes/frame1.jpg"
        );
        assert_eq!(
            resolve("/keyframes/frame1.jpg"),
            "http://127.0.0.1:8000/media/keyframes/frame1.jpg"
        );
    }

    #[test]
    fn only_one_leading_separator_is_stripped() {
        assert_eq!(
            resolve(".//frame1.jpg"),
            "http://127.0.0.1:8000/media//frame1.jpg"
        );
    }

    #[test]
    fn resolver_strips_trailing_slash_from_base() {
        let resolver = MediaUrlResolver::new("http://localhost:8000/");
        assert_eq!(resolver.base_url(), "http://localhost:8000");
        assert_eq!(resolver.resolve("a.jpg"), "http://localhost:8000/media/a.jpg");
    }
}
