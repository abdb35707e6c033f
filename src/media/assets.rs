/// Static asset resolution
///
/// Songs and relative image sources are stored as paths relative to the
/// site root. They are resolved against the configured base path so the
/// museum can live anywhere on disk (or under a sub-path of a mount).

/// Resolve `path` against `base`; without a base the result stays relative (`./path`).
pub fn resolve_asset(base: Option<&str>, path: &str) -> String {
    let clean = path.strip_prefix('/').unwrap_or(path);

    match base {
        Some(base) if !base.is_empty() => {
            format!("{}/{}", base.trim_end_matches('/'), clean)
        }
        _ => format!("./{}", clean),
    }
}

/// Strip a query string (`placeholder.svg?height=600`) so the result can be opened as a file
pub fn without_query(path: &str) -> &str {
    path.split_once('?').map_or(path, |(file, _)| file)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_relative_fallback_without_base() {
        assert_eq!(resolve_asset(None, "/song.mp3"), "./song.mp3");
        assert_eq!(resolve_asset(None, "song.mp3"), "./song.mp3");
        assert_eq!(resolve_asset(Some(""), "song.mp3"), "./song.mp3");
    }

    #[test]
    fn test_joins_base_without_double_separator() {
        assert_eq!(resolve_asset(Some("/srv/love-website/"), "/Sweet.mp3"), "/srv/love-website/Sweet.mp3");
        assert_eq!(resolve_asset(Some("assets"), "Sweet.mp3"), "assets/Sweet.mp3");
    }

    #[test]
    fn test_without_query() {
        assert_eq!(without_query("/placeholder.svg?height=600&width=800"), "/placeholder.svg");
        assert_eq!(without_query("photo.jpg"), "photo.jpg");
    }
}
