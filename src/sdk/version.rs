//! SDK `VERSION` file parsing
//!
//! Every SDK release carries a small YAML-ish `VERSION` file at its root:
//!
//! ```text
//! release: "1.9.56"
//! timestamp: 1495054423
//! api_versions: ['1']
//! ```

use std::path::Path;

/// Read the release string from `<sdk>/VERSION`, if present and well formed.
pub fn read_release(sdk: &Path) -> Option<String> {
    let content = std::fs::read_to_string(sdk.join("VERSION")).ok()?;
    parse_release(&content)
}

/// Extract the `release:` value from `VERSION` file contents.
pub fn parse_release(content: &str) -> Option<String> {
    content.lines().find_map(|line| {
        let value = line.trim().strip_prefix("release:")?;
        let value = value.trim().trim_matches(|c| c == '"' || c == '\'');
        (!value.is_empty()).then(|| value.to_string())
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_release() {
        let content = "release: \"1.9.56\"\ntimestamp: 1495054423\napi_versions: ['1']\n";
        assert_eq!(parse_release(content).as_deref(), Some("1.9.56"));
    }

    #[test]
    fn test_parse_release_single_quotes() {
        assert_eq!(parse_release("release: '1.9.40'").as_deref(), Some("1.9.40"));
    }

    #[test]
    fn test_parse_release_missing() {
        assert_eq!(parse_release("timestamp: 1\n"), None);
        assert_eq!(parse_release("release: \"\"\n"), None);
    }

    #[test]
    fn test_read_release_from_dir() {
        let dir = tempfile::tempdir().unwrap();
        assert_eq!(read_release(dir.path()), None);
        std::fs::write(dir.path().join("VERSION"), "release: \"1.9.50\"\n").unwrap();
        assert_eq!(read_release(dir.path()).as_deref(), Some("1.9.50"));
    }
}
