//! Frontmatter extraction from markdown sources.
//!
//! Supports YAML-like (`---`) and TOML (`+++`) delimiters. The YAML-like
//! parser handles flat `key: value` lines only; nested structures belong
//! in TOML frontmatter.

use anyhow::Result;

use super::entry::EntryMeta;

/// Extract frontmatter and body from markdown content.
///
/// Returns `None` if the content carries no frontmatter block.
pub fn extract_frontmatter(content: &str) -> Result<Option<(EntryMeta, &str)>> {
    match detect_frontmatter(content) {
        Some((fm, body, is_toml)) => {
            let meta = if is_toml {
                parse_toml(fm)?
            } else {
                parse_yaml_like(fm)
            };
            Ok(Some((meta, body)))
        }
        None => Ok(None),
    }
}

/// Detect a frontmatter block and split it from the body.
///
/// Returns `(frontmatter, body, is_toml)`.
fn detect_frontmatter(content: &str) -> Option<(&str, &str, bool)> {
    let trimmed = content.trim_start();

    // YAML: ---...---
    if trimmed.starts_with("---")
        && let Some(end) = trimmed[3..].find("\n---")
    {
        let fm = trimmed[3..3 + end].trim();
        let body = trimmed[3 + end + 4..].trim_start_matches('\n');
        return Some((fm, body, false));
    }

    // TOML: +++...+++
    if trimmed.starts_with("+++")
        && let Some(end) = trimmed[3..].find("\n+++")
    {
        let fm = trimmed[3..3 + end].trim();
        let body = trimmed[3 + end + 4..].trim_start_matches('\n');
        return Some((fm, body, true));
    }

    None
}

/// Parse simple YAML-like frontmatter (key: value).
///
/// Supports standard fields (title, date, etc.) and custom fields in `extra`.
fn parse_yaml_like(content: &str) -> EntryMeta {
    let mut meta = EntryMeta::default();

    for line in content.lines() {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }

        if let Some((key, value)) = line.split_once(':') {
            let key_lower = key.trim().to_lowercase();
            let value = unquote(value.trim());

            match key_lower.as_str() {
                "title" => meta.title = Some(value.to_string()),
                "description" => meta.description = Some(value.to_string()),
                "date" => meta.date = Some(value.to_string()),
                "updated" => meta.updated = Some(value.to_string()),
                "author" => meta.author = Some(value.to_string()),
                "draft" => meta.draft = value.eq_ignore_ascii_case("true"),
                "tags" => {
                    meta.tags = value
                        .trim_start_matches('[')
                        .trim_end_matches(']')
                        .split(',')
                        .map(|s| unquote(s.trim()).to_string())
                        .filter(|s| !s.is_empty())
                        .collect();
                }
                _ => {
                    // Custom field -> extra (preserve original key case)
                    let key = key.trim().to_string();
                    meta.extra
                        .insert(key, serde_json::Value::String(value.to_string()));
                }
            }
        }
    }

    meta
}

/// Parse TOML frontmatter.
fn parse_toml(content: &str) -> Result<EntryMeta> {
    toml::from_str(content).map_err(|e| anyhow::anyhow!("Invalid TOML frontmatter: {}", e))
}

/// Strip one matching pair of surrounding quotes.
fn unquote(value: &str) -> &str {
    let bytes = value.as_bytes();
    if bytes.len() >= 2
        && (bytes[0] == b'"' || bytes[0] == b'\'')
        && bytes[bytes.len() - 1] == bytes[0]
    {
        &value[1..value.len() - 1]
    } else {
        value
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_yaml_frontmatter() {
        let content = "---\ntitle: Hello\ndate: 2024-01-01\ntags: a, b\n---\n\n# Body";
        let (meta, body) = extract_frontmatter(content).unwrap().unwrap();

        assert_eq!(meta.title, Some("Hello".to_string()));
        assert_eq!(meta.date, Some("2024-01-01".to_string()));
        assert_eq!(meta.tags, vec!["a", "b"]);
        assert!(body.starts_with("# Body"));
    }

    #[test]
    fn test_yaml_frontmatter_quoted_values() {
        let content = "---\ntitle: \"Hello: World\"\ndescription: 'D1'\n---\nbody";
        let (meta, _) = extract_frontmatter(content).unwrap().unwrap();

        assert_eq!(meta.title, Some("Hello: World".to_string()));
        assert_eq!(meta.description, Some("D1".to_string()));
    }

    #[test]
    fn test_yaml_frontmatter_bracketed_tags() {
        let content = "---\ntags: [rust, \"web\"]\n---\nbody";
        let (meta, _) = extract_frontmatter(content).unwrap().unwrap();
        assert_eq!(meta.tags, vec!["rust", "web"]);
    }

    #[test]
    fn test_toml_frontmatter() {
        let content = "+++\ntitle = \"Hello\"\ntags = [\"a\", \"b\"]\n+++\n\n# Body";
        let (meta, body) = extract_frontmatter(content).unwrap().unwrap();

        assert_eq!(meta.title, Some("Hello".to_string()));
        assert_eq!(meta.tags, vec!["a", "b"]);
        assert!(body.starts_with("# Body"));
    }

    #[test]
    fn test_toml_frontmatter_extra_fields() {
        let content = "+++\ntitle = \"Hello\"\nhero = \"cover.png\"\n+++\nbody";
        let (meta, _) = extract_frontmatter(content).unwrap().unwrap();
        assert_eq!(
            meta.extra.get("hero").and_then(|v| v.as_str()),
            Some("cover.png")
        );
    }

    #[test]
    fn test_toml_frontmatter_invalid() {
        let content = "+++\ntitle = unquoted\n+++\nbody";
        assert!(extract_frontmatter(content).is_err());
    }

    #[test]
    fn test_no_frontmatter() {
        let content = "# Just content";
        assert!(extract_frontmatter(content).unwrap().is_none());
    }

    #[test]
    fn test_yaml_draft_flag() {
        let content = "---\ndraft: true\n---\nbody";
        let (meta, _) = extract_frontmatter(content).unwrap().unwrap();
        assert!(meta.draft);
    }
}
