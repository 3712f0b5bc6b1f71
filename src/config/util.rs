//! Configuration loading helpers.

use std::path::{Path, PathBuf};

/// Search upward from the current directory for the config file.
///
/// Returns the first existing `{dir}/{name}` walking from cwd to the
/// filesystem root.
pub fn find_config_file(name: &Path) -> Option<PathBuf> {
    let mut dir = std::env::current_dir().ok()?;

    loop {
        let candidate = dir.join(name);
        if candidate.is_file() {
            return Some(candidate);
        }
        if !dir.pop() {
            return None;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_find_config_file_missing() {
        assert!(find_config_file(Path::new("definitely-not-a-real-config-name.toml")).is_none());
    }
}
