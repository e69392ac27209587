//! Path utilities: expand ~, validate absolute paths, etc.

use std::path::PathBuf;

pub fn expand_tilde(path: &str) -> PathBuf {
    if path.starts_with("~/")
        && let Some(home) = dirs::home_dir()
    {
        return home.join(path.trim_start_matches("~/"));
    }
    PathBuf::from(path)
}

pub fn is_absolute(path: &str) -> bool {
    PathBuf::from(path).is_absolute()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn leaves_plain_paths_untouched() {
        assert_eq!(expand_tilde("data/thymer.sqlite"), PathBuf::from("data/thymer.sqlite"));
        assert!(!is_absolute("data/thymer.sqlite"));
    }

    #[test]
    fn expands_home_prefix() {
        if let Some(home) = dirs::home_dir() {
            assert_eq!(expand_tilde("~/x.json"), home.join("x.json"));
        }
    }
}
