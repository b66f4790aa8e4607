use std::path::PathBuf;

use dirs_next::home_dir;

/// Expand a leading `~` (Unix or Windows separator) to the user's home directory.
///
/// Paths without a leading tilde are returned trimmed but otherwise untouched.
pub fn expand_tilde(path: &str) -> PathBuf {
    let trimmed = path.trim();
    let home = || home_dir().unwrap_or_else(|| PathBuf::from("~"));

    if trimmed == "~" {
        return home();
    }
    match trimmed.strip_prefix("~/").or_else(|| trimmed.strip_prefix("~\\")) {
        Some(rest) => home().join(rest),
        None => PathBuf::from(trimmed),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn leaves_plain_paths_alone() {
        assert_eq!(expand_tilde(" /tmp/otp.log "), PathBuf::from("/tmp/otp.log"));
        assert_eq!(expand_tilde("logs/~otp"), PathBuf::from("logs/~otp"));
    }

    #[test]
    fn expands_home_prefix() {
        let Some(home) = home_dir() else {
            return;
        };
        assert_eq!(expand_tilde("~"), home);
        assert_eq!(expand_tilde("~/prefs.json"), home.join("prefs.json"));
    }
}
