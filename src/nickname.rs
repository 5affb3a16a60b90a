//! Mute marker handling for the displayed nickname.

/// Appended to the nickname while muted.
pub const MUTE_SUFFIX: &str = " [MUTED]";

/// Nickname to publish when muting, or `None` if it already carries the marker.
pub fn with_mute_suffix(nickname: &str, suffix: &str) -> Option<String> {
    if nickname.ends_with(suffix) {
        return None;
    }
    let mut marked = String::with_capacity(nickname.len() + suffix.len());
    marked.push_str(nickname);
    marked.push_str(suffix);
    Some(marked)
}

/// Nickname to publish when unmuting, or `None` if the marker is absent.
///
/// Only a trailing marker is removed, so a name edited while muted is left alone.
pub fn without_mute_suffix<'a>(nickname: &'a str, suffix: &str) -> Option<&'a str> {
    nickname.strip_suffix(suffix)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_suffix_is_appended_once() {
        let marked = with_mute_suffix("Alice", MUTE_SUFFIX).unwrap();
        assert_eq!(marked, "Alice [MUTED]");
        assert_eq!(with_mute_suffix(&marked, MUTE_SUFFIX), None);
    }

    #[test]
    fn test_strip_only_when_present() {
        assert_eq!(
            without_mute_suffix("Alice [MUTED]", MUTE_SUFFIX),
            Some("Alice")
        );
        assert_eq!(without_mute_suffix("Alice", MUTE_SUFFIX), None);
        // Shorter than the marker: never truncated
        assert_eq!(without_mute_suffix("Bo", MUTE_SUFFIX), None);
        // Marker not at the end
        assert_eq!(without_mute_suffix("Alice [MUTED] afk", MUTE_SUFFIX), None);
    }

    #[test]
    fn test_multibyte_names() {
        let marked = with_mute_suffix("Zoë", MUTE_SUFFIX).unwrap();
        assert_eq!(without_mute_suffix(&marked, MUTE_SUFFIX), Some("Zoë"));
    }

    #[test]
    fn test_suffix_length() {
        assert_eq!(MUTE_SUFFIX.chars().count(), 8);
    }
}
