//! Shared utility functions.

/// Truncate a string to at most `max_bytes` without splitting a UTF-8
/// character.
///
/// Returns a sub-slice of the original string; strings already within the
/// limit come back unchanged.
pub fn truncate_str(s: &str, max_bytes: usize) -> &str {
    if s.len() <= max_bytes {
        return s;
    }
    let mut end = max_bytes;
    while end > 0 && !s.is_char_boundary(end) {
        end -= 1;
    }
    &s[..end]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn truncates_ascii() {
        assert_eq!(truncate_str("um gato cyberpunk", 7), "um gato");
    }

    #[test]
    fn no_op_when_short() {
        assert_eq!(truncate_str("oi", 30), "oi");
    }

    #[test]
    fn backs_up_to_char_boundary() {
        // 'ã' is two bytes; cutting at 3 lands inside it
        let s = "não";
        assert_eq!(truncate_str(s, 2), "n");
        assert_eq!(truncate_str(s, 3), "nã");
    }
}
