use sha1::{Digest, Sha1};

/// Fixed-width identity for a canonical title.
///
/// SHA-1 is plenty here: it is not a security boundary, just a cheap,
/// stable equality proxy so the store can put a unique index on a 40-char
/// column instead of arbitrary-length text.
pub fn topic_key(canonical_title: &str) -> String {
    let mut hasher = Sha1::new();
    hasher.update(canonical_title.as_bytes());
    format!("{:x}", hasher.finalize())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn digest_is_stable_across_calls() {
        assert_eq!(
            topic_key("team wins match"),
            "dbe6a89e07202668b358e21334a27a613db25d20"
        );
        assert_eq!(
            topic_key(""),
            "da39a3ee5e6b4b0d3255bfef95601890afd80709"
        );
    }

    #[test]
    fn distinct_titles_get_distinct_keys() {
        assert_ne!(topic_key("team wins match"), topic_key("team loses match"));
    }

    #[test]
    fn key_is_forty_hex_chars() {
        let key = topic_key("anything at all");
        assert_eq!(key.len(), 40);
        assert!(key.chars().all(|c| c.is_ascii_hexdigit()));
    }
}
