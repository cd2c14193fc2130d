//! Record id generation
//!
//! All ids use the format `{6-char-hex}-{kind}-{slug}`,
//! e.g. `019b2e-plan-24-birds-30-days`.

/// Generate a record id from kind and title
pub fn new_id(kind: &str, title: &str) -> String {
    let hex = uuid::Uuid::now_v7().simple().to_string();
    format!("{}-{}-{}", &hex[..6], kind, slug(title))
}

/// Lowercased, alphanumeric-only, hyphen-separated
fn slug(title: &str) -> String {
    let mut out = String::with_capacity(title.len());
    for c in title.to_lowercase().chars() {
        if c.is_alphanumeric() {
            out.push(c);
        } else if !out.is_empty() && !out.ends_with('-') {
            out.push('-');
        }
    }
    out.trim_end_matches('-').to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_id_shape() {
        let id = new_id("task", "Check brooder temperature");
        let parts: Vec<&str> = id.splitn(3, '-').collect();
        assert_eq!(parts[0].len(), 6);
        assert_eq!(parts[1], "task");
        assert_eq!(parts[2], "check-brooder-temperature");
    }

    #[test]
    fn test_slug_collapses_punctuation() {
        assert_eq!(slug("Feed & water -- twice!"), "feed-water-twice");
        assert_eq!(slug("  padded  "), "padded");
        assert_eq!(slug("Day 7: weigh-in"), "day-7-weigh-in");
    }

    #[test]
    fn test_ids_are_unique() {
        let a = new_id("plan", "same title");
        let b = new_id("plan", "same title");
        assert_ne!(a, b);
    }
}
