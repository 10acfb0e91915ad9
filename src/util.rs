use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};

/// Canonical form for a flavor term as typed by the user.
pub fn normalize_term(raw: &str) -> Option<String> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_lowercase())
    }
}

/// Deterministic pseudo-random pair in [-1, 1] derived from a key, so the same
/// flavor seeds the same layout jitter on every rebuild.
pub fn stable_pair(key: &str) -> (f32, f32) {
    let mut hasher = DefaultHasher::new();
    key.hash(&mut hasher);
    let hash = hasher.finish();

    let x = ((hash & 0xffff_ffff) as f64 / u32::MAX as f64) as f32;
    let y = (((hash >> 32) & 0xffff_ffff) as f64 / u32::MAX as f64) as f32;
    ((x * 2.0) - 1.0, (y * 2.0) - 1.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalize_term_trims_and_lowercases() {
        assert_eq!(normalize_term("  Vanilla "), Some("vanilla".to_string()));
        assert_eq!(normalize_term("CARAMEL"), Some("caramel".to_string()));
    }

    #[test]
    fn normalize_term_rejects_blank_input() {
        assert_eq!(normalize_term(""), None);
        assert_eq!(normalize_term("   "), None);
    }

    #[test]
    fn stable_pair_is_deterministic_and_bounded() {
        let (x1, y1) = stable_pair("vanilla");
        let (x2, y2) = stable_pair("vanilla");
        assert_eq!((x1, y1), (x2, y2));
        assert!((-1.0..=1.0).contains(&x1));
        assert!((-1.0..=1.0).contains(&y1));
    }
}
