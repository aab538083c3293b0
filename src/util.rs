use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};

/// Attributions and relations below this confidence read as doubtful.
pub const UNCERTAIN_CONFIDENCE: f32 = 0.7;

pub fn uncertain(confidence: f32) -> bool {
    confidence < UNCERTAIN_CONFIDENCE
}

pub fn stable_pair(id: &str) -> (f32, f32) {
    let mut hasher = DefaultHasher::new();
    id.hash(&mut hasher);
    let hash = hasher.finish();

    let x = ((hash & 0xffff_ffff) as f64 / u32::MAX as f64) as f32;
    let y = (((hash >> 32) & 0xffff_ffff) as f64 / u32::MAX as f64) as f32;
    ((x * 2.0) - 1.0, (y * 2.0) - 1.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stable_pair_is_deterministic_and_bounded() {
        let (x1, y1) = stable_pair("B3");
        let (x2, y2) = stable_pair("B3");
        assert_eq!((x1, y1), (x2, y2));
        assert!((-1.0..=1.0).contains(&x1));
        assert!((-1.0..=1.0).contains(&y1));
    }

    #[test]
    fn uncertainty_threshold() {
        assert!(uncertain(0.3));
        assert!(!uncertain(0.7));
        assert!(!uncertain(0.9));
    }
}
