//! Feature Layout - column order the model was trained on
//!
//! A model artifact stores the feature names it was fitted with. Loading
//! fails unless they match this layout exactly, order included.

use crc32fast::Hasher;

/// Current feature layout version
/// MUST be incremented when layout changes
pub const FEATURE_VERSION: u8 = 1;

/// Feature names in exact order they appear in a row
pub const FEATURE_LAYOUT: &[&str] = &[
    "age",  // 0
    "sex",  // 1: 0/1 indicator
    "bmi",  // 2
    "bp",   // 3: blood pressure
    "s1",   // 4: total cholesterol
    "s2",   // 5: LDL
    "s3",   // 6: HDL
    "s4",   // 7: TCH/HDL ratio
    "s5",   // 8: log serum triglycerides
    "s6",   // 9: blood sugar
];

/// Total number of features
/// IMPORTANT: Must match FEATURE_LAYOUT.len()!
pub const FEATURE_COUNT: usize = 10;

/// One input row in layout order
pub type FeatureRow = [f64; FEATURE_COUNT];

/// CRC32 over version and names, used to spot layout mismatches in logs
pub fn layout_hash() -> u32 {
    let mut hasher = Hasher::new();
    hasher.update(&[FEATURE_VERSION]);

    for name in FEATURE_LAYOUT {
        hasher.update(name.as_bytes());
        hasher.update(&[0]);
    }

    hasher.finalize()
}

/// Check a list of artifact feature names against the layout.
///
/// Returns the first position that differs, as `(index, expected, found)`.
pub fn first_mismatch<S: AsRef<str>>(names: &[S]) -> Option<(usize, &'static str, String)> {
    for (i, expected) in FEATURE_LAYOUT.iter().enumerate() {
        match names.get(i) {
            Some(found) if found.as_ref() == *expected => {}
            Some(found) => return Some((i, expected, found.as_ref().to_string())),
            None => return Some((i, expected, "<missing>".to_string())),
        }
    }

    if names.len() > FEATURE_COUNT {
        let extra = names[FEATURE_COUNT].as_ref().to_string();
        return Some((FEATURE_COUNT, "<end>", extra));
    }

    None
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_feature_count() {
        assert_eq!(FEATURE_LAYOUT.len(), FEATURE_COUNT);
    }

    #[test]
    fn test_layout_hash_is_stable() {
        assert_eq!(layout_hash(), layout_hash());
    }

    #[test]
    fn test_first_mismatch() {
        assert!(first_mismatch(FEATURE_LAYOUT).is_none());

        let swapped = ["sex", "age", "bmi", "bp", "s1", "s2", "s3", "s4", "s5", "s6"];
        let (idx, expected, found) = first_mismatch(&swapped[..]).unwrap();
        assert_eq!(idx, 0);
        assert_eq!(expected, "age");
        assert_eq!(found, "sex");

        let short = ["age", "sex", "bmi"];
        assert_eq!(first_mismatch(&short[..]).unwrap().0, 3);

        let mut long: Vec<&str> = FEATURE_LAYOUT.to_vec();
        long.push("extra");
        assert_eq!(first_mismatch(&long[..]).unwrap().2, "extra");
    }
}
