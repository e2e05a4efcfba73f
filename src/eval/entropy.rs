use std::collections::HashMap;

/// Empirical Shannon entropy of a sample, in bits per character.
///
/// Each distinct `char` contributes `-p * log2(p)` where `p` is its share of
/// the sample's characters. This is a relative signal about how evenly the
/// characters are distributed, not an estimate of guessing effort.
///
/// The empty string has no distribution; it yields `0.0` by convention.
pub fn shannon_entropy(sample: &str) -> f64 {
    let mut frequency: HashMap<char, usize> = HashMap::new();
    let mut length = 0usize;
    for ch in sample.chars() {
        *frequency.entry(ch).or_insert(0) += 1;
        length += 1;
    }

    if length == 0 {
        return 0.0;
    }

    let length = length as f64;
    frequency
        .values()
        .map(|&count| {
            let probability = count as f64 / length;
            -probability * probability.log2()
        })
        .sum()
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPSILON: f64 = 1e-12;

    #[test]
    fn test_single_repeated_character_is_zero() {
        for sample in ["a", "aaaa", "zzzzzzzzzzzz", "ßßß", "1111111"] {
            assert_eq!(shannon_entropy(sample), 0.0, "sample {sample:?}");
        }
    }

    #[test]
    fn test_all_distinct_is_log2_len() {
        let pool: Vec<char> = "abcdefghijklmnopqrstuvwxyz0123456789!@#$".chars().collect();
        for n in 1..=pool.len() {
            let sample: String = pool[..n].iter().collect();
            let expected = (n as f64).log2();
            assert!(
                (shannon_entropy(&sample) - expected).abs() < EPSILON,
                "n = {n}"
            );
        }
    }

    #[test]
    fn test_known_values() {
        assert_eq!(shannon_entropy("abcd"), 2.0);
        assert_eq!(shannon_entropy("aabb"), 1.0);
        // p = 3/4 and 1/4
        let expected = -(0.75f64 * 0.75f64.log2() + 0.25 * 0.25f64.log2());
        assert!((shannon_entropy("aaab") - expected).abs() < EPSILON);
    }

    #[test]
    fn test_permutation_invariant() {
        let base = shannon_entropy("password123!");
        for permuted in ["123!password", "!321drowssap", "pa1s2s3w!ord", "drowssap!123"] {
            assert!((shannon_entropy(permuted) - base).abs() < EPSILON);
        }
    }

    #[test]
    fn test_counts_characters_not_bytes() {
        // Two distinct multi-byte characters behave like any two distinct chars
        assert_eq!(shannon_entropy("éü"), 1.0);
    }

    #[test]
    fn test_empty_is_zero() {
        assert_eq!(shannon_entropy(""), 0.0);
    }
}
