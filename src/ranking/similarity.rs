//! Edit-distance based title similarity.

/// Levenshtein distance between `a` and `b`, counted in `char`s.
///
/// Uses two rolling rows, so memory is linear in the length of `b`.
pub fn edit_distance(a: &str, b: &str) -> usize {
    let b_chars: Vec<char> = b.chars().collect();
    let b_len = b_chars.len();

    let mut prev: Vec<usize> = (0..=b_len).collect();
    let mut curr = vec![0; b_len + 1];

    for (i, ac) in a.chars().enumerate() {
        curr[0] = i + 1;
        for (j, &bc) in b_chars.iter().enumerate() {
            let cost = if ac == bc { 0 } else { 1 };
            curr[j + 1] = (prev[j + 1] + 1).min(curr[j] + 1).min(prev[j] + cost);
        }
        std::mem::swap(&mut prev, &mut curr);
    }

    prev[b_len]
}

/// Normalized similarity `1 - distance / max_len`, rounded to three decimals.
///
/// Two empty strings are identical and score `1.0`. Only identical strings
/// score `1.0`; very long titles differing in a few characters are capped at
/// `0.999` instead of rounding up.
pub fn similarity(a: &str, b: &str) -> f64 {
    let max_len = a.chars().count().max(b.chars().count());
    if max_len == 0 {
        return 1.0;
    }

    let distance = edit_distance(a, b);
    let score = round3(1.0 - distance as f64 / max_len as f64);
    if distance > 0 {
        score.min(MAX_DIFFERENT)
    } else {
        score
    }
}

/// Highest score for strings that are not identical.
const MAX_DIFFERENT: f64 = 0.999;

fn round3(value: f64) -> f64 {
    (value * 1000.0).round() / 1000.0
}

#[cfg(test)]
mod tests {
    use super::{edit_distance, similarity};

    const SAMPLES: &[&str] = &[
        "",
        "a",
        "Cat",
        "Cats",
        "Dog",
        "kitten",
        "sitting",
        "정부, 내년 예산안 국회 제출",
        "정부 내년 예산안 발표",
        "Breaking: markets rally after rate cut",
    ];

    #[test]
    fn edit_distance_matches_known_values() {
        assert_eq!(edit_distance("kitten", "sitting"), 3);
        assert_eq!(edit_distance("", "abc"), 3);
        assert_eq!(edit_distance("abc", ""), 3);
        assert_eq!(edit_distance("flaw", "lawn"), 2);
        assert_eq!(edit_distance("same", "same"), 0);
    }

    #[test]
    fn edit_distance_counts_chars_not_bytes() {
        assert_eq!(edit_distance("café", "cafe"), 1);
        assert_eq!(edit_distance("뉴스", "뉴스"), 0);
        assert_eq!(edit_distance("가짜뉴스", "진짜뉴스"), 1);
    }

    #[test]
    fn similarity_is_one_for_identical_strings() {
        for s in SAMPLES {
            assert_eq!(similarity(s, s), 1.0, "similarity({s:?}, {s:?})");
        }
    }

    #[test]
    fn similarity_is_symmetric_and_bounded() {
        for a in SAMPLES {
            for b in SAMPLES {
                let ab = similarity(a, b);
                assert_eq!(ab, similarity(b, a), "symmetry for {a:?} / {b:?}");
                assert!((0.0..=1.0).contains(&ab), "{ab} out of range");
            }
        }
    }

    #[test]
    fn similarity_is_below_one_for_different_strings() {
        assert!(similarity("Cat", "Cats") < 1.0);
        assert!(similarity("", "a") < 1.0);
    }

    #[test]
    fn long_titles_differing_in_one_char_stay_below_one() {
        let a = "a".repeat(2500);
        let b = format!("{}b", "a".repeat(2499));

        assert_eq!(edit_distance(&a, &b), 1);
        assert_eq!(similarity(&a, &b), 0.999);
        assert_eq!(similarity(&a, &a), 1.0);
    }

    #[test]
    fn similarity_rounds_to_three_decimals() {
        assert_eq!(similarity("Cat", "Cats"), 0.75);
        assert_eq!(similarity("Cat", "Dog"), 0.0);
        assert_eq!(similarity("Cat", "Cot"), 0.667);
        assert_eq!(similarity("kitten", "sitting"), 0.571);
    }

    #[test]
    fn similarity_decreases_with_more_edits() {
        let base = "national assembly passes budget";
        let one = "national assembly passes budgets";
        let two = "national assembly passed budgets";
        assert!(similarity(base, one) > similarity(base, two));
    }
}
