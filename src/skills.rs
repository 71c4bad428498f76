/// A skill counts as present above this partial-ratio score (0-100 scale).
pub const FUZZY_THRESHOLD: f64 = 90.0;

fn lcs_len(a: &[char], b: &[char]) -> usize {
    let mut row = vec![0usize; b.len() + 1];
    for &ca in a {
        let mut diag = 0;
        for (j, &cb) in b.iter().enumerate() {
            let above = row[j + 1];
            row[j + 1] = if ca == cb { diag + 1 } else { above.max(row[j]) };
            diag = above;
        }
    }
    row[b.len()]
}

// 2 * LCS / (len_a + len_b), scaled to 100
fn indel_ratio(a: &[char], b: &[char]) -> f64 {
    let total = a.len() + b.len();
    if total == 0 {
        return 0.0;
    }
    200.0 * lcs_len(a, b) as f64 / total as f64
}

/// Best indel ratio (0-100) of the shorter string against any window of the longer one.
pub fn partial_ratio(needle: &str, haystack: &str) -> f64 {
    let a: Vec<char> = needle.chars().collect();
    let b: Vec<char> = haystack.chars().collect();
    if a.is_empty() || b.is_empty() {
        return 0.0;
    }

    let (short, long) = if a.len() <= b.len() { (a, b) } else { (b, a) };
    let width = short.len();

    let mut best = 0.0_f64;
    // window ends run from the first char to past the last one
    for end in 1..long.len() + width {
        let start = end.saturating_sub(width);
        let window = &long[start..end.min(long.len())];
        best = best.max(indel_ratio(&short, window));
        if best >= 100.0 {
            break;
        }
    }
    best
}

/// Fraction of `skills` found in `text`. Duplicate entries each count.
pub fn score_skills<S: AsRef<str>>(text: &str, skills: &[S]) -> f64 {
    let text_low = text.to_lowercase();
    let hits = skills
        .iter()
        .filter(|skill| {
            let skill = skill.as_ref().to_lowercase();
            text_low.contains(&skill) || partial_ratio(&skill, &text_low) > FUZZY_THRESHOLD
        })
        .count();
    hits as f64 / skills.len().max(1) as f64
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn exact_substrings_are_case_insensitive() {
        let skills = ["Python", "SQL", "pandas", "docker"];
        let score = score_skills("I love python and sql for analytics", &skills);
        assert_eq!(score, 0.5);
    }

    #[test]
    fn near_misses_match_fuzzily() {
        assert!(partial_ratio("scikit-learn", "experience with scikit learn models") > FUZZY_THRESHOLD);
        assert_eq!(score_skills("Built models in Scikit Learn", &["scikit-learn"]), 1.0);
    }

    #[test]
    fn dropped_punctuation_still_matches() {
        assert!(partial_ratio("scikit-learn", "built models with scikitlearn") > FUZZY_THRESHOLD);
        assert_eq!(score_skills("Built models with scikitlearn", &["scikit-learn"]), 1.0);
    }

    #[test]
    fn indel_ratio_counts_insertions_and_deletions() {
        let a: Vec<char> = "scikit-learn".chars().collect();
        let b: Vec<char> = " scikitlearn".chars().collect();
        let ratio = indel_ratio(&a, &b);
        assert!((ratio - 2200.0 / 24.0).abs() < 1e-9);
        assert_eq!(indel_ratio(&[], &[]), 0.0);
    }

    #[test]
    fn unrelated_skill_does_not_match() {
        assert!(partial_ratio("kubernetes", "project manager, stakeholder comms") < FUZZY_THRESHOLD);
        assert_eq!(score_skills("Project manager, stakeholder comms", &["kubernetes", "python"]), 0.0);
    }

    #[test]
    fn empty_skill_list_scores_zero() {
        let none: [&str; 0] = [];
        assert_eq!(score_skills("python sql", &none), 0.0);
    }

    #[test]
    fn duplicates_inflate_the_denominator() {
        assert_eq!(score_skills("python", &["python", "python", "rust", "go lang"]), 0.5);
    }

    #[test]
    fn order_does_not_matter() {
        let text = "ETL pipelines with pandas and numpy";
        let a = score_skills(text, &["etl", "mlops", "numpy"]);
        let b = score_skills(text, &["numpy", "etl", "mlops"]);
        assert_eq!(a, b);
    }

    #[test]
    fn score_is_a_fraction() {
        let skills = ["python", "sql", "pandas", "numpy", "scikit-learn", "streamlit"];
        for text in ["", "python", "python sql pandas numpy scikit-learn streamlit", "x"] {
            let s = score_skills(text, &skills);
            assert!((0.0..=1.0).contains(&s));
        }
    }

    #[test]
    fn partial_ratio_handles_edges() {
        assert_eq!(partial_ratio("", "abc"), 0.0);
        assert_eq!(partial_ratio("abc", "abc"), 100.0);
        assert_eq!(partial_ratio("a longer needle", "abc"), partial_ratio("abc", "a longer needle"));
    }
}
