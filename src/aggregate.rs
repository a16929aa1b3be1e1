//! Label frequency aggregation and ranking
//!
//! Pure functions over the flat label list a collector produces. The
//! reporting layer consumes the output as plain data; no formatting
//! happens here.

use std::collections::HashMap;

/// One ranked label with its occurrence count
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LabelCount {
    pub label: String,
    pub count: usize,
}

/// Ranks labels by occurrence count
///
/// Counting is case-sensitive over whitespace-trimmed labels. The ranking
/// is ordered by count descending; labels with equal counts keep the order
/// in which they first appeared in the input.
pub fn rank_labels(labels: &[String]) -> Vec<LabelCount> {
    // label -> (count, index of first appearance)
    let mut counts: HashMap<&str, (usize, usize)> = HashMap::new();

    for (index, label) in labels.iter().enumerate() {
        let label = label.trim();
        let entry = counts.entry(label).or_insert((0, index));
        entry.0 += 1;
    }

    let mut ranked: Vec<(&str, (usize, usize))> = counts.into_iter().collect();
    ranked.sort_by(|(_, (count_a, first_a)), (_, (count_b, first_b))| {
        count_b.cmp(count_a).then(first_a.cmp(first_b))
    });

    ranked
        .into_iter()
        .map(|(label, (count, _))| LabelCount {
            label: label.to_string(),
            count,
        })
        .collect()
}

/// Returns up to `n` most common labels
///
/// `n == 0` yields an empty ranking; `n` larger than the number of distinct
/// labels returns all of them.
pub fn top_n(labels: &[String], n: usize) -> Vec<LabelCount> {
    let mut ranked = rank_labels(labels);
    ranked.truncate(n);
    ranked
}

#[cfg(test)]
mod tests {
    use super::*;

    fn labels(raw: &[&str]) -> Vec<String> {
        raw.iter().map(|s| s.to_string()).collect()
    }

    fn pairs(ranked: &[LabelCount]) -> Vec<(&str, usize)> {
        ranked.iter().map(|lc| (lc.label.as_str(), lc.count)).collect()
    }

    #[test]
    fn test_empty_input_empty_ranking() {
        assert!(top_n(&[], 0).is_empty());
        assert!(top_n(&[], 1).is_empty());
        assert!(top_n(&[], 100).is_empty());
    }

    #[test]
    fn test_top_one() {
        let input = labels(&["a", "b", "a"]);
        assert_eq!(pairs(&top_n(&input, 1)), vec![("a", 2)]);
    }

    #[test]
    fn test_n_larger_than_distinct_count_returns_all() {
        let input = labels(&["a", "b", "a"]);
        assert_eq!(pairs(&top_n(&input, 5)), vec![("a", 2), ("b", 1)]);
    }

    #[test]
    fn test_n_zero_is_empty() {
        let input = labels(&["a", "b", "a"]);
        assert!(top_n(&input, 0).is_empty());
    }

    #[test]
    fn test_ties_break_by_first_appearance() {
        let input = labels(&["b", "a", "c", "a", "b", "c"]);
        assert_eq!(pairs(&rank_labels(&input)), vec![("b", 2), ("a", 2), ("c", 2)]);
    }

    #[test]
    fn test_counting_is_case_sensitive() {
        let input = labels(&["Rust", "rust", "Rust"]);
        assert_eq!(pairs(&rank_labels(&input)), vec![("Rust", 2), ("rust", 1)]);
    }

    #[test]
    fn test_labels_trimmed_before_counting() {
        let input = labels(&[" rust ", "rust"]);
        assert_eq!(pairs(&rank_labels(&input)), vec![("rust", 2)]);
    }
}
