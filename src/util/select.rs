use rand::{seq::IndexedRandom, Rng};

/// Picks up to `count` distinct items uniformly at random.
///
/// Selection is without replacement, so no item appears twice in the result. When
/// `count` is at least the number of items, every item is returned (order unspecified).
///
/// # Arguments
/// - `items` - Candidates to choose from
/// - `count` - Number of items requested
/// - `rng` - Random source
///
/// # Returns
/// - `Vec<T>` - `min(count, items.len())` items drawn from `items`
pub fn choose_random_subset<T: Clone, R: Rng + ?Sized>(
    items: &[T],
    count: usize,
    rng: &mut R,
) -> Vec<T> {
    items
        .choose_multiple(rng, count.min(items.len()))
        .cloned()
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::{rngs::StdRng, SeedableRng};
    use std::collections::{HashMap, HashSet};

    /// Tests that the result size is capped by the candidate count.
    ///
    /// Expected: min(count, len) items
    #[test]
    fn caps_result_at_item_count() {
        let mut rng = StdRng::seed_from_u64(1);
        let items = vec![1u64, 2, 3];

        assert_eq!(choose_random_subset(&items, 2, &mut rng).len(), 2);
        assert_eq!(choose_random_subset(&items, 3, &mut rng).len(), 3);
        assert_eq!(choose_random_subset(&items, 10, &mut rng).len(), 3);
    }

    /// Tests that requesting everything returns every item.
    ///
    /// Expected: Same set of items
    #[test]
    fn returns_all_items_when_count_exceeds_len() {
        let mut rng = StdRng::seed_from_u64(2);
        let items = vec![10u64, 20, 30, 40];

        let chosen: HashSet<u64> = choose_random_subset(&items, 8, &mut rng)
            .into_iter()
            .collect();

        assert_eq!(chosen, items.into_iter().collect());
    }

    /// Tests the empty edge cases.
    ///
    /// Expected: Empty result for zero count or no items
    #[test]
    fn empty_for_zero_count_or_no_items() {
        let mut rng = StdRng::seed_from_u64(3);

        assert!(choose_random_subset(&[1u64, 2], 0, &mut rng).is_empty());
        assert!(choose_random_subset::<u64, _>(&[], 3, &mut rng).is_empty());
    }

    /// Tests that results never contain duplicates and come from the input.
    ///
    /// Expected: Distinct members of the input on every draw
    #[test]
    fn results_are_distinct_members() {
        let mut rng = StdRng::seed_from_u64(4);
        let items: Vec<u64> = (100..120).collect();

        for count in 0..25 {
            let chosen = choose_random_subset(&items, count, &mut rng);
            let unique: HashSet<&u64> = chosen.iter().collect();

            assert_eq!(unique.len(), chosen.len());
            assert!(chosen.iter().all(|item| items.contains(item)));
        }
    }

    /// Tests that every item gets picked with roughly equal frequency.
    ///
    /// Expected: Each of 5 items picked roughly 2/5 of 5000 draws of 2
    #[test]
    fn selection_is_roughly_uniform() {
        let mut rng = StdRng::seed_from_u64(5);
        let items = vec![1u64, 2, 3, 4, 5];
        let mut counts: HashMap<u64, u32> = HashMap::new();

        for _ in 0..5000 {
            for item in choose_random_subset(&items, 2, &mut rng) {
                *counts.entry(item).or_default() += 1;
            }
        }

        for item in &items {
            let count = counts.get(item).copied().unwrap_or_default();
            assert!((1700..2300).contains(&count), "item {} picked {} times", item, count);
        }
    }
}
