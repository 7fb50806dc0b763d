//! In-place random permutation.

use rand::Rng;

/// Shuffle `items` in place with a Fisher–Yates pass.
///
/// Walks from the last index down to 1, swapping each element with a
/// uniformly chosen element at or below it. Pass a seeded RNG for a
/// reproducible order.
pub fn shuffle<T, R: Rng + ?Sized>(items: &mut [T], rng: &mut R) {
    for i in (1..items.len()).rev() {
        let j = rng.gen_range(0..=i);
        items.swap(i, j);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_shuffle_is_permutation() {
        let mut rng = StdRng::seed_from_u64(7);
        let original: Vec<u32> = (0..50).collect();
        let mut shuffled = original.clone();
        shuffle(&mut shuffled, &mut rng);

        assert_eq!(shuffled.len(), original.len());
        let mut sorted = shuffled.clone();
        sorted.sort_unstable();
        assert_eq!(sorted, original);
    }

    #[test]
    fn test_shuffle_keeps_duplicates() {
        let mut rng = StdRng::seed_from_u64(3);
        let mut items = vec!["a", "b", "a", "c", "a"];
        shuffle(&mut items, &mut rng);
        assert_eq!(items.iter().filter(|s| **s == "a").count(), 3);
        assert_eq!(items.len(), 5);
    }

    #[test]
    fn test_shuffle_is_deterministic_for_seed() {
        let mut a: Vec<u32> = (0..20).collect();
        let mut b = a.clone();
        shuffle(&mut a, &mut StdRng::seed_from_u64(99));
        shuffle(&mut b, &mut StdRng::seed_from_u64(99));
        assert_eq!(a, b);
    }

    #[test]
    fn test_shuffle_moves_something() {
        let mut rng = StdRng::seed_from_u64(1);
        let original: Vec<u32> = (0..100).collect();
        let mut shuffled = original.clone();
        shuffle(&mut shuffled, &mut rng);
        assert_ne!(shuffled, original);
    }

    #[test]
    fn test_shuffle_trivial_inputs() {
        let mut rng = StdRng::seed_from_u64(0);
        let mut empty: Vec<u8> = Vec::new();
        shuffle(&mut empty, &mut rng);
        assert!(empty.is_empty());

        let mut single = vec![42];
        shuffle(&mut single, &mut rng);
        assert_eq!(single, vec![42]);
    }
}
