use rand::rngs::StdRng;
use rand::seq::index;
use rand::SeedableRng;

/// Draws `size` items uniformly without replacement, reproducibly for a given `seed`.
///
/// Asking for more items than exist returns every item (in sampled order) rather
/// than failing.
pub fn sample_uniform<T: Clone>(items: &[T], size: usize, seed: u64) -> Vec<T> {
    let amount = size.min(items.len());
    if amount < size {
        tracing::debug!(requested = size, available = items.len(), "Sample size capped to available rows.");
    }

    let mut rng = StdRng::seed_from_u64(seed);
    index::sample(&mut rng, items.len(), amount)
        .into_iter()
        .map(|i| items[i].clone())
        .collect()
}
