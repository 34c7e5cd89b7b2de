use rand::Rng;

/// Draws one index from a categorical distribution (single-trial multinomial).
///
/// A uniform number in `[0, 1)` is walked down the cumulative intervals of
/// `probabilities`; the index whose interval contains it is returned.
/// Zero-probability entries are never selected.
///
/// Returns `None` if every entry is zero (or the slice is empty).
pub(crate) fn sample<R: Rng + ?Sized>(probabilities: &[f64], rng: &mut R) -> Option<usize> {
	let mut r: f64 = rng.random();

	let mut fallback: Option<usize> = None;
	for (index, &probability) in probabilities.iter().enumerate() {
		if probability <= 0.0 {
			continue;
		}
		if r < probability {
			return Some(index);
		}
		r -= probability;
		fallback = Some(index);
	}

	// Rounding can leave `r` just above the last interval
	fallback
}
