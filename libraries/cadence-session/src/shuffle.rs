//! Shuffle index picking
//!
//! Shuffle advances by jumping to a uniformly random queue position
//! different from the current one. The re-roll is bounded so a
//! pathological RNG can never loop forever; after the retries run out
//! the pick falls back to a deterministic linear step.

use rand::Rng;

/// Bounded re-roll attempts before the deterministic fallback
const RETRY_GUARD: usize = 8;

/// Pick a random index in `0..len` different from `exclude`
///
/// For `len <= 1` there is nothing else to pick and `exclude` comes
/// straight back. Otherwise up to [`RETRY_GUARD`] uniform draws are
/// made; if every one of them lands on `exclude`, the result is
/// `(exclude + 1) % len`.
pub fn pick_random_index<R: Rng>(rng: &mut R, len: usize, exclude: usize) -> usize {
    if len <= 1 {
        return exclude;
    }
    let mut index = exclude;
    let mut guard = 0;
    while guard < RETRY_GUARD && index == exclude {
        index = rng.gen_range(0..len);
        guard += 1;
    }
    if index == exclude {
        (exclude + 1) % len
    } else {
        index
    }
}
