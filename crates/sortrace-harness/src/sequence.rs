use rand::seq::SliceRandom;
use rand::Rng;

/// The values `1..=size` in random order.
pub fn shuffled_sequence<R: Rng + ?Sized>(size: usize, rng: &mut R) -> Vec<i64> {
    let mut data: Vec<i64> = (1..=size as i64).collect();
    data.shuffle(rng);
    data
}
