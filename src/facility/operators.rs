//! Open-set moves: the random starting configuration and the flip neighborhood.
//!
//! Neither operator looks at costs; feasibility is discovered downstream by
//! the greedy allocator.

use rand::seq::{index, SliceRandom};
use rand::Rng;

use crate::model::{Instance, OpenSet};

/// Flips `flip_count` distinct facilities, chosen uniformly without
/// replacement. If that leaves every facility closed, one facility chosen
/// uniformly at random is forced open.
///
/// `flip_count` is clamped to the number of facilities.
///
/// # Examples
///
/// ```
/// use rand::SeedableRng;
/// use rand_chacha::ChaCha8Rng;
/// use u_facility::facility::flip_neighbor;
/// use u_facility::model::OpenSet;
///
/// let mut rng = ChaCha8Rng::seed_from_u64(1);
/// let current = OpenSet::from_flags(vec![true, false, true, false]);
/// let next = flip_neighbor(&current, 1, &mut rng);
/// assert_eq!(next.differences(&current), 1);
/// ```
pub fn flip_neighbor<R: Rng + ?Sized>(
    open_set: &OpenSet,
    flip_count: usize,
    rng: &mut R,
) -> OpenSet {
    let n = open_set.len();
    let mut neighbor = open_set.clone();
    if n == 0 {
        return neighbor;
    }

    for i in index::sample(rng, n, flip_count.min(n)) {
        neighbor.toggle(i);
    }

    if !neighbor.any_open() {
        neighbor.set(rng.random_range(0..n), true);
    }
    neighbor
}

/// Opens facilities in a random order until their combined capacity covers
/// total demand.
///
/// If even all facilities together fall short, every facility is open and
/// the result is infeasible; the allocator reports that as an infinite cost.
pub fn initial_open_set<R: Rng + ?Sized>(instance: &Instance, rng: &mut R) -> OpenSet {
    let n = instance.num_facilities();
    let total_demand = instance.total_demand();

    let mut order: Vec<usize> = (0..n).collect();
    order.shuffle(rng);

    let mut open_set = OpenSet::all_closed(n);
    let mut capacity = 0.0;
    for i in order {
        open_set.set(i, true);
        capacity += instance.facility(i).capacity;
        if capacity >= total_demand {
            break;
        }
    }
    open_set
}
