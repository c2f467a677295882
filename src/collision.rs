//! Pairwise collision resolution between two entity groups.

use crate::actors::Damageable;

/// Tests every pair across the two groups and damages both sides of each
/// overlapping pair.  Returns the number of overlapping pairs.
///
/// Pairs are not filtered by liveness: an entity touching several opponents
/// is hit once per opponent, and a shot destroyed earlier in the same pass
/// still damages whatever else it overlaps.
pub fn resolve_collisions<A, B>(first: &mut [A], second: &mut [B]) -> usize
where
    A: Damageable,
    B: Damageable,
{
    let mut hits = 0;
    for a in first.iter_mut() {
        for b in second.iter_mut() {
            if a.hitbox().intersects(&b.hitbox()) {
                a.take_damage();
                b.take_damage();
                hits += 1;
            }
        }
    }
    hits
}
