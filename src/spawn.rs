//! Per-level spawn policy for the enemy group.

use rand::Rng;

use crate::actors::{Boss, EnemyPlane, Fighter};
use crate::entities::{Arena, EntityIds};

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum SpawnPolicy {
    /// Top the enemy group up towards `target_enemies`, each free slot
    /// rolling against `probability × difficulty`.
    Waves {
        target_enemies: usize,
        probability: f64,
    },
    /// A single boss whenever the enemy group is empty.
    Boss,
}

/// Decides this frame's spawns given the current enemy group.  The caller
/// adds the returned fighters to the level.
pub fn spawn_enemies<R: Rng + ?Sized>(
    policy: &SpawnPolicy,
    enemies: &[Fighter],
    difficulty_factor: f64,
    arena: &Arena,
    ids: &mut EntityIds,
    rng: &mut R,
) -> Vec<Fighter> {
    match *policy {
        SpawnPolicy::Waves {
            target_enemies,
            probability,
        } => {
            let deficit = target_enemies.saturating_sub(enemies.len());
            let threshold = probability * difficulty_factor;
            let mut spawned = Vec::new();
            for _ in 0..deficit {
                if rng.gen::<f64>() < threshold {
                    let y = rng.gen::<f64>() * arena.enemy_max_y();
                    spawned.push(Fighter::Enemy(EnemyPlane::new(
                        ids.next_id(),
                        arena.width,
                        y,
                        difficulty_factor,
                    )));
                }
            }
            spawned
        }
        SpawnPolicy::Boss => {
            if enemies.is_empty() {
                vec![Fighter::Boss(Boss::new(ids.next_id(), rng))]
            } else {
                Vec::new()
            }
        }
    }
}
