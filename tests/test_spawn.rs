use rand::rngs::mock::StepRng;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use sky_battle::actors::{EnemyPlane, Entity, Fighter};
use sky_battle::entities::{Arena, EntityIds, EntityKind};
use sky_battle::spawn::{spawn_enemies, SpawnPolicy};

const WAVES: SpawnPolicy = SpawnPolicy::Waves {
    target_enemies: 5,
    probability: 0.2,
};

fn seeded_rng() -> StdRng {
    StdRng::seed_from_u64(7)
}

fn enemies(count: usize, ids: &mut EntityIds) -> Vec<Fighter> {
    (0..count)
        .map(|_| Fighter::Enemy(EnemyPlane::new(ids.next_id(), 1300.0, 0.0, 1.0)))
        .collect()
}

#[test]
fn certain_rolls_fill_the_deficit_at_the_right_edge() {
    let arena = Arena::default();
    let mut ids = EntityIds::default();
    let spawned = spawn_enemies(&WAVES, &[], 1.0, &arena, &mut ids, &mut StepRng::new(0, 0));

    assert_eq!(spawned.len(), 5);
    for enemy in &spawned {
        assert_eq!(enemy.kind(), EntityKind::Enemy);
        assert_eq!(enemy.body().position().x, arena.width);
        assert_eq!(enemy.health(), 1);
    }
}

#[test]
fn only_free_slots_roll() {
    let mut ids = EntityIds::default();
    let present = enemies(3, &mut ids);
    let spawned = spawn_enemies(
        &WAVES,
        &present,
        1.0,
        &Arena::default(),
        &mut ids,
        &mut StepRng::new(0, 0),
    );
    assert_eq!(spawned.len(), 2);
}

#[test]
fn failed_rolls_spawn_nothing() {
    let mut ids = EntityIds::default();
    let spawned = spawn_enemies(
        &WAVES,
        &[],
        1.0,
        &Arena::default(),
        &mut ids,
        &mut StepRng::new(u64::MAX, 0),
    );
    assert!(spawned.is_empty());
}

#[test]
fn enemy_group_never_exceeds_its_target() {
    let arena = Arena::default();
    let mut ids = EntityIds::default();
    let mut rng = seeded_rng();
    let mut group: Vec<Fighter> = Vec::new();

    for _ in 0..2000 {
        let spawned = spawn_enemies(&WAVES, &group, 1.5, &arena, &mut ids, &mut rng);
        group.extend(spawned);
        assert!(group.len() <= 5);
        for enemy in &group {
            let y = enemy.body().position().y;
            assert!((0.0..=arena.enemy_max_y()).contains(&y));
        }
        if rng.gen_bool(0.3) && !group.is_empty() {
            group.remove(0);
        }
    }
}

#[test]
fn spawned_enemies_carry_the_current_difficulty() {
    let mut ids = EntityIds::default();
    let spawned = spawn_enemies(
        &WAVES,
        &[],
        2.0,
        &Arena::default(),
        &mut ids,
        &mut StepRng::new(0, 0),
    );
    assert!(spawned.iter().all(|enemy| enemy.health() == 2));
}

#[test]
fn boss_spawns_only_into_an_empty_group() {
    let arena = Arena::default();
    let mut ids = EntityIds::default();
    let mut rng = seeded_rng();

    let spawned = spawn_enemies(&SpawnPolicy::Boss, &[], 1.0, &arena, &mut ids, &mut rng);
    assert_eq!(spawned.len(), 1);
    assert_eq!(spawned[0].kind(), EntityKind::Boss);

    let again = spawn_enemies(&SpawnPolicy::Boss, &spawned, 1.0, &arena, &mut ids, &mut rng);
    assert!(again.is_empty());
}
