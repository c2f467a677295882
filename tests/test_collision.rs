use sky_battle::actors::{EnemyPlane, Entity, Projectile};
use sky_battle::collision::resolve_collisions;
use sky_battle::entities::EntityId;

fn enemy(id: u64, x: f64, y: f64, difficulty: f64) -> EnemyPlane {
    EnemyPlane::new(EntityId(id), x, y, difficulty)
}

#[test]
fn overlapping_pair_damages_both() {
    let mut shots = vec![Projectile::player(EntityId(1), 100.0, 100.0)];
    let mut enemies = vec![enemy(2, 120.0, 100.0, 1.0)];

    assert_eq!(resolve_collisions(&mut shots, &mut enemies), 1);
    assert!(shots[0].is_destroyed());
    assert!(enemies[0].is_destroyed());
    assert_eq!(enemies[0].plane.health, 0);
}

#[test]
fn separated_entities_are_untouched() {
    let mut shots = vec![Projectile::player(EntityId(1), 0.0, 0.0)];
    let mut enemies = vec![enemy(2, 500.0, 500.0, 1.0)];

    assert_eq!(resolve_collisions(&mut shots, &mut enemies), 0);
    assert!(!shots[0].is_destroyed());
    assert!(!enemies[0].is_destroyed());
}

#[test]
fn touching_edges_collide() {
    // Player shot is 60 wide, so its right edge sits at x = 60.
    let mut shots = vec![Projectile::player(EntityId(1), 0.0, 0.0)];
    let mut enemies = vec![enemy(2, 60.0, 0.0, 1.0)];

    assert_eq!(resolve_collisions(&mut shots, &mut enemies), 1);
}

#[test]
fn one_shot_hits_every_enemy_it_overlaps() {
    let mut shots = vec![Projectile::player(EntityId(1), 100.0, 100.0)];
    let mut enemies = vec![enemy(2, 90.0, 100.0, 1.0), enemy(3, 110.0, 120.0, 1.0)];

    assert_eq!(resolve_collisions(&mut shots, &mut enemies), 2);
    assert!(enemies.iter().all(Entity::is_destroyed));
}

#[test]
fn tough_enemy_needs_two_hits() {
    let mut shots = vec![
        Projectile::player(EntityId(1), 100.0, 100.0),
        Projectile::player(EntityId(2), 110.0, 100.0),
    ];
    let mut enemies = vec![enemy(3, 100.0, 100.0, 2.0)];
    assert_eq!(enemies[0].plane.health, 2);

    assert_eq!(resolve_collisions(&mut shots[..1], &mut enemies), 1);
    assert!(!enemies[0].is_destroyed());
    assert_eq!(enemies[0].plane.health, 1);

    assert_eq!(resolve_collisions(&mut shots[1..], &mut enemies), 1);
    assert!(enemies[0].is_destroyed());
}

#[test]
fn empty_groups_never_collide() {
    let mut shots: Vec<Projectile> = Vec::new();
    let mut enemies = vec![enemy(1, 0.0, 0.0, 1.0)];
    assert_eq!(resolve_collisions(&mut shots, &mut enemies), 0);
}
