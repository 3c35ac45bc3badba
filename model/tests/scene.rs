mod common;

use aquarium_model::*;
use common::*;
use glam::Vec2;

fn scene_with(
    player: PlayerCreature,
    tank: Aquarium,
) -> GameScene<impl FnMut() -> bool> {
    GameScene::new(player, tank, always(), SceneRules::default())
}

#[test]
fn weak_player_loses_a_life_and_creature_stays() {
    let mut tank = empty_tank(800, 600);
    let fish = Creature::bigger_fish(Vec2::new(200.0, 200.0), 4, None, &mut rng(1));
    let id = tank.add_creature(fish);

    let player = PlayerCreature::new(Vec2::new(200.0, 200.0), 5, 3, 1, None);
    let mut scene = scene_with(player, tank);

    let event = scene.update(&Keys::none(), &FixedClock(0.0)).cloned();

    assert_eq!(event, Some(GameEvent::Collision { creature: id }));
    assert_eq!(scene.player().lives(), 2);
    assert_eq!(scene.player().damage_debounce(), 180);
    assert!(scene.aquarium().creature(id).is_some());
    assert_eq!(scene.player().score(), 0);
}

#[test]
fn debounce_protects_against_repeated_hits() {
    let mut tank = empty_tank(800, 600);
    // Speed 0 keeps the fish sitting on the player.
    tank.add_creature(Creature::bigger_fish(Vec2::new(200.0, 200.0), 0, None, &mut rng(1)));

    let player = PlayerCreature::new(Vec2::new(200.0, 200.0), 5, 3, 1, None);
    let mut scene = scene_with(player, tank);

    for _ in 0..10 {
        scene.update(&Keys::none(), &FixedClock(0.0));
    }

    assert_eq!(scene.player().lives(), 2);
    assert_eq!(scene.player().damage_debounce(), 171);
}

#[test]
fn strong_enough_player_eats() {
    let mut tank = empty_tank(800, 600);
    let id = tank.add_creature(Creature::bigger_fish(
        Vec2::new(300.0, 300.0),
        4,
        None,
        &mut rng(2),
    ));

    let player = PlayerCreature::new(Vec2::new(300.0, 300.0), 5, 3, 5, None);
    let mut scene = scene_with(player, tank);

    scene.update(&Keys::none(), &FixedClock(0.0));

    assert!(scene.aquarium().creature(id).is_none());
    assert_eq!(scene.aquarium().creature_count(), 0);
    assert_eq!(scene.player().score(), 5);
    assert_eq!(scene.player().power(), 5);
    assert_eq!(scene.player().lives(), 3);
}

#[test]
fn score_milestone_increases_power() {
    let mut tank = empty_tank(800, 600);
    tank.add_creature(Creature::bigger_fish(
        Vec2::new(300.0, 300.0),
        4,
        None,
        &mut rng(2),
    ));

    let mut player = PlayerCreature::new(Vec2::new(300.0, 300.0), 5, 3, 5, None);
    player.add_to_score(20);
    let mut scene = scene_with(player, tank);

    scene.update(&Keys::none(), &FixedClock(0.0));

    assert_eq!(scene.player().score(), 25);
    assert_eq!(scene.player().power(), 6);
}

#[test]
fn last_life_ends_the_game_without_moving_the_tank() {
    let mut tank = empty_tank(800, 600);
    let crab = Creature::crab(100.0, 100.0, 10, None, &mut rng(3));
    let id = tank.add_creature(crab);

    let player = PlayerCreature::new(Vec2::new(100.0, 100.0), 5, 1, 1, None);
    let mut scene = scene_with(player, tank);

    let event = scene.update(&Keys::none(), &FixedClock(0.0)).cloned();

    assert_eq!(event, Some(GameEvent::GameOver { final_score: 0 }));
    assert!(scene.is_game_over());
    assert_eq!(scene.player().lives(), 0);
    assert_eq!(
        scene.aquarium().creature(id).unwrap().position(),
        Vec2::new(100.0, 100.0)
    );

    // Terminal: later frames change nothing.
    let event = scene
        .update(&Keys::pressed(&[Direction::East]), &FixedClock(1.0))
        .cloned();
    assert_eq!(event, Some(GameEvent::GameOver { final_score: 0 }));
    assert_eq!(scene.player().position(), Vec2::new(100.0, 100.0));
    assert_eq!(
        scene.aquarium().creature(id).unwrap().position(),
        Vec2::new(100.0, 100.0)
    );
}

#[test]
fn closed_gate_skips_collisions_and_aquarium() {
    let mut tank = empty_tank(800, 600);
    let id = tank.add_creature(Creature::crab(100.0, 100.0, 10, None, &mut rng(3)));

    let player = PlayerCreature::new(Vec2::new(100.0, 100.0), 5, 3, 1, None);
    let mut scene = GameScene::new(player, tank, || false, SceneRules::default());

    assert_eq!(scene.update(&Keys::none(), &FixedClock(0.0)), None);
    assert_eq!(scene.player().lives(), 3);
    assert_eq!(
        scene.aquarium().creature(id).unwrap().position(),
        Vec2::new(100.0, 100.0)
    );
}

#[test]
fn arrow_keys_steer_the_player() {
    let player = PlayerCreature::new(Vec2::new(400.0, 300.0), 5, 3, 1, None);
    let mut scene = scene_with(player, empty_tank(800, 600));

    scene.update(&Keys::pressed(&[Direction::East]), &FixedClock(0.0));
    assert_eq!(scene.player().position(), Vec2::new(405.0, 300.0));

    scene.update(&Keys::pressed(&[Direction::West, Direction::East]), &FixedClock(0.0));
    assert_eq!(scene.player().position(), Vec2::new(405.0, 300.0));

    scene.update(&Keys::pressed(&[Direction::North, Direction::West]), &FixedClock(0.0));
    let moved = scene.player().position() - Vec2::new(405.0, 300.0);
    assert!((moved.length() - 5.0).abs() < 1e-4);
    assert!(moved.x < 0.0 && moved.y < 0.0);
}

#[test]
fn player_is_kept_inside_the_tank() {
    let player = PlayerCreature::new(Vec2::new(790.0, 10.0), 25, 3, 1, None);
    let mut scene = scene_with(player, empty_tank(800, 600));

    for _ in 0..20 {
        scene.update(
            &Keys::pressed(&[Direction::North, Direction::East]),
            &FixedClock(0.0),
        );
        let pos = scene.player().position();
        assert!(pos.x >= 0.0 && pos.x <= 800.0);
        assert!(pos.y >= 0.0 && pos.y <= 600.0);
    }
}

#[test]
fn level_up_is_reported() {
    let mut tank = Aquarium::new(800, 600, SpriteManager::with_defaults(), rng(9));
    let mut first = AquariumLevel::new(0, 1);
    first.add_population(CreatureType::NPCreature, 1);
    tank.add_level(first);
    tank.add_level(AquariumLevel::new(1, 100));
    tank.repopulate();

    let fish = tank.creature_at(0).unwrap();
    let fish_pos = fish.position();
    let fish_value = fish.value();

    let player = PlayerCreature::new(fish_pos, 0, 3, fish_value, None);
    let mut scene = scene_with(player, tank);

    let event = scene.update(&Keys::none(), &FixedClock(0.0)).cloned();

    assert_eq!(event, Some(GameEvent::LevelUp { level: 1 }));
    assert_eq!(scene.aquarium().current_level_index(), 1);
    assert_eq!(scene.aquarium().creature_count(), 0);
    assert_eq!(scene.player().score(), 1);
}

#[test]
fn scene_from_default_config_fills_the_tank() {
    let mut scene = GameScene::from_config(
        &GameConfig::default(),
        SpriteManager::with_defaults(),
        Some(42),
    );
    assert_eq!(scene.player().position(), Vec2::new(512.0, 384.0));
    assert_eq!(scene.player().lives(), 3);

    // The default gate opens every second frame.
    scene.update(&Keys::none(), &FixedClock(0.0));
    assert_eq!(scene.aquarium().creature_count(), 0);
    scene.update(&Keys::none(), &FixedClock(0.0));
    assert!(scene.aquarium().creature_count() > 0);
}

#[test]
fn drawing_flashes_a_damaged_player() {
    let mut tank = empty_tank(800, 600);
    tank.add_creature(Creature::bigger_fish(Vec2::new(50.0, 50.0), 0, None, &mut rng(1)));

    let sprite = SpriteManager::with_defaults().sprite(SpriteKind::Player);
    let player = PlayerCreature::new(Vec2::new(50.0, 50.0), 5, 3, 1, sprite);
    let mut scene = scene_with(player, tank);
    scene.update(&Keys::none(), &FixedClock(0.0));

    let mut sink = RecordingSink::default();
    scene.draw(&mut sink);

    assert_eq!(
        sink.0,
        vec![
            DrawCall::Flash(true),
            DrawCall::Plain(SpriteKind::Player, Vec2::new(50.0, 50.0), false),
            DrawCall::Flash(false),
        ]
    );
}

#[test]
fn player_sprite_faces_the_way_it_swims() {
    let sprite = SpriteManager::with_defaults().sprite(SpriteKind::Player);
    let player = PlayerCreature::new(Vec2::new(400.0, 300.0), 5, 3, 1, sprite);
    let mut scene = scene_with(player, empty_tank(800, 600));

    scene.update(&Keys::pressed(&[Direction::West]), &FixedClock(0.0));
    let mut sink = RecordingSink::default();
    scene.draw(&mut sink);
    assert_eq!(
        sink.0,
        vec![DrawCall::Plain(SpriteKind::Player, Vec2::new(395.0, 300.0), true)]
    );

    scene.update(&Keys::pressed(&[Direction::East]), &FixedClock(0.0));
    let mut sink = RecordingSink::default();
    scene.draw(&mut sink);
    assert_eq!(
        sink.0,
        vec![DrawCall::Plain(SpriteKind::Player, Vec2::new(400.0, 300.0), false)]
    );
}
