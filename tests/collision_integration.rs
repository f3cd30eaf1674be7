//! Collision & swap monitor integration tests.
//!
//! The first tests drive the detector on a bare world to check which events
//! it emits; the rest go through [`Stage`] to check the queue swaps.

use bevy_ecs::observer::On;
use bevy_ecs::prelude::*;

use motionstage::components::actiontab::{ActionId, ActionTab, TrackedPosition};
use motionstage::components::boxcollider::BoxCollider;
use motionstage::components::mapposition::MapPosition;
use motionstage::components::sprite::{SpriteId, SpriteKind};
use motionstage::events::collision::CollisionEvent;
use motionstage::motion::Transform;
use motionstage::resources::collisionmonitor::CollisionMonitor;
use motionstage::resources::motionqueues::MotionQueues;
use motionstage::resources::stageconfig::StageConfig;
use motionstage::stage::Stage;
use motionstage::systems::collision::collision_detector;

#[derive(Resource, Default)]
struct Reported(Vec<CollisionEvent>);

fn detector_world() -> (World, Schedule) {
    let mut world = World::new();
    world.insert_resource(MotionQueues::default());
    world.insert_resource(CollisionMonitor::default());
    world.init_resource::<Reported>();
    world.spawn(Observer::new(
        |trigger: On<CollisionEvent>, mut reported: ResMut<Reported>| {
            reported.0.push(trigger.event().clone());
        },
    ));
    world.flush();

    let mut schedule = Schedule::default();
    schedule.add_systems(collision_detector);
    (world, schedule)
}

fn spawn_tab(world: &mut World, id: &str, order: u32, at: Option<MapPosition>) -> Entity {
    world
        .spawn((
            ActionTab {
                id: ActionId::new(id),
                sprite: SpriteId(1),
                label: format!("Action {}", order + 1),
                order,
            },
            TrackedPosition(at),
            BoxCollider::default(),
        ))
        .id()
}

fn pairs(world: &World) -> Vec<(String, String, bool)> {
    world
        .resource::<Reported>()
        .0
        .iter()
        .map(|e| (e.a.to_string(), e.b.to_string(), e.mirrored))
        .collect()
}

#[test]
fn detector_reports_each_pair_in_both_directions() {
    let (mut world, mut schedule) = detector_world();
    spawn_tab(&mut world, "c", 2, Some(MapPosition::new(20, 20)));
    spawn_tab(&mut world, "a", 0, Some(MapPosition::new(0, 0)));
    spawn_tab(&mut world, "b", 1, Some(MapPosition::new(10, 10)));
    spawn_tab(&mut world, "far", 3, Some(MapPosition::new(500, 500)));
    spawn_tab(&mut world, "none", 4, None);

    schedule.run(&mut world);

    let expected = [
        ("a", "b", false),
        ("a", "c", false),
        ("b", "a", true),
        ("b", "c", false),
        ("c", "a", true),
        ("c", "b", true),
    ]
    .map(|(a, b, m)| (a.to_string(), b.to_string(), m));
    assert_eq!(pairs(&world), expected);
}

#[test]
fn detector_sleeps_until_something_changes() {
    let (mut world, mut schedule) = detector_world();
    let a = spawn_tab(&mut world, "a", 0, Some(MapPosition::new(0, 0)));
    spawn_tab(&mut world, "b", 1, Some(MapPosition::new(10, 10)));

    schedule.run(&mut world);
    assert_eq!(pairs(&world).len(), 2);
    assert_eq!(world.resource::<CollisionMonitor>().evaluations, 1);

    schedule.run(&mut world);
    schedule.run(&mut world);
    assert_eq!(pairs(&world).len(), 2);
    assert_eq!(world.resource::<CollisionMonitor>().evaluations, 1);

    // a queue edit wakes it up
    world
        .resource_mut::<MotionQueues>()
        .append(&ActionId::new("a"), "Turn Left".to_string());
    schedule.run(&mut world);
    assert_eq!(pairs(&world).len(), 4);

    // and so does a moved tab
    world.get_mut::<TrackedPosition>(a).unwrap().0 = Some(MapPosition::new(200, 0));
    schedule.run(&mut world);
    assert_eq!(pairs(&world).len(), 4);
    assert_eq!(world.resource::<CollisionMonitor>().evaluations, 3);
}

#[test]
fn boxes_touching_at_the_edge_do_not_collide() {
    let (mut world, mut schedule) = detector_world();
    spawn_tab(&mut world, "a", 0, Some(MapPosition::new(0, 0)));
    spawn_tab(&mut world, "b", 1, Some(MapPosition::new(50, 0)));
    schedule.run(&mut world);
    assert!(pairs(&world).is_empty());
}

// --------------- Through the stage ---------------

fn two_tab_stage(follow_sprites: bool) -> (Stage, ActionId, ActionId) {
    let mut stage = Stage::new(&StageConfig {
        starter_sprite: false,
        follow_sprites,
        ..StageConfig::new()
    });
    stage.add_sprite(SpriteKind::Cat);
    let a = stage.add_action_tab().unwrap();
    stage.add_sprite(SpriteKind::Earth);
    let b = stage.add_action_tab().unwrap();
    (stage, a, b)
}

#[test]
fn overlapping_tabs_swap_queues() {
    let (mut stage, a, b) = two_tab_stage(false);
    stage.append(a.clone(), "Move Right 10");
    stage.append(b.clone(), "Turn Right");
    stage.set_tracked_position(&a, Some(MapPosition::new(0, 0)));
    stage.set_tracked_position(&b, Some(MapPosition::new(10, 10)));

    stage.tick(0.0);
    assert_eq!(stage.queue(&a), ["Turn Right"]);
    assert_eq!(stage.queue(&b), ["Move Right 10"]);

    // nothing changed, nothing swaps back
    for _ in 0..5 {
        stage.tick(0.1);
    }
    assert_eq!(stage.queue(&a), ["Turn Right"]);
    assert_eq!(stage.queue(&b), ["Move Right 10"]);
}

#[test]
fn distant_tabs_keep_their_queues() {
    let (mut stage, a, b) = two_tab_stage(false);
    stage.append(a.clone(), "Move Right 10");
    stage.append(b.clone(), "Turn Right");
    stage.set_tracked_position(&a, Some(MapPosition::new(0, 0)));
    stage.set_tracked_position(&b, Some(MapPosition::new(100, 100)));

    stage.tick(0.0);
    assert_eq!(stage.queue(&a), ["Move Right 10"]);
    assert_eq!(stage.queue(&b), ["Turn Right"]);
}

#[test]
fn tabs_without_position_never_collide() {
    let (mut stage, a, b) = two_tab_stage(false);
    stage.append(a.clone(), "Move Right 10");
    stage.append(b.clone(), "Turn Right");
    stage.set_tracked_position(&a, Some(MapPosition::new(0, 0)));

    stage.tick(0.0);
    stage.play();
    stage.run_until_idle(0.25, 100);
    assert_eq!(stage.queue(&a), ["Move Right 10"]);
    assert_eq!(stage.queue(&b), ["Turn Right"]);
}

#[test]
fn editing_a_queue_while_overlapping_swaps_again() {
    let (mut stage, a, b) = two_tab_stage(false);
    stage.append(a.clone(), "Move Right 10");
    stage.append(b.clone(), "Turn Right");
    stage.set_tracked_position(&a, Some(MapPosition::new(0, 0)));
    stage.set_tracked_position(&b, Some(MapPosition::new(10, 10)));
    stage.tick(0.0);

    stage.append(a.clone(), "Move Forward");
    assert_eq!(stage.queue(&a), ["Turn Right", "Move Forward"]);
    stage.tick(0.0);
    assert_eq!(stage.queue(&a), ["Move Right 10"]);
    assert_eq!(stage.queue(&b), ["Turn Right", "Move Forward"]);
}

#[test]
fn moving_apart_then_back_swaps_on_return() {
    let (mut stage, a, b) = two_tab_stage(false);
    stage.append(a.clone(), "Turn Left");
    stage.set_tracked_position(&a, Some(MapPosition::new(0, 0)));
    stage.set_tracked_position(&b, Some(MapPosition::new(10, 10)));
    stage.tick(0.0);
    assert!(stage.queue(&a).is_empty());
    assert_eq!(stage.queue(&b), ["Turn Left"]);

    stage.set_tracked_position(&b, Some(MapPosition::new(300, 0)));
    stage.tick(0.0);
    assert_eq!(stage.queue(&b), ["Turn Left"]);

    stage.set_tracked_position(&b, Some(MapPosition::new(-20, 30)));
    stage.tick(0.0);
    assert_eq!(stage.queue(&a), ["Turn Left"]);
    assert!(stage.queue(&b).is_empty());
}

#[test]
fn following_sprites_swaps_when_playback_brings_them_together() {
    let (mut stage, a, b) = two_tab_stage(true);
    let earth = SpriteId(2);
    stage.update_sprite(earth, |_| Transform::new(300, 300, 0));
    stage.tick(0.0);
    assert_eq!(stage.tracked_position(&b), Some(MapPosition::new(300, 300)));

    stage.append(a.clone(), "Turn Left");
    stage.append(b.clone(), "Go to X: 110, Y: 110");
    stage.tick(0.0);
    assert_eq!(stage.queue(&a), ["Turn Left"]);

    let playback = stage.play();
    assert_eq!(stage.sprite(earth).unwrap().position, MapPosition::new(110, 110));
    assert_eq!(stage.tracked_position(&b), Some(MapPosition::new(110, 110)));
    assert_eq!(stage.queue(&a), ["Go to X: 110, Y: 110"]);
    assert_eq!(stage.queue(&b), ["Turn Left"]);

    // the running playback still uses the queues it started with
    stage.run_until_idle(0.25, 100);
    assert!(stage.is_finished(playback));
    assert_eq!(stage.sprite(SpriteId(1)).unwrap().rotation, -90);
    assert_eq!(stage.sprite(SpriteId(1)).unwrap().position, MapPosition::new(100, 100));
    assert_eq!(stage.queue(&a), ["Go to X: 110, Y: 110"]);
}

#[test]
fn following_sprites_keeps_one_sprites_tabs_apart() {
    let mut stage = Stage::new(&StageConfig {
        starter_sprite: false,
        follow_sprites: true,
        ..StageConfig::new()
    });
    let cat = stage.add_sprite(SpriteKind::Cat).id;
    let a = stage.add_action_tab_for(cat).unwrap();
    let b = stage.add_action_tab_for(cat).unwrap();
    stage.append(a.clone(), "Move Right 10");
    stage.append(b.clone(), "Turn Right");
    stage.tick(0.0);
    assert_eq!(stage.tracked_position(&a), stage.tracked_position(&b));

    stage.play();
    stage.run_until_idle(0.25, 100);
    assert_eq!(stage.queue(&a), ["Move Right 10"]);
    assert_eq!(stage.queue(&b), ["Turn Right"]);
    let sprite = stage.sprite(cat).unwrap();
    assert_eq!(sprite.position.x, 110);
    assert_eq!(sprite.rotation, 90);
}
