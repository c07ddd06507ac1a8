use std::time::Duration;

use glam::Vec3;
use queen_of_shadows_core::{Command, Event, Gait};
use queen_of_shadows_system_navigation::Navigator;
use queen_of_shadows_world::{self as world, query, World};

const DT: Duration = Duration::from_nanos(16_666_667);

/// Runs the frame loop until the escort finishes or the tick budget runs out.
fn pump(world: &mut World, navigator: &mut Navigator, budget: u32) -> Vec<Event> {
    let mut all_events = Vec::new();
    for _ in 0..budget {
        let mut events = Vec::new();
        world::apply(world, Command::Tick { dt: DT }, &mut events);

        let mut followups = Vec::new();
        navigator.handle(&events, &mut followups);
        for command in followups {
            world::apply(world, command, &mut events);
        }

        let hero = query::hero_snapshot(world);
        let done = !navigator.is_escorting() && !hero.moving;
        all_events.extend(events);
        if done {
            break;
        }
    }
    all_events
}

#[test]
fn escort_walks_the_hero_to_the_destination() {
    let mut world = World::new();
    let mut navigator = Navigator::default();
    let destination = Vec3::new(0.0, 0.0, 2.0);

    let mut commands = Vec::new();
    let route = {
        let grid = query::grid_view(&world);
        let hero = query::hero_snapshot(&world);
        navigator.request_travel(&grid, &hero, destination, Gait::Walking, &mut commands)
    };
    assert_eq!(route.len(), 2);
    assert_eq!(commands.len(), 1, "only the first node is issued up front");

    let mut events = Vec::new();
    for command in commands {
        world::apply(&mut world, command, &mut events);
    }

    let _ = pump(&mut world, &mut navigator, 2_000);

    let hero = query::hero_snapshot(&world);
    assert!(!hero.moving);
    assert!(!navigator.is_escorting());
    assert!((hero.position.x - destination.x).abs() < 0.05);
    assert!((hero.position.z - destination.z).abs() < 0.05);
}

#[test]
fn escort_issues_one_move_order_per_arrival() {
    let mut world = World::new();
    let mut navigator = Navigator::default();
    let destination = Vec3::new(3.0, 0.0, 0.0);

    let mut commands = Vec::new();
    let route = {
        let grid = query::grid_view(&world);
        let hero = query::hero_snapshot(&world);
        navigator.request_travel(&grid, &hero, destination, Gait::Running, &mut commands)
    };

    let mut events = Vec::new();
    for command in commands {
        world::apply(&mut world, command, &mut events);
    }
    let events = pump(&mut world, &mut navigator, 4_000);

    let departures = events
        .iter()
        .filter(|event| matches!(event, Event::HeroDeparted { .. }))
        .count();
    // The first departure was applied before pumping.
    assert_eq!(departures, route.len() - 1);
}

#[test]
fn unreachable_destination_issues_no_commands() {
    let mut world = World::new();
    let mut navigator = Navigator::default();

    let mut commands = Vec::new();
    let route = {
        let grid = query::grid_view(&world);
        let hero = query::hero_snapshot(&world);
        // Cell (0, 0) is blocked by the scripted layout.
        navigator.request_travel(
            &grid,
            &hero,
            Vec3::new(-5.0, 0.0, -5.0),
            Gait::Running,
            &mut commands,
        )
    };

    assert!(route.is_empty());
    assert!(commands.is_empty());
    assert!(!navigator.is_escorting());
}

#[test]
fn failed_pick_keeps_the_current_escort_running() {
    let mut world = World::new();
    let mut navigator = Navigator::default();
    let destination = Vec3::new(0.0, 0.0, 2.0);

    let mut commands = Vec::new();
    {
        let grid = query::grid_view(&world);
        let hero = query::hero_snapshot(&world);
        let _ = navigator.request_travel(&grid, &hero, destination, Gait::Walking, &mut commands);
    }
    let mut events = Vec::new();
    for command in commands.drain(..) {
        world::apply(&mut world, command, &mut events);
    }
    assert!(navigator.is_escorting());

    // A pick on a blocked cell plans nothing and must not abandon the escort.
    let failed = {
        let grid = query::grid_view(&world);
        let hero = query::hero_snapshot(&world);
        navigator.request_travel(
            &grid,
            &hero,
            Vec3::new(-5.0, 0.0, -5.0),
            Gait::Running,
            &mut commands,
        )
    };
    assert!(failed.is_empty());
    assert!(commands.is_empty());
    assert!(navigator.is_escorting());

    let _ = pump(&mut world, &mut navigator, 2_000);

    let hero = query::hero_snapshot(&world);
    assert!(!hero.moving);
    assert!((hero.position.x - destination.x).abs() < 0.05);
    assert!((hero.position.z - destination.z).abs() < 0.05);
}

#[test]
fn new_travel_request_replaces_the_current_route() {
    let mut world = World::new();
    let mut navigator = Navigator::default();

    let mut commands = Vec::new();
    {
        let grid = query::grid_view(&world);
        let hero = query::hero_snapshot(&world);
        let _ = navigator.request_travel(
            &grid,
            &hero,
            Vec3::new(4.0, 0.0, 0.0),
            Gait::Running,
            &mut commands,
        );
    }
    let mut events = Vec::new();
    for command in commands.drain(..) {
        world::apply(&mut world, command, &mut events);
    }

    // Let the hero take a few steps along the first route.
    for _ in 0..30 {
        let mut tick_events = Vec::new();
        world::apply(&mut world, Command::Tick { dt: DT }, &mut tick_events);
        navigator.handle(&tick_events, &mut commands);
        for command in commands.drain(..) {
            world::apply(&mut world, command, &mut tick_events);
        }
    }

    let replacement = {
        let grid = query::grid_view(&world);
        let hero = query::hero_snapshot(&world);
        navigator.request_travel(
            &grid,
            &hero,
            Vec3::new(0.0, 0.0, -3.0),
            Gait::Walking,
            &mut commands,
        )
    };
    assert!(!replacement.is_empty());

    let mut events = Vec::new();
    for command in commands.drain(..) {
        world::apply(&mut world, command, &mut events);
    }
    let _ = pump(&mut world, &mut navigator, 4_000);

    let hero = query::hero_snapshot(&world);
    assert!((hero.position.x - 0.0).abs() < 0.1);
    assert!((hero.position.z - -3.0).abs() < 0.1);
}
