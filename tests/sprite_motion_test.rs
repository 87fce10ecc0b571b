mod common;

use std::time::Duration;

use cell_canvas::{BoxShape, CanvasConfig, Event, Extent, Point, Sprite, SpriteEvent, SpriteId};
use common::*;

/// 40x10 borderless canvas: centered at column 20, row 7.
const WIDE_LEFT: usize = 20;

fn wide_config() -> CanvasConfig {
    CanvasConfig {
        width: Some(Extent::Fixed(40)),
        ..small_config()
    }
}

fn ended(events: &[Event], sprite: SpriteId) -> bool {
    events.iter().any(|e| {
        matches!(e, Event::Sprite { id, event: SpriteEvent::MoveEnded(_) } if *id == sprite)
    })
}

#[test]
fn speed_thirty_covers_thirty_cells_in_one_second() {
    let (mut canvas, clock, _) = canvas(wide_config());
    let ball = Sprite::new_box(BoxShape::new(1.0, 1.0).unwrap()).with_speed(30.0).unwrap();
    let id = canvas.add_sprite(ball);
    canvas.draw_sprite(id, Point::new(0.0, 0.0)).unwrap();
    canvas.move_to(id, Point::new(30.0, 0.0), None).unwrap();

    clock.advance(Duration::from_millis(990));
    canvas.tick().unwrap();
    assert!(canvas.sprite(id).unwrap().is_moving());
    assert!(!ended(&canvas.drain_events(), id));

    clock.advance(Duration::from_millis(10));
    canvas.tick().unwrap();
    assert!(!canvas.sprite(id).unwrap().is_moving());
    assert_eq!(canvas.sprite(id).unwrap().position(), Some(Point::new(30.0, 0.0)));
    assert!(ended(&canvas.drain_events(), id));
}

#[test]
fn stopping_keeps_the_last_interpolated_point() {
    let (mut canvas, clock, _) = canvas(wide_config());
    let id = canvas.add_sprite(Sprite::new_box(BoxShape::new(1.0, 1.0).unwrap()));
    canvas
        .move_sprite(id, Point::new(0.0, 0.0), Point::new(30.0, 0.0), Some(Duration::from_secs(1)))
        .unwrap();

    clock.advance(Duration::from_millis(500));
    canvas.tick().unwrap();
    canvas.drain_events();
    clock.advance(Duration::from_millis(100));
    canvas.stop(id).unwrap();
    clock.advance(Duration::from_secs(1));
    canvas.tick().unwrap();

    assert_eq!(canvas.sprite(id).unwrap().position(), Some(Point::new(15.0, 0.0)));
    let stop_time = canvas.drain_events().into_iter().find_map(|e| match e {
        Event::Sprite {
            event: SpriteEvent::Stop { time },
            ..
        } => Some(time),
        _ => None,
    });
    assert_eq!(stop_time, Some(Duration::from_millis(600)));
}

#[test]
fn moving_sprite_leaves_no_trail() {
    let (mut canvas, clock, mut screen) = canvas(wide_config());
    let id = canvas.add_sprite(Sprite::new_box(BoxShape::new(1.0, 1.0).unwrap()));
    canvas.draw_sprite(id, Point::new(0.0, 2.0)).unwrap();
    canvas
        .move_to(id, Point::new(10.0, 2.0), Some(Duration::from_secs(1)))
        .unwrap();
    for _ in 0..10 {
        clock.advance(Duration::from_millis(110));
        canvas.tick().unwrap();
    }
    screen.sync(&mut canvas);
    assert_eq!(screen.count(FULL), 1);
    assert_eq!(screen.cell(WIDE_LEFT + 10, TOP + 2).ch, FULL);
}

#[test]
fn half_cell_steps_on_the_precise_axis() {
    let (mut canvas, clock, _) = canvas(wide_config());
    let id = canvas.add_sprite(Sprite::new_box(BoxShape::new(1.0, 1.0).unwrap()));
    canvas
        .move_sprite(id, Point::new(0.0, 0.0), Point::new(0.0, 4.0), Some(Duration::from_secs(1)))
        .unwrap();
    clock.advance(Duration::from_millis(130));
    canvas.tick().unwrap();
    assert_eq!(canvas.sprite(id).unwrap().position(), Some(Point::new(0.0, 0.5)));
}

#[test]
fn animation_resumes_without_jump_after_freeze() {
    let (mut canvas, clock, _) = canvas(wide_config());
    let id = canvas.add_sprite(Sprite::new_box(BoxShape::new(1.0, 1.0).unwrap()));
    canvas.draw_sprite(id, Point::new(0.0, 0.0)).unwrap();
    canvas
        .move_to(id, Point::new(30.0, 0.0), Some(Duration::from_secs(1)))
        .unwrap();

    clock.advance(Duration::from_millis(500));
    canvas.tick().unwrap();
    canvas.resize(30, 24).unwrap();
    assert!(canvas.too_big());
    assert!(!canvas.is_showing(id));

    clock.advance(Duration::from_secs(10));
    canvas.tick().unwrap();
    canvas.resize(80, 24).unwrap();
    canvas.tick().unwrap();
    assert!(canvas.is_showing(id));
    assert_eq!(canvas.sprite(id).unwrap().position(), Some(Point::new(15.0, 0.0)));
    assert_eq!(canvas.time(), Duration::from_millis(500));

    clock.advance(Duration::from_millis(500));
    canvas.tick().unwrap();
    assert!(ended(&canvas.drain_events(), id));
}

#[test]
fn frame_events_fire_every_tick() {
    let (mut canvas, clock, _) = canvas(wide_config());
    let id = canvas.add_sprite(Sprite::new(|_, _| Ok(())));
    canvas
        .move_sprite(id, Point::new(0.0, 0.0), Point::new(1.0, 0.0), Some(Duration::from_secs(10)))
        .unwrap();
    canvas.drain_events();
    for _ in 0..3 {
        clock.advance(Duration::from_millis(16));
        canvas.tick().unwrap();
    }
    let frames = canvas
        .drain_events()
        .into_iter()
        .filter(|e| matches!(e, Event::Sprite { event: SpriteEvent::Frame, .. }))
        .count();
    assert_eq!(frames, 3);
}
