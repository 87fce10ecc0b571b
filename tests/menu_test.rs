mod common;

use std::cell::RefCell;
use std::rc::Rc;

use cell_canvas::{BorderStyle, CanvasConfig, Dispatch, Event, Extent, Menu, Point, Sprite, SpriteId};
use crossterm::event::{Event as TermEvent, KeyCode, KeyEvent, KeyModifiers};
use common::*;

/// Default config on 80x24: a 78x22 canvas inside a light border.
const MENU_LEFT: usize = 1;
const MENU_TOP: usize = 1;

fn press(c: char) -> TermEvent {
    TermEvent::Key(KeyEvent::from(KeyCode::Char(c)))
}

fn menu_on(
    canvas: &mut cell_canvas::Canvas<Vec<u8>>,
    options: &[&str],
) -> (SpriteId, Rc<RefCell<Vec<usize>>>) {
    let picks = Rc::new(RefCell::new(Vec::new()));
    let log = picks.clone();
    let menu = Menu::new(
        options.iter().map(|s| s.to_string()).collect(),
        None,
        move |index| log.borrow_mut().push(index),
    )
    .unwrap();
    (canvas.add_sprite(Sprite::new_menu(menu)), picks)
}

#[test]
fn menu_renders_bordered_segments() {
    let (mut canvas, _, mut screen) = canvas(CanvasConfig::default());
    let (id, _) = menu_on(&mut canvas, &["Red", "Blue"]);
    canvas.draw_sprite(id, Point::new(0.0, 0.0)).unwrap();
    screen.sync(&mut canvas);

    let row = |r: usize| -> String { screen.row_text(MENU_TOP + r).chars().skip(MENU_LEFT).take(18).collect() };
    assert_eq!(row(0), "\u{250c}\u{2500}\u{2500}\u{2500}\u{2500}\u{2500}\u{2500}\u{2500}\u{252c}\u{2500}\u{2500}\u{2500}\u{2500}\u{2500}\u{2500}\u{2500}\u{2500}\u{2510}");
    assert_eq!(row(1), "\u{2502} 1:Red \u{2502} 2:Blue \u{2502}");
    assert_eq!(canvas.menu_width(id).unwrap(), 18);
}

#[test]
fn choosing_fires_once_and_erases_the_menu() {
    let (mut canvas, _, mut screen) = canvas(CanvasConfig::default());
    let (id, picks) = menu_on(&mut canvas, &["Red", "Blue"]);
    canvas.draw_sprite(id, Point::new(0.0, 0.0)).unwrap();
    canvas.drain_events();

    assert_eq!(canvas.handle_event(&press('2')).unwrap(), Dispatch::Continue);
    canvas.handle_event(&press('2')).unwrap();
    canvas.handle_event(&press('1')).unwrap();
    assert_eq!(*picks.borrow(), vec![1]);

    screen.sync(&mut canvas);
    assert_eq!(screen.marked_in(MENU_LEFT, MENU_TOP, 18, 3), 0);

    let events = canvas.drain_events();
    let choices: Vec<_> = events
        .iter()
        .filter(|e| matches!(e, Event::MenuChoice { .. }))
        .collect();
    assert_eq!(choices, vec![&Event::MenuChoice { menu: id, index: 1 }]);
    let keys = events.iter().filter(|e| matches!(e, Event::Key { .. })).count();
    assert_eq!(keys, 3);
}

#[test]
fn redrawing_reopens_the_menu() {
    let (mut canvas, _, _) = canvas(CanvasConfig::default());
    let (id, picks) = menu_on(&mut canvas, &["Red", "Blue"]);
    canvas.draw_sprite(id, Point::new(0.0, 0.0)).unwrap();
    canvas.handle_event(&press('1')).unwrap();
    canvas.draw_sprite(id, Point::new(0.0, 5.0)).unwrap();
    canvas.handle_event(&press('2')).unwrap();
    assert_eq!(*picks.borrow(), vec![0, 1]);
}

#[test]
fn clearing_unbinds_keys() {
    let (mut canvas, _, _) = canvas(CanvasConfig::default());
    let (id, picks) = menu_on(&mut canvas, &["Red"]);
    canvas.draw_sprite(id, Point::new(0.0, 0.0)).unwrap();
    canvas.clear_sprite(id).unwrap();
    canvas.handle_event(&press('1')).unwrap();
    assert!(picks.borrow().is_empty());
}

#[test]
fn closing_one_menu_keeps_the_other_bound() {
    let (mut canvas, _, _) = canvas(CanvasConfig::default());
    let (first, first_picks) = menu_on(&mut canvas, &["Red"]);
    let (second, second_picks) = menu_on(&mut canvas, &["Blue"]);
    canvas.draw_sprite(first, Point::new(0.0, 0.0)).unwrap();
    canvas.draw_sprite(second, Point::new(0.0, 5.0)).unwrap();
    canvas.clear_sprite(second).unwrap();

    canvas.handle_event(&press('1')).unwrap();
    assert_eq!(*first_picks.borrow(), vec![0]);
    assert!(second_picks.borrow().is_empty());
    assert!(!canvas.sprite(first).unwrap().as_menu().unwrap().is_open());
}

#[test]
fn shared_key_chooses_every_open_menu() {
    let (mut canvas, _, _) = canvas(CanvasConfig::default());
    let (first, first_picks) = menu_on(&mut canvas, &["Red"]);
    let (second, second_picks) = menu_on(&mut canvas, &["Blue"]);
    canvas.draw_sprite(first, Point::new(0.0, 0.0)).unwrap();
    canvas.draw_sprite(second, Point::new(0.0, 5.0)).unwrap();
    canvas.drain_events();

    canvas.handle_event(&press('1')).unwrap();
    assert_eq!(*first_picks.borrow(), vec![0]);
    assert_eq!(*second_picks.borrow(), vec![0]);
    let choices: Vec<_> = canvas
        .drain_events()
        .into_iter()
        .filter(|e| matches!(e, Event::MenuChoice { .. }))
        .collect();
    assert_eq!(
        choices,
        vec![
            Event::MenuChoice { menu: first, index: 0 },
            Event::MenuChoice { menu: second, index: 0 },
        ]
    );
}

#[test]
fn letter_keys_follow_the_digits() {
    let (mut canvas, _, _) = canvas(CanvasConfig::default());
    let options: Vec<String> = (0..10).map(|i| format!("o{i}")).collect();
    let options: Vec<&str> = options.iter().map(String::as_str).collect();
    let (id, picks) = menu_on(&mut canvas, &options);
    canvas.draw_sprite(id, Point::new(0.0, 0.0)).unwrap();

    let shifted = TermEvent::Key(KeyEvent::new(KeyCode::Char('A'), KeyModifiers::SHIFT));
    canvas.handle_event(&shifted).unwrap();
    assert!(picks.borrow().is_empty());
    canvas.handle_event(&press('a')).unwrap();
    assert_eq!(*picks.borrow(), vec![9]);
}

#[test]
fn keys_are_ignored_while_too_big() {
    let config = CanvasConfig {
        width: Some(Extent::Fixed(78)),
        height: Some(Extent::Fixed(22)),
        ..CanvasConfig::default()
    };
    let (mut canvas, _, _) = canvas(config);
    let (id, picks) = menu_on(&mut canvas, &["Red"]);
    canvas.draw_sprite(id, Point::new(0.0, 0.0)).unwrap();
    canvas.resize(78, 24).unwrap();
    assert!(canvas.too_big());
    canvas.drain_events();

    canvas.handle_event(&press('1')).unwrap();
    assert!(picks.borrow().is_empty());
    assert!(canvas.drain_events().is_empty());
}

#[test]
fn menus_inherit_square_borders() {
    let config = CanvasConfig {
        border: BorderStyle::Solid,
        ..CanvasConfig::default()
    };
    let (mut canvas, _, _) = canvas(config);
    let (id, _) = menu_on(&mut canvas, &["Red", "Blue"]);
    assert_eq!(canvas.menu_width(id).unwrap(), 2 + 9 + 10);
    assert!(Menu::new(vec!["x".into()], Some(BorderStyle::Round), |_| {}).is_err());
}
