mod support;

use marquee::{
    Component, Direction, ScrollingList, ScrollingListOptions, Settings, loop_decrement,
    loop_increment,
};
use support::{items, text_list};

fn names(list: &ScrollingList) -> Vec<String> {
    list.visible_items().iter().map(|i| i.name.clone()).collect()
}

#[test]
fn loop_arithmetic_round_trips() {
    for n in 1..=16usize {
        for start in 0..n {
            for k in 0..2 * n {
                assert_eq!(loop_decrement(loop_increment(start, k, n), k, n), start);
            }
        }
    }
}

#[test]
fn scroll_forward_then_backward_restores_arrangement() {
    support::init_tracing();
    for window in 1..=4usize {
        let mut list = text_list(window, ScrollingListOptions::default());
        list.set_items(&items(&["a", "b", "c", "d", "e"]));
        let before = names(&list);
        let index_before = list.selected_index();

        for _ in 0..7 {
            list.scroll(Direction::Forward);
        }
        for _ in 0..7 {
            list.scroll(Direction::Backward);
        }

        assert_eq!(names(&list), before, "window {window}");
        assert_eq!(list.selected_index(), index_before, "window {window}");
    }
}

#[test]
fn letter_jumps_match_expected_landings() {
    // Collection ["Ant","Apple","Banana","Cherry"], window 2, offset 0.
    let config = Settings::from_json(r#"{"previousLetterSubToCurrent": true}"#).unwrap();
    let opts = ScrollingListOptions::from_config(&config);
    assert!(opts.jump_to_group_start);

    let mut list = text_list(2, opts);
    list.set_items(&items(&["Ant", "Apple", "Banana", "Cherry"]));

    list.set_selected_index(1); // Apple
    list.letter_down();
    assert_eq!(list.selected_item().unwrap().name, "Banana");

    list.letter_up();
    assert_eq!(list.selected_item().unwrap().name, "Ant");
}

#[test]
fn letter_jump_is_idempotent_at_group_boundaries() {
    let mut list = text_list(
        2,
        ScrollingListOptions {
            jump_to_group_start: true,
            ..ScrollingListOptions::default()
        },
    );
    list.set_items(&items(&["Able", "Baker", "Bravo", "Charlie"]));

    // Forward from the last "B" lands on the first non-"B" group.
    list.set_selected_index(2); // Bravo
    list.letter_down();
    assert_eq!(list.selected_item().unwrap().name, "Charlie");

    // Backward from there returns to the start of "B".
    list.letter_up();
    assert_eq!(list.selected_item().unwrap().name, "Baker");

    // And again: already at a boundary, so the next group start is "Able".
    list.letter_up();
    assert_eq!(list.selected_item().unwrap().name, "Able");
}

#[test]
fn deceleration_reaches_floor_after_expected_scrolls() {
    // Exact binary fractions so the floor comparison stays exact.
    let p0: f64 = 1.0;
    let pmin: f64 = 0.25;
    let accel: f64 = 0.25;
    let expected = ((p0 - pmin) / accel).ceil() as usize; // 3

    let mut list = text_list(
        2,
        ScrollingListOptions {
            scroll_period_start: p0,
            scroll_period_min: pmin,
            scroll_acceleration: accel,
            ..ScrollingListOptions::default()
        },
    );
    list.set_items(&items(&["a", "b", "c", "d"]));

    for i in 1..=expected {
        assert!(!list.is_fast_scrolling(), "before scroll {i}");
        list.scroll(Direction::Forward);
    }
    assert!(list.is_fast_scrolling());
    assert_eq!(list.scroll_period(), pmin);

    list.scroll(Direction::Forward);
    assert_eq!(list.scroll_period(), pmin, "stays at the floor");

    list.halt();
    assert!(!list.is_fast_scrolling());
    assert_eq!(list.scroll_period(), p0);
}

#[test]
fn page_jump_and_sub_change_navigate_groups() {
    let mut all = items(&["a1", "a2", "b1", "b2", "c1"]);
    for (item, sub) in all.iter_mut().zip(["x", "x", "y", "y", "z"]) {
        std::sync::Arc::get_mut(item).unwrap().collection_name = sub.into();
    }

    let mut list = text_list(2, ScrollingListOptions::default());
    list.set_items(&all);

    list.page_down();
    assert_eq!(names(&list), ["b1", "b2"]);

    list.sub_change(Direction::Forward);
    assert_eq!(list.selected_item().unwrap().name, "c1");

    list.page_up();
    list.page_up();
    assert_eq!(list.selected_index(), 0);
}

#[test]
fn random_jump_is_deterministic_and_in_range() {
    let build = || {
        let mut list = text_list(2, ScrollingListOptions::default());
        list.set_items(&items(&["a", "b", "c", "d", "e"]));
        list
    };
    let mut first = build();
    let mut second = build();
    first.random(42);
    second.random(42);
    assert_eq!(first.selected_index(), second.selected_index());
    assert!(first.selected_index() < first.len());
}

#[test]
fn scroll_animations_settle_to_idle() {
    let mut list = text_list(3, ScrollingListOptions::default());
    list.set_items(&items(&["a", "b", "c", "d"]));
    list.scroll(Direction::Forward);
    assert!(!Component::is_idle(&list));

    let mut guard = 0;
    while !Component::update(&mut list, 0.05) {
        guard += 1;
        assert!(guard < 100, "scroll animation never settled");
    }
    assert!(Component::is_idle(&list));
}
