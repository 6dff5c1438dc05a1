//! Board Workflow Integration Tests
//!
//! Pointer gestures, selection and clipboard driven through the public
//! event handlers, the way a hosting window would call them.

use crate::helpers::{
    assert_item_count, assert_rect, board_with_rects, click, drag, identity_screen, move_to, press, press_button,
    rect_of, release, screen, scroll, shortcut, TestBoardBuilder,
};
use refboard::input::coords::{point, CanvasState, CoordinateConverter};
use refboard::input::events::{Key, Modifiers, MouseButton};
use refboard::input::{GestureOutcome, ResizeHandle};

#[test]
fn test_drag_moves_by_summed_deltas() {
    let mut board = board_with_rects(&[(100.0, 100.0, 200.0, 100.0)]);

    press(&mut board, identity_screen(150.0, 150.0), Modifiers::none());
    assert!(board.input_state().is_dragging_items());
    move_to(&mut board, identity_screen(160.0, 150.0));
    move_to(&mut board, identity_screen(180.0, 170.0));
    let outcome = release(&mut board, identity_screen(180.0, 170.0));

    assert_eq!(outcome, GestureOutcome::ItemsChanged);
    assert_rect(rect_of(&board, "item-1"), (130.0, 120.0, 200.0, 100.0));
    assert!(board.is_selected("item-1"));
    assert_eq!(board.history().past_len(), 1);
}

#[test]
fn test_drag_delta_is_divided_by_scale() {
    let mut board = TestBoardBuilder::new()
        .with_item(0.0, 0.0, 100.0, 100.0, 1)
        .with_canvas(0.0, 0.0, 2.0)
        .build();

    let from = screen(&board, 50.0, 50.0);
    drag(&mut board, from, from + point(40.0, -20.0));

    assert_rect(rect_of(&board, "item-1"), (20.0, -10.0, 100.0, 100.0));
}

#[test]
fn test_drag_moves_whole_selection() {
    let mut board = TestBoardBuilder::new()
        .with_item(0.0, 0.0, 50.0, 50.0, 1)
        .with_item(200.0, 0.0, 50.0, 50.0, 2)
        .selected("item-1")
        .selected("item-2")
        .build();

    drag(&mut board, identity_screen(25.0, 25.0), identity_screen(35.0, 45.0));

    assert_rect(rect_of(&board, "item-1"), (10.0, 20.0, 50.0, 50.0));
    assert_rect(rect_of(&board, "item-2"), (210.0, 20.0, 50.0, 50.0));
    assert_eq!(board.history().past_len(), 1);
}

#[test]
fn test_resize_from_southeast_handle() {
    let mut board = TestBoardBuilder::new()
        .with_item(100.0, 100.0, 200.0, 100.0, 1)
        .selected("item-1")
        .build();

    let handle = identity_screen(300.0, 200.0);
    press(&mut board, handle, Modifiers::none());
    assert!(board.input_state().is_resizing());
    assert_eq!(board.input_state().active_handle(), Some(ResizeHandle::SouthEast));

    move_to(&mut board, handle + point(50.0, 50.0));
    let outcome = release(&mut board, handle + point(50.0, 50.0));

    assert_eq!(outcome, GestureOutcome::ItemsChanged);
    assert_rect(rect_of(&board, "item-1"), (100.0, 100.0, 250.0, 125.0));
}

#[test]
fn test_resize_from_northwest_keeps_opposite_corner() {
    let mut board = TestBoardBuilder::new()
        .with_item(100.0, 100.0, 200.0, 100.0, 1)
        .selected("item-1")
        .build();

    let handle = identity_screen(100.0, 100.0);
    drag(&mut board, handle, handle + point(-50.0, -50.0));

    let rect = rect_of(&board, "item-1");
    assert_rect(rect, (50.0, 75.0, 250.0, 125.0));
    assert!((rect.x + rect.width - 300.0).abs() < 1e-6);
    assert!((rect.y + rect.height - 200.0).abs() < 1e-6);
}

#[test]
fn test_resize_is_recomputed_from_gesture_start() {
    let mut board = TestBoardBuilder::new()
        .with_item(0.0, 0.0, 100.0, 100.0, 1)
        .selected("item-1")
        .build();

    let handle = identity_screen(100.0, 100.0);
    press(&mut board, handle, Modifiers::none());
    for step in 1..=10 {
        move_to(&mut board, handle + point(f64::from(step) * 3.0, 0.0));
    }
    move_to(&mut board, handle + point(10.0, 0.0));
    release(&mut board, handle + point(10.0, 0.0));

    assert_rect(rect_of(&board, "item-1"), (0.0, 0.0, 110.0, 110.0));
}

#[test]
fn test_resize_never_drops_below_minimum() {
    let mut board = TestBoardBuilder::new()
        .with_item(0.0, 0.0, 100.0, 100.0, 1)
        .selected("item-1")
        .build();

    let handle = identity_screen(100.0, 100.0);
    drag(&mut board, handle, handle + point(-500.0, -500.0));

    let rect = rect_of(&board, "item-1");
    assert!(rect.width >= 20.0 && rect.height >= 20.0, "{rect:?}");
}

#[test]
fn test_every_handle_keeps_aspect_minimum_and_opposite_edge() {
    for handle in ResizeHandle::ALL {
        for delta in [60.0, -60.0, -400.0] {
            let mut board = TestBoardBuilder::new()
                .with_item(100.0, 100.0, 200.0, 100.0, 1)
                .selected("item-1")
                .build();
            let initial = rect_of(&board, "item-1");
            let anchor = handle.position_on(&initial);
            let at = screen(&board, anchor.x, anchor.y);

            press(&mut board, at, Modifiers::none());
            assert_eq!(board.input_state().active_handle(), Some(handle), "{handle:?}");
            move_to(&mut board, at + point(delta, delta));
            release(&mut board, at + point(delta, delta));

            let rect = rect_of(&board, "item-1");
            let case = format!("{handle:?} by {delta}: {rect:?}");
            assert!((rect.width / rect.height - 2.0).abs() < 1e-9, "{case}");
            assert!(rect.width >= 20.0 && rect.height >= 20.0, "{case}");
            if handle.moves_left_edge() {
                assert!((rect.x + rect.width - 300.0).abs() < 1e-9, "{case}");
            } else {
                assert!((rect.x - 100.0).abs() < 1e-9, "{case}");
            }
            if handle.moves_top_edge() {
                assert!((rect.y + rect.height - 200.0).abs() < 1e-9, "{case}");
            } else {
                assert!((rect.y - 100.0).abs() < 1e-9, "{case}");
            }
        }
    }
}

#[test]
fn test_handle_wins_over_item_above_it() {
    let mut board = TestBoardBuilder::new()
        .with_item(0.0, 0.0, 100.0, 100.0, 1)
        .with_item(90.0, 90.0, 100.0, 100.0, 2)
        .selected("item-1")
        .build();

    // item-1's south-east handle sits on top of item-2's body
    press(&mut board, identity_screen(100.0, 100.0), Modifiers::none());

    assert!(board.input_state().is_resizing());
    assert!(board.is_selected("item-1"));
    assert!(!board.is_selected("item-2"));
}

#[test]
fn test_click_selects_topmost_item() {
    let mut board = board_with_rects(&[(0.0, 0.0, 100.0, 100.0), (50.0, 50.0, 100.0, 100.0)]);

    click(&mut board, identity_screen(75.0, 75.0), Modifiers::none());

    assert!(board.is_selected("item-2"));
    assert!(!board.is_selected("item-1"));
}

#[test]
fn test_click_without_movement_does_not_commit() {
    let mut board = board_with_rects(&[(0.0, 0.0, 100.0, 100.0)]);

    let outcome = click(&mut board, identity_screen(50.0, 50.0), Modifiers::none());

    assert_eq!(outcome, GestureOutcome::None);
    assert!(board.input_state().is_idle());
    assert!(!board.history().can_undo());
}

#[test]
fn test_ctrl_click_toggles_selection() {
    let mut board = board_with_rects(&[(0.0, 0.0, 50.0, 50.0), (200.0, 0.0, 50.0, 50.0)]);

    click(&mut board, identity_screen(25.0, 25.0), Modifiers::none());
    click(&mut board, identity_screen(225.0, 25.0), Modifiers::control());
    assert!(board.is_selected("item-1"));
    assert!(board.is_selected("item-2"));

    click(&mut board, identity_screen(25.0, 25.0), Modifiers::control());
    assert!(!board.is_selected("item-1"));
    assert!(board.is_selected("item-2"));
}

#[test]
fn test_clicking_selected_item_keeps_multi_selection() {
    let mut board = TestBoardBuilder::new()
        .with_item(0.0, 0.0, 50.0, 50.0, 1)
        .with_item(200.0, 0.0, 50.0, 50.0, 2)
        .selected("item-1")
        .selected("item-2")
        .build();

    click(&mut board, identity_screen(225.0, 25.0), Modifiers::none());

    assert_eq!(board.selected_ids().len(), 2);
}

#[test]
fn test_background_click_clears_selection() {
    let mut board = TestBoardBuilder::new()
        .with_item(0.0, 0.0, 50.0, 50.0, 1)
        .selected("item-1")
        .build();

    click(&mut board, identity_screen(500.0, 500.0), Modifiers::none());

    assert!(board.selected_ids().is_empty());
}

#[test]
fn test_shift_drag_on_background_pans() {
    let mut board = TestBoardBuilder::new()
        .with_item(0.0, 0.0, 50.0, 50.0, 1)
        .selected("item-1")
        .build();

    press(&mut board, identity_screen(500.0, 500.0), Modifiers::shift());
    assert!(board.input_state().is_panning());
    move_to(&mut board, identity_screen(530.0, 540.0));
    let outcome = release(&mut board, identity_screen(530.0, 540.0));

    assert_eq!(outcome, GestureOutcome::ViewChanged);
    assert_eq!((board.canvas().x(), board.canvas().y()), (30.0, 40.0));
    assert!(board.is_selected("item-1"));
    assert!(!board.history().can_undo());
}

#[test]
fn test_middle_button_pans_even_over_items() {
    let mut board = board_with_rects(&[(0.0, 0.0, 100.0, 100.0)]);

    press_button(&mut board, identity_screen(50.0, 50.0), MouseButton::Middle);
    assert!(board.input_state().is_panning());
    move_to(&mut board, identity_screen(40.0, 45.0));
    release(&mut board, identity_screen(40.0, 45.0));

    assert_eq!((board.canvas().x(), board.canvas().y()), (-10.0, -5.0));
    assert_rect(rect_of(&board, "item-1"), (0.0, 0.0, 100.0, 100.0));
    assert!(board.selected_ids().is_empty());
}

#[test]
fn test_right_button_is_ignored() {
    let mut board = board_with_rects(&[(0.0, 0.0, 100.0, 100.0)]);

    press_button(&mut board, identity_screen(50.0, 50.0), MouseButton::Right);

    assert!(board.input_state().is_idle());
    assert!(board.selected_ids().is_empty());
}

#[test]
fn test_second_press_during_gesture_is_ignored() {
    let mut board = board_with_rects(&[(0.0, 0.0, 100.0, 100.0)]);

    press(&mut board, identity_screen(50.0, 50.0), Modifiers::none());
    press(&mut board, identity_screen(800.0, 800.0), Modifiers::none());

    assert!(board.input_state().is_dragging_items());
    assert!(board.is_selected("item-1"));
}

#[test]
fn test_wheel_zoom_keeps_point_under_cursor() {
    let mut board = board_with_rects(&[(0.0, 0.0, 100.0, 100.0)]);
    let cursor = identity_screen(200.0, 100.0);
    let before = CoordinateConverter::screen_to_canvas(cursor, board.canvas());

    assert!(scroll(&mut board, cursor, 0.0, -500.0, Modifiers::none()));

    assert!((board.canvas().scale() - 1.5).abs() < 1e-9);
    let after = CoordinateConverter::screen_to_canvas(cursor, board.canvas());
    assert!((before.x - after.x).abs() < 1e-9);
    assert!((before.y - after.y).abs() < 1e-9);
}

#[test]
fn test_wheel_zoom_stops_at_limits() {
    let mut board = board_with_rects(&[]);
    let cursor = identity_screen(0.0, 0.0);

    scroll(&mut board, cursor, 0.0, -100_000.0, Modifiers::none());
    assert_eq!(board.canvas().scale(), 5.0);
    assert!(!scroll(&mut board, cursor, 0.0, -10.0, Modifiers::none()));

    scroll(&mut board, cursor, 0.0, 100_000.0, Modifiers::none());
    assert_eq!(board.canvas().scale(), 0.1);
}

#[test]
fn test_zero_scale_view_is_clamped() {
    let mut board = board_with_rects(&[(0.0, 0.0, 100.0, 100.0)]);

    board.set_canvas(CanvasState::new(0.0, 0.0, 0.0));

    assert_eq!(board.canvas().scale(), 0.1);
    // 5 screen px at scale 0.1 is 50 canvas units
    assert!(board.item_at(identity_screen(5.0, 5.0)).is_some());
    assert!(board.item_at(identity_screen(11.0, 5.0)).is_none());
}

#[test]
fn test_shift_wheel_pans() {
    let mut board = board_with_rects(&[]);

    assert!(scroll(&mut board, identity_screen(0.0, 0.0), 10.0, 20.0, Modifiers::shift()));

    assert_eq!((board.canvas().x(), board.canvas().y()), (-10.0, -20.0));
    assert_eq!(board.canvas().scale(), 1.0);
}

#[test]
fn test_copy_paste_cascades() {
    let mut board = TestBoardBuilder::new()
        .with_item(10.0, 20.0, 100.0, 100.0, 1)
        .selected("item-1")
        .build();

    assert!(shortcut(&mut board, 'c'));
    let first = board.paste();
    let second = board.paste();

    assert_item_count(&board, 3);
    assert_rect(rect_of(&board, &first[0]), (25.0, 35.0, 100.0, 100.0));
    assert_rect(rect_of(&board, &second[0]), (40.0, 50.0, 100.0, 100.0));
    assert_ne!(first[0], "item-1");
    assert_ne!(first[0], second[0]);

    assert_eq!(board.job().get_reference(&first[0]).map(|r| r.z_index), Some(2));
    assert_eq!(board.job().get_reference(&second[0]).map(|r| r.z_index), Some(3));

    // Only the latest paste stays selected
    assert_eq!(board.selected_ids().len(), 1);
    assert!(board.is_selected(&second[0]));
    assert_eq!(board.history().past_len(), 2);
}

#[test]
fn test_multi_item_paste_shares_z_index() {
    let mut board = TestBoardBuilder::new()
        .with_item(0.0, 0.0, 50.0, 50.0, 4)
        .with_item(100.0, 0.0, 50.0, 50.0, 9)
        .selected("item-1")
        .selected("item-2")
        .build();

    board.copy();
    let pasted = board.paste();

    assert_eq!(pasted.len(), 2);
    for id in &pasted {
        assert_eq!(board.job().get_reference(id).map(|r| r.z_index), Some(10));
    }
}

#[test]
fn test_copy_with_empty_selection_keeps_clipboard() {
    let mut board = TestBoardBuilder::new()
        .with_item(0.0, 0.0, 50.0, 50.0, 1)
        .selected("item-1")
        .build();

    assert!(board.copy());
    board.clear_selection();
    assert!(!shortcut(&mut board, 'c'));

    assert_eq!(board.clipboard().items().len(), 1);
}

#[test]
fn test_paste_with_empty_clipboard_does_nothing() {
    let mut board = board_with_rects(&[(0.0, 0.0, 50.0, 50.0)]);

    assert!(!shortcut(&mut board, 'v'));

    assert_item_count(&board, 1);
    assert!(!board.history().can_undo());
}

#[test]
fn test_delete_removes_selection_from_hit_testing() {
    let mut board = TestBoardBuilder::new()
        .with_item(0.0, 0.0, 50.0, 50.0, 1)
        .with_item(100.0, 0.0, 50.0, 50.0, 2)
        .with_item(200.0, 0.0, 50.0, 50.0, 3)
        .selected("item-1")
        .selected("item-3")
        .build();

    assert!(board.handle_key(Key::Delete, Modifiers::none()));

    assert_item_count(&board, 1);
    assert!(board.selected_ids().is_empty());
    assert!(board.item_at(identity_screen(25.0, 25.0)).is_none());
    assert_eq!(board.item_at(identity_screen(125.0, 25.0)).map(|r| r.id.as_str()), Some("item-2"));
}

#[test]
fn test_delete_with_nothing_selected_is_noop() {
    let mut board = board_with_rects(&[(0.0, 0.0, 50.0, 50.0)]);

    assert!(!board.handle_key(Key::Backspace, Modifiers::none()));

    assert_item_count(&board, 1);
    assert!(!board.history().can_undo());
}

#[test]
fn test_moved_item_is_hit_at_new_position() {
    let mut board = board_with_rects(&[(0.0, 0.0, 50.0, 50.0)]);

    drag(&mut board, identity_screen(25.0, 25.0), identity_screen(325.0, 25.0));

    assert!(board.item_at(identity_screen(25.0, 25.0)).is_none());
    assert!(board.item_at(identity_screen(325.0, 25.0)).is_some());
}
