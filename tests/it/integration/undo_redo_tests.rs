//! Undo/Redo Integration Tests

use crate::helpers::{
    assert_item_count, assert_rect, board_with_rects, drag, identity_screen, move_to, press, rect_of, release,
    shortcut, TestBoardBuilder,
};
use refboard::input::events::{Key, Modifiers};
use refboard::types::Job;

#[test]
fn test_undo_restores_pre_drag_position() {
    let mut board = board_with_rects(&[(0.0, 0.0, 50.0, 50.0)]);

    drag(&mut board, identity_screen(25.0, 25.0), identity_screen(125.0, 25.0));
    assert_rect(rect_of(&board, "item-1"), (100.0, 0.0, 50.0, 50.0));

    assert!(board.undo());
    assert_rect(rect_of(&board, "item-1"), (0.0, 0.0, 50.0, 50.0));

    assert!(board.redo());
    assert_rect(rect_of(&board, "item-1"), (100.0, 0.0, 50.0, 50.0));
}

#[test]
fn test_undo_redo_walks_several_gestures() {
    let mut board = board_with_rects(&[(0.0, 0.0, 50.0, 50.0)]);

    drag(&mut board, identity_screen(25.0, 25.0), identity_screen(35.0, 25.0));
    drag(&mut board, identity_screen(35.0, 25.0), identity_screen(55.0, 25.0));
    drag(&mut board, identity_screen(55.0, 25.0), identity_screen(85.0, 25.0));
    assert_eq!(rect_of(&board, "item-1").x, 60.0);

    board.undo();
    assert_eq!(rect_of(&board, "item-1").x, 30.0);
    board.undo();
    assert_eq!(rect_of(&board, "item-1").x, 10.0);
    board.redo();
    assert_eq!(rect_of(&board, "item-1").x, 30.0);
}

#[test]
fn test_undo_paste_and_redo() {
    let mut board = TestBoardBuilder::new()
        .with_item(0.0, 0.0, 50.0, 50.0, 1)
        .selected("item-1")
        .build();

    shortcut(&mut board, 'c');
    let pasted = board.paste();
    assert_item_count(&board, 2);

    assert!(shortcut(&mut board, 'z'));
    assert_item_count(&board, 1);
    // Selection never points at items that no longer exist
    assert!(!board.is_selected(&pasted[0]));
    assert!(board.item_at(identity_screen(20.0, 20.0)).is_some());

    assert!(board.handle_key(Key::Character('z'), Modifiers { shift: true, control: true, ..Modifiers::none() }));
    assert_item_count(&board, 2);
}

#[test]
fn test_ctrl_y_redoes() {
    let mut board = TestBoardBuilder::new()
        .with_item(0.0, 0.0, 50.0, 50.0, 1)
        .selected("item-1")
        .build();

    board.delete_selected();
    board.undo();
    assert_item_count(&board, 1);

    assert!(shortcut(&mut board, 'y'));
    assert_item_count(&board, 0);
}

#[test]
fn test_undo_delete_restores_hit_testing() {
    let mut board = TestBoardBuilder::new()
        .with_item(0.0, 0.0, 50.0, 50.0, 1)
        .selected("item-1")
        .build();

    board.delete_selected();
    assert!(board.item_at(identity_screen(25.0, 25.0)).is_none());

    board.undo();
    assert_eq!(board.item_at(identity_screen(25.0, 25.0)).map(|r| r.id.as_str()), Some("item-1"));
}

#[test]
fn test_new_commit_clears_redo() {
    let mut board = board_with_rects(&[(0.0, 0.0, 50.0, 50.0)]);

    drag(&mut board, identity_screen(25.0, 25.0), identity_screen(35.0, 25.0));
    board.undo();
    assert!(board.history().can_redo());

    drag(&mut board, identity_screen(25.0, 25.0), identity_screen(25.0, 45.0));
    assert!(!board.history().can_redo());
    assert!(!board.redo());
}

#[test]
fn test_undo_ignored_during_gesture() {
    let mut board = board_with_rects(&[(0.0, 0.0, 50.0, 50.0)]);
    drag(&mut board, identity_screen(25.0, 25.0), identity_screen(35.0, 25.0));

    press(&mut board, identity_screen(35.0, 25.0), Modifiers::none());
    move_to(&mut board, identity_screen(55.0, 25.0));
    assert!(!board.undo());
    assert!(!shortcut(&mut board, 'z'));
    assert_eq!(rect_of(&board, "item-1").x, 30.0);

    release(&mut board, identity_screen(55.0, 25.0));
    assert_eq!(board.history().past_len(), 2);
}

#[test]
fn test_history_keeps_fifty_states() {
    let mut board = board_with_rects(&[(0.0, 0.0, 50.0, 50.0)]);

    for step in 0..60 {
        let x = 25.0 + f64::from(step);
        drag(&mut board, identity_screen(x, 25.0), identity_screen(x + 1.0, 25.0));
    }
    assert_eq!(board.history().past_len(), 50);

    let mut undone = 0;
    while board.undo() {
        undone += 1;
    }
    assert_eq!(undone, 50);
    // The first ten moves fell off the front
    assert_eq!(rect_of(&board, "item-1").x, 10.0);
}

#[test]
fn test_history_starts_from_loaded_document() {
    let mut job = Job::with_id("job-1", "Loaded");
    job.references.push(refboard::types::ReferenceItem::new(
        "/a.png",
        refboard::types::ReferenceKind::Image,
        refboard::types::ItemRect::new(0.0, 0.0, 10.0, 10.0),
        1,
    ));
    let mut board = refboard::board::ReferenceBoard::new(job.clone());

    assert!(!board.undo());
    assert_eq!(board.history().present(), &job);
}
