use caret_core::driver::{AnsiDriver, DriverCall, RecordingDriver};
use caret_core::{CaretError, CursorController, EventChannel, Point};
use proptest::prelude::*;
use std::cell::RefCell;
use std::io::Cursor;
use std::rc::Rc;

fn logical(x: u16, y: u16) -> RecordingDriver {
    RecordingDriver::at(Point::new(x, y).to_one_based())
}

#[test]
fn test_move_save_retrieve_scenario() {
    let mut cursor = CursorController::new(logical(2, 3));

    assert_eq!(cursor.move_right(3).unwrap(), Point::new(2, 3));
    assert_eq!(cursor.position().unwrap(), Point::new(5, 3));

    let handle = cursor.save_current_position().unwrap();
    assert_eq!(handle.index(), 0);

    cursor.move_up(1).unwrap();
    assert_eq!(cursor.retrieve_position(handle).unwrap(), Point::new(5, 2));
    assert_eq!(cursor.position().unwrap(), Point::new(5, 3));
}

#[test]
fn test_move_round_trip_restores_position() {
    let mut cursor = CursorController::new(logical(8, 1));

    let previous = cursor.move_to(Point::new(0, 12)).unwrap();
    cursor.move_to(previous).unwrap();

    assert_eq!(cursor.position().unwrap(), Point::new(8, 1));
    let moves: Vec<DriverCall> = cursor
        .driver_mut()
        .take_calls()
        .into_iter()
        .filter(|call| matches!(call, DriverCall::MoveCursor(_)))
        .collect();
    assert_eq!(
        moves,
        vec![
            DriverCall::MoveCursor(Point::new(1, 13)),
            DriverCall::MoveCursor(Point::new(9, 2)),
        ]
    );
}

#[test]
fn test_invalid_handle_leaves_cursor_alone() {
    // Handles only come from saves; one issued elsewhere is not valid here
    let mut other = CursorController::new(logical(0, 0));
    let foreign = other.save_current_position().unwrap();

    let mut cursor = CursorController::new(logical(4, 4));
    let result = cursor.retrieve_position(foreign);

    assert!(matches!(result, Err(CaretError::InvalidHandle { handle: 0, len: 0 })));
    assert_eq!(cursor.position().unwrap(), Point::new(4, 4));
}

#[test]
fn test_controller_over_ansi_driver() {
    // Two queries: one for move_to, one for the explicit position() call
    let replies = b"\x1b[1;1R\x1b[3;5R".to_vec();
    let driver = AnsiDriver::new(Cursor::new(replies), Vec::new());
    let mut cursor = CursorController::new(driver);

    assert_eq!(cursor.move_to(Point::new(4, 2)).unwrap(), Point::origin());
    assert_eq!(cursor.position().unwrap(), Point::new(4, 2));

    let (_, output) = cursor.into_driver().into_parts();
    assert_eq!(output, b"\x1b[6n\x1b[3;5H\x1b[6n".to_vec());
}

/// A widget that announces cursor moves to whoever is listening
struct Caret {
    cursor: CursorController<RecordingDriver>,
    moved: EventChannel<Point, Point>,
}

impl Caret {
    fn step_right(&mut self) -> caret_core::Result<()> {
        let before = self.cursor.move_right(1)?;
        let after = self.cursor.position()?;
        self.moved.trigger(&before, &after);
        Ok(())
    }
}

#[test]
fn test_event_channel_reports_cursor_moves() {
    let mut caret = Caret {
        cursor: CursorController::new(logical(0, 0)),
        moved: EventChannel::new(),
    };
    let log = Rc::new(RefCell::new(Vec::new()));
    let sink = Rc::clone(&log);
    let id = caret
        .moved
        .add(move |from: &Point, to: &Point| sink.borrow_mut().push((*from, *to)));

    caret.step_right().unwrap();
    caret.step_right().unwrap();
    caret.moved.remove(id);
    caret.step_right().unwrap();

    assert_eq!(
        *log.borrow(),
        vec![
            (Point::new(0, 0), Point::new(1, 0)),
            (Point::new(1, 0), Point::new(2, 0)),
        ]
    );
}

proptest! {
    #[test]
    fn prop_saved_handles_are_sequential(rows in proptest::collection::vec(0u16..200, 1..30)) {
        let mut cursor = CursorController::new(RecordingDriver::new());
        let mut handles = Vec::new();
        for &row in &rows {
            cursor.move_to(Point::new(row / 2, row)).unwrap();
            handles.push(cursor.save_current_position().unwrap());
        }

        for (k, handle) in handles.iter().enumerate() {
            prop_assert_eq!(handle.index(), k);
            cursor.retrieve_position(*handle).unwrap();
            prop_assert_eq!(cursor.position().unwrap(), Point::new(rows[k] / 2, rows[k]));
        }

        cursor.clear_saved_positions();
        for handle in handles {
            let is_invalid = matches!(
                cursor.retrieve_position(handle),
                Err(CaretError::InvalidHandle { .. })
            );
            prop_assert!(is_invalid);
        }
    }
}
