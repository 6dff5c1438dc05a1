//! Integration tests for RefBoard.
//!
//! These tests verify the interaction between multiple components
//! and test complete workflows end-to-end.

mod board_workflow_tests;
mod undo_redo_tests;
