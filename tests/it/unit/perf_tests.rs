//! Unit tests for perf module.

use refboard::perf::{measure_and_log, ScopedTimer, POINTER_HANDLER_BUDGET_MS};

#[test]
fn test_timer_reports_elapsed_time() {
    let timer = ScopedTimer::start("handle_mouse_move", POINTER_HANDLER_BUDGET_MS);
    std::thread::sleep(std::time::Duration::from_millis(2));

    assert!(timer.elapsed_ms() >= 2.0);
    assert!(timer.overrun_ms().is_some());
}

#[test]
fn test_measure_and_log_passes_result_through() {
    let result: Result<u32, String> = measure_and_log("save_document", 0.0, || Ok(7));
    assert_eq!(result, Ok(7));
}
