use chrono::NaiveDate;

use super::state::TrackingState;

/// Outcome of one daily-reset check.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Rollover {
    Unchanged,
    Reset { previous: NaiveDate },
}

/// Clears the "today" total when the local date has moved on. Lifetime
/// totals and the persisted log are left alone.
pub fn check_rollover(state: &mut TrackingState, current_date: NaiveDate) -> Rollover {
    if state.last_reset_date == current_date {
        return Rollover::Unchanged;
    }
    let previous = state.last_reset_date;
    state.today_co2_g = 0.0;
    state.last_reset_date = current_date;
    Rollover::Reset { previous }
}
