//! Progress state-machine transition.
//!
//! The whole state machine lives in `(last_day_claimed, streak)`; this module
//! is the single named transition over it. Call sites never branch on day
//! gaps themselves.

use chomp_core::base::NEVER_CLAIMED;
use chomp_core::schema::progress::UserProgress;

use crate::error::LedgerError;

/// Apply an accepted claim for `day` to a progress record.
///
/// - first ever claim: streak starts at 1;
/// - consecutive day: streak increments;
/// - same day again: rejected (`DaySequenceRejected`);
/// - any other gap, forwards or backwards: streak resets to 1.
///
/// On acceptance `last_day_claimed` moves to `day` and `total_claims`
/// increments, unconditionally.
///
/// # Errors
/// Returns [`LedgerError::DaySequenceRejected`] for a same-day re-claim; the
/// record is untouched in that case.
pub fn advance(progress: &mut UserProgress, day: i64) -> Result<(), LedgerError> {
    if day == progress.last_day_claimed {
        return Err(LedgerError::DaySequenceRejected { day });
    }
    apply(progress, day);
    Ok(())
}

/// Development-only transition: accepts any day ordering.
///
/// Still requires signature verification and the replay guard upstream; the
/// only rule relaxed is day sequencing. A same-day claim is accepted without
/// changing the streak, so the signature/replay path can be exercised
/// repeatedly without waiting a real day.
pub fn advance_dev(progress: &mut UserProgress, day: i64) {
    apply(progress, day);
}

fn apply(progress: &mut UserProgress, day: i64) {
    if progress.last_day_claimed == NEVER_CLAIMED {
        progress.streak = 1;
    } else if day == progress.last_day_claimed.saturating_add(1) {
        progress.streak = progress.streak.saturating_add(1);
    } else if day == progress.last_day_claimed {
        // dev path only: same-day re-claim leaves the streak alone
    } else {
        progress.streak = 1;
    }
    progress.last_day_claimed = day;
    progress.total_claims = progress.total_claims.saturating_add(1);
}
