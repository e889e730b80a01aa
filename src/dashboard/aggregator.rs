// Dashboard statistics
// Pure reduction of a user's progress records and plans into the numbers
// shown on the dashboard. No I/O happens here.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::plans::models::Plan;
use crate::progress::models::Progress;

/// Weight of the training average in the derived preparedness score
pub const TRAINING_WEIGHT: f64 = 0.7;

/// Points added to the derived preparedness score per completed plan
pub const POINTS_PER_READY_PLAN: f64 = 6.0;

/// Aggregated numbers for the dashboard
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct DashboardStats {
    /// Rounded mean of all progress values
    pub training_progress: i64,
    pub plans_ready: i64,
    pub total_plans: i64,
    pub preparedness_score: i64,
    pub courses_completed: i64,
}

/// Round to the nearest integer, halves toward positive infinity.
/// `f64::round` would send -2.5 to -3; this sends it to -2.
fn round_half_up(value: f64) -> i64 {
    (value + 0.5).floor() as i64
}

/// Rounded mean progress; an empty set averages to 0.
pub fn training_progress(records: &[Progress]) -> i64 {
    let total: f64 = records.iter().map(|r| r.progress).sum();
    let count = records.len().max(1) as f64;
    round_half_up(total / count)
}

/// Score derived from training and completed plans
pub fn derive_preparedness_score(training_progress: i64, plans_ready: i64) -> i64 {
    round_half_up(
        training_progress as f64 * TRAINING_WEIGHT + plans_ready as f64 * POINTS_PER_READY_PLAN,
    )
}

/// Build the dashboard statistics.
///
/// A non-zero `stored_score` wins over the derived score. Zero is treated
/// as "never set", so a genuinely-zero stored score is recomputed.
pub fn compute_stats(stored_score: i32, progress: &[Progress], plans: &[Plan]) -> DashboardStats {
    let training_progress = training_progress(progress);
    let plans_ready = plans.iter().filter(|p| p.completed).count() as i64;
    let total_plans = plans.len() as i64;
    let courses_completed = progress.iter().filter(|p| p.completed).count() as i64;

    let preparedness_score = if stored_score != 0 {
        i64::from(stored_score)
    } else {
        derive_preparedness_score(training_progress, plans_ready)
    };

    DashboardStats {
        training_progress,
        plans_ready,
        total_plans,
        preparedness_score,
        courses_completed,
    }
}
