//! Order status projection onto the fixed progress timeline.
//!
//! A pure, read-only mapping from an order's status to the four displayed
//! progress steps. Position lookup runs over a five-entry track that keeps
//! `rescheduled` between `confirmed` and `in_delivery`: a pushed-back order
//! still reads as confirmed on the timeline without `rescheduled` ever
//! appearing as a step of its own. Statuses outside the track (`draft`,
//! `cancelled`, `payment_pending`, `paid`) reach nothing; the status badge
//! alone communicates those states.

use super::order::{Order, OrderStatus};

/// Status track used for position lookup, in progression order.
pub const PROGRESS_TRACK: [OrderStatus; 5] = [
    OrderStatus::New,
    OrderStatus::Confirmed,
    OrderStatus::Rescheduled,
    OrderStatus::InDelivery,
    OrderStatus::Completed,
];

/// Steps shown on the timeline, in display order.
pub const DISPLAY_STEPS: [OrderStatus; 4] = [
    OrderStatus::New,
    OrderStatus::Confirmed,
    OrderStatus::InDelivery,
    OrderStatus::Completed,
];

/// One rendered timeline step.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProgressStep {
    /// The status this step represents.
    pub status: OrderStatus,
    /// Label shown under the step marker.
    pub label: &'static str,
    /// Whether the order's progression has reached this step.
    pub reached: bool,
}

/// Position of a status within [`PROGRESS_TRACK`], `None` for statuses
/// outside the linear progression.
#[must_use]
pub fn track_position(status: OrderStatus) -> Option<usize> {
    PROGRESS_TRACK.iter().position(|entry| *entry == status)
}

/// Project a status onto the displayed steps.
///
/// A step is reached when its track position is at or before the order
/// status's own track position; a status outside the track reaches nothing.
#[must_use]
pub fn project(status: OrderStatus) -> [ProgressStep; 4] {
    let current = track_position(status);
    DISPLAY_STEPS.map(|step| {
        let reached = match (track_position(step), current) {
            (Some(step_position), Some(current_position)) => step_position <= current_position,
            _ => false,
        };
        ProgressStep {
            status: step,
            label: step.label(),
            reached,
        }
    })
}

/// Project a fetched order's status onto the displayed steps.
#[must_use]
pub fn project_order(order: &Order) -> [ProgressStep; 4] {
    project(order.status)
}
