//! Side channel reporting every candidate path to an observer.
//!
//! Observers see what path discovery considered and why candidates
//! were dropped. They never influence results: discovery emits events
//! after each decision has been made.

use std::fmt;

use glam::Vec3;
use raypath_core::PathMechanism;
use smallvec::SmallVec;

/// Polyline of a candidate path, TX first and RX last.
pub type PathPoints = SmallVec<[Vec3; 4]>;

/// Why a candidate path was dropped.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum RejectReason {
    /// Total length is beyond the configured maximum range, or below
    /// the minimum step.
    OutOfRange,
    /// Another obstacle blocks a segment.
    Occluded,
    /// The ray toward the surface point struck something else first.
    Unreachable,
    /// The edge does not stand between TX and RX.
    NotObstructing,
    /// Snapping to the true surface failed.
    SnapFailed,
    /// Incidence or observation angle is not in front of the surface.
    BackFacing,
}

impl RejectReason {
    /// Lower-case reason name.
    pub fn name(self) -> &'static str {
        match self {
            Self::OutOfRange => "out-of-range",
            Self::Occluded => "occluded",
            Self::Unreachable => "unreachable",
            Self::NotObstructing => "not-obstructing",
            Self::SnapFailed => "snap-failed",
            Self::BackFacing => "back-facing",
        }
    }
}

impl fmt::Display for RejectReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Result of considering one candidate.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum PathOutcome {
    /// The candidate became a path contribution.
    Accepted {
        /// Total loss of the path, dB.
        loss_db: f32,
    },
    /// The candidate was dropped.
    Rejected(RejectReason),
}

/// One candidate path considered during discovery.
#[derive(Clone, Debug, PartialEq)]
pub struct PathEvent {
    /// Mechanism under consideration.
    pub mechanism: PathMechanism,
    /// Candidate polyline.
    pub points: PathPoints,
    /// Whether it was kept.
    pub outcome: PathOutcome,
}

impl PathEvent {
    /// Event for an accepted candidate.
    pub fn accepted(mechanism: PathMechanism, points: &[Vec3], loss_db: f32) -> Self {
        Self {
            mechanism,
            points: SmallVec::from_slice(points),
            outcome: PathOutcome::Accepted { loss_db },
        }
    }

    /// Event for a rejected candidate.
    pub fn rejected(mechanism: PathMechanism, points: &[Vec3], reason: RejectReason) -> Self {
        Self {
            mechanism,
            points: SmallVec::from_slice(points),
            outcome: PathOutcome::Rejected(reason),
        }
    }

    /// Returns `true` if the candidate was kept.
    pub fn is_accepted(&self) -> bool {
        matches!(self.outcome, PathOutcome::Accepted { .. })
    }
}

/// Receives candidate-path events.
///
/// # Thread Safety
///
/// Receiver sampling evaluates links on worker threads that share one
/// observer, so implementations must be `Send + Sync` and do their own
/// interior synchronization.
pub trait PathObserver: Send + Sync {
    /// Called once per candidate, after its fate is decided.
    fn on_path(&self, event: &PathEvent);
}

impl<F> PathObserver for F
where
    F: Fn(&PathEvent) + Send + Sync,
{
    fn on_path(&self, event: &PathEvent) {
        self(event)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    #[test]
    fn closures_are_observers() {
        let seen = AtomicUsize::new(0);
        let obs = |e: &PathEvent| {
            if e.is_accepted() {
                seen.fetch_add(1, Ordering::Relaxed);
            }
        };
        let pts = [Vec3::ZERO, Vec3::X];
        obs.on_path(&PathEvent::accepted(PathMechanism::Direct, &pts, 40.0));
        obs.on_path(&PathEvent::rejected(
            PathMechanism::Direct,
            &pts,
            RejectReason::Occluded,
        ));
        assert_eq!(seen.load(Ordering::Relaxed), 1);
    }

    #[test]
    fn event_keeps_polyline() {
        let pts = [Vec3::ZERO, Vec3::Y, Vec3::X];
        let e = PathEvent::rejected(PathMechanism::Reflection, &pts, RejectReason::Unreachable);
        assert_eq!(e.points.as_slice(), &pts);
        assert_eq!(e.outcome, PathOutcome::Rejected(RejectReason::Unreachable));
        assert_eq!(RejectReason::SnapFailed.to_string(), "snap-failed");
    }
}
