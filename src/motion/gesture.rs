//! Pointer events to rotation updates

use glam::Vec2;

use super::state::MotionState;
use super::tracker::VelocityTracker;

/// Host-assigned pointer identifier (a DOM `pointerId`, say)
pub type PointerId = i32;

/// A pointer sample delivered by the host
///
/// Positions are in the same units as the view size passed to
/// [`TouchController::handle`]; times are milliseconds from any monotonic
/// origin.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PointerEvent {
    Down { id: PointerId, pos: Vec2, time_ms: f64 },
    Move { id: PointerId, pos: Vec2, time_ms: f64 },
    Up { id: PointerId },
    Cancel { id: PointerId },
}

impl PointerEvent {
    pub fn id(&self) -> PointerId {
        match *self {
            PointerEvent::Down { id, .. }
            | PointerEvent::Move { id, .. }
            | PointerEvent::Up { id }
            | PointerEvent::Cancel { id } => id,
        }
    }
}

/// Drives a [`MotionState`] from a single pointer
///
/// The first pointer to go down owns the gesture until it is lifted or
/// cancelled. Events from any other pointer are dropped.
#[derive(Debug, Clone, Default)]
pub struct TouchController {
    tracker: VelocityTracker,
    previous: Vec2,
    active: Option<PointerId>,
}

impl TouchController {
    pub fn new() -> Self {
        Self::default()
    }

    /// Last pointer position seen
    pub fn previous(&self) -> Vec2 {
        self.previous
    }

    pub fn tracker(&self) -> &VelocityTracker {
        &self.tracker
    }

    /// Pointer currently driving the gesture
    pub fn active_pointer(&self) -> Option<PointerId> {
        self.active
    }

    /// Apply one pointer event to `motion` for a view of `view_size` (w, h)
    pub fn handle(&mut self, event: PointerEvent, motion: &mut MotionState, view_size: (u32, u32)) {
        let owns = match (event, self.active) {
            (PointerEvent::Down { .. }, None) => true,
            (_, Some(active)) => event.id() == active,
            (_, None) => false,
        };
        if !owns {
            log::trace!("Ignoring pointer {}", event.id());
            return;
        }

        match event {
            PointerEvent::Down { id, pos, time_ms } => {
                self.active = Some(id);
                motion.set_touch_active(true);
                self.tracker.clear();
                self.tracker.add_sample(pos, time_ms);
                self.previous = pos;
                log::debug!("Pointer down at ({:.1}, {:.1})", pos.x, pos.y);
            }
            PointerEvent::Move { pos, time_ms, .. } => {
                self.tracker.add_sample(pos, time_ms);
                let velocity = self.tracker.velocity();
                motion.on_velocity_sample(velocity.x, velocity.y);

                let delta = pos - self.previous;
                motion.on_drag_delta(delta.x, delta.y, view_size.0, view_size.1, pos);
                self.previous = pos;
                log::trace!(
                    "Drag ({:.1}, {:.1}) -> angle {:.2}, velocity {:.3}",
                    delta.x,
                    delta.y,
                    motion.angle,
                    motion.angular_velocity
                );
            }
            PointerEvent::Up { .. } => {
                self.active = None;
                motion.set_touch_active(false);
                log::debug!("Pointer up, spinning at {:.3}", motion.angular_velocity);
            }
            PointerEvent::Cancel { .. } => {
                self.active = None;
                self.tracker.clear();
                motion.set_touch_active(false);
                log::debug!("Pointer cancelled");
            }
        }
    }
}
