//! Parabolic motion
//!
//! Constant-step Euler integration of a projectile with per-axis
//! acceleration, bouncing off the bottom, left and right edges of the render
//! surface. One tick is one time unit: velocities are in pixels per tick and
//! accelerations in pixels per tick squared, so motion speed follows the
//! host's frame rate.
//!
//! There is no top edge. Objects thrown upwards may leave the surface and
//! come back under gravity.

use flick_core::{CallbackSlot, Point, Size, Vec2};
use smallvec::SmallVec;

/// A surface edge an object can collide with
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Edge {
    Bottom,
    Left,
    Right,
}

/// Edges hit during a single tick, in resolution order
pub type EdgeHits = SmallVec<[Edge; 3]>;

/// Projectile state of one object
#[derive(Debug)]
pub struct ParabolicMotion {
    start_position: Point,
    position: Point,
    initial_velocity: Vec2,
    velocity: Vec2,
    acceleration: Vec2,
    /// Per-axis velocity fraction kept (sign-flipped) on contact
    restitution: Vec2,
    bottom: bool,
    left: bool,
    right: bool,
    /// Drawn size of the object, subtracted from the surface extent
    footprint: Size,
    bottom_hit: CallbackSlot,
    left_hit: CallbackSlot,
    right_hit: CallbackSlot,
}

impl Default for ParabolicMotion {
    fn default() -> Self {
        Self::new(Size::ZERO)
    }
}

impl ParabolicMotion {
    /// Default physics: gravity of 0.98 px/tick², restitution 0.8 on both
    /// axes, and all three edges enabled.
    pub fn new(footprint: Size) -> Self {
        Self {
            start_position: Point::ZERO,
            position: Point::ZERO,
            initial_velocity: Vec2::ZERO,
            velocity: Vec2::ZERO,
            acceleration: Vec2::new(0.0, 0.98),
            restitution: Vec2::new(0.8, 0.8),
            bottom: true,
            left: true,
            right: true,
            footprint,
            bottom_hit: CallbackSlot::new(),
            left_hit: CallbackSlot::new(),
            right_hit: CallbackSlot::new(),
        }
    }

    // =========================================================================
    // Builder
    // =========================================================================

    /// Builder: start position
    pub fn position(mut self, x: f32, y: f32) -> Self {
        self.set_position(x, y);
        self
    }

    pub fn initial_velocity_x(mut self, vx: f32) -> Self {
        self.set_initial_velocity(Vec2::new(vx, self.initial_velocity.y));
        self
    }

    pub fn initial_velocity_y(mut self, vy: f32) -> Self {
        self.set_initial_velocity(Vec2::new(self.initial_velocity.x, vy));
        self
    }

    pub fn acceleration_x(mut self, ax: f32) -> Self {
        self.acceleration.x = ax;
        self
    }

    pub fn acceleration_y(mut self, ay: f32) -> Self {
        self.acceleration.y = ay;
        self
    }

    pub fn coefficient_restitution_x(mut self, e: f32) -> Self {
        self.restitution.x = e;
        self
    }

    pub fn coefficient_restitution_y(mut self, e: f32) -> Self {
        self.restitution.y = e;
        self
    }

    /// Builder: enable or disable the bottom edge
    pub fn coefficient_bottom(mut self, enabled: bool) -> Self {
        self.bottom = enabled;
        self
    }

    pub fn coefficient_left(mut self, enabled: bool) -> Self {
        self.left = enabled;
        self
    }

    pub fn coefficient_right(mut self, enabled: bool) -> Self {
        self.right = enabled;
        self
    }

    pub fn footprint(mut self, size: Size) -> Self {
        self.footprint = size;
        self
    }

    // =========================================================================
    // Mutating setters
    // =========================================================================

    /// Move to `(x, y)` and make that the reset position
    pub fn set_position(&mut self, x: f32, y: f32) {
        self.start_position = Point::new(x, y);
        self.position = self.start_position;
    }

    /// Set both the current and the reset velocity
    pub fn set_initial_velocity(&mut self, velocity: Vec2) {
        self.initial_velocity = velocity;
        self.velocity = velocity;
    }

    pub fn set_velocity(&mut self, velocity: Vec2) {
        self.velocity = velocity;
    }

    pub fn set_acceleration(&mut self, acceleration: Vec2) {
        self.acceleration = acceleration;
    }

    pub fn set_restitution(&mut self, restitution: Vec2) {
        self.restitution = restitution;
    }

    pub fn set_edge(&mut self, edge: Edge, enabled: bool) {
        match edge {
            Edge::Bottom => self.bottom = enabled,
            Edge::Left => self.left = enabled,
            Edge::Right => self.right = enabled,
        }
    }

    pub fn set_footprint(&mut self, size: Size) {
        self.footprint = size;
    }

    pub fn set_hit_callback<F: FnMut() + Send + 'static>(&mut self, edge: Edge, f: F) {
        match edge {
            Edge::Bottom => self.bottom_hit.set(f),
            Edge::Left => self.left_hit.set(f),
            Edge::Right => self.right_hit.set(f),
        }
    }

    /// Disable all edges so the object flies freely
    pub fn disable_edges(&mut self) {
        self.bottom = false;
        self.left = false;
        self.right = false;
    }

    /// Return to the start position and initial velocity
    pub fn reset(&mut self) {
        self.position = self.start_position;
        self.velocity = self.initial_velocity;
    }

    // =========================================================================
    // Simulation
    // =========================================================================

    /// Integrate one tick against a surface of `surface` size and resolve
    /// edge contacts. Returns the edges hit, in order.
    pub fn tick(&mut self, surface: Size) -> EdgeHits {
        // Bounds are read live so surface resizes apply immediately.
        let bottom_bound = self.bottom.then(|| self.bottom_bound(surface));
        let right_bound = self.right.then(|| self.right_bound(surface));

        self.velocity += self.acceleration;
        self.position = self.position.offset(self.velocity);

        let mut hits = EdgeHits::new();

        if let Some(bound) = bottom_bound {
            if self.position.y > bound {
                self.position.y = bound;
                self.velocity.y = -self.velocity.y * self.restitution.y;
                hits.push(Edge::Bottom);
            }
        }

        if self.left && self.position.x < 0.0 {
            self.position.x = 0.0;
            self.velocity.x = -self.velocity.x * self.restitution.x;
            hits.push(Edge::Left);
        }

        if let Some(bound) = right_bound {
            if self.position.x > bound {
                self.position.x = bound;
                self.velocity.x = -self.velocity.x * self.restitution.x;
                hits.push(Edge::Right);
            }
        }

        for edge in &hits {
            tracing::trace!(?edge, x = self.position.x, y = self.position.y, "edge hit");
            match edge {
                Edge::Bottom => self.bottom_hit.fire(),
                Edge::Left => self.left_hit.fire(),
                Edge::Right => self.right_hit.fire(),
            };
        }

        hits
    }

    /// Largest y the object can reach on a surface of `surface` size
    pub fn bottom_bound(&self, surface: Size) -> f32 {
        surface.height - self.footprint.height
    }

    /// Largest x the object can reach on a surface of `surface` size
    pub fn right_bound(&self, surface: Size) -> f32 {
        surface.width - self.footprint.width
    }

    pub fn current_position(&self) -> Point {
        self.position
    }

    pub fn initial_velocity(&self) -> Vec2 {
        self.initial_velocity
    }

    pub fn velocity(&self) -> Vec2 {
        self.velocity
    }

    pub fn acceleration(&self) -> Vec2 {
        self.acceleration
    }

    pub fn restitution(&self) -> Vec2 {
        self.restitution
    }

    pub fn edge_enabled(&self, edge: Edge) -> bool {
        match edge {
            Edge::Bottom => self.bottom,
            Edge::Left => self.left,
            Edge::Right => self.right,
        }
    }

    pub fn footprint_size(&self) -> Size {
        self.footprint
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicU32, Ordering};
    use std::sync::Arc;

    const SURFACE: Size = Size::new(200.0, 100.0);

    fn ball() -> ParabolicMotion {
        ParabolicMotion::new(Size::new(10.0, 10.0))
    }

    #[test]
    fn test_free_flight_integrates_velocity_then_position() {
        let mut m = ball()
            .position(50.0, 10.0)
            .initial_velocity_x(2.0)
            .initial_velocity_y(-3.0)
            .acceleration_y(1.0);

        m.tick(SURFACE);
        assert_eq!(m.velocity(), Vec2::new(2.0, -2.0));
        assert_eq!(m.current_position(), Point::new(52.0, 8.0));

        m.tick(SURFACE);
        assert_eq!(m.current_position(), Point::new(54.0, 7.0));
    }

    #[test]
    fn test_bottom_restitution_clamps_and_halves() {
        let mut m = ball()
            .position(50.0, 85.0)
            .initial_velocity_y(10.0)
            .acceleration_y(0.0)
            .coefficient_restitution_y(0.5);

        let hits = m.tick(SURFACE);

        assert_eq!(hits.as_slice(), &[Edge::Bottom]);
        assert_eq!(m.velocity().y, -5.0);
        assert_eq!(m.current_position().y, m.bottom_bound(SURFACE));
        assert_eq!(m.current_position().y, 90.0);
    }

    #[test]
    fn test_disabled_bottom_never_clamps() {
        let fired = Arc::new(AtomicU32::new(0));
        let f = fired.clone();
        let mut m = ball().position(50.0, 0.0).coefficient_bottom(false);
        m.set_hit_callback(Edge::Bottom, move || {
            f.fetch_add(1, Ordering::SeqCst);
        });

        for _ in 0..100 {
            m.tick(SURFACE);
        }

        assert!(m.current_position().y > m.bottom_bound(SURFACE));
        assert_eq!(fired.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn test_zero_restitution_stops_at_edge() {
        let mut m = ball()
            .position(5.0, 50.0)
            .initial_velocity_x(-10.0)
            .acceleration_y(0.0)
            .coefficient_restitution_x(0.0);

        let hits = m.tick(SURFACE);
        assert_eq!(hits.as_slice(), &[Edge::Left]);
        assert_eq!(m.current_position().x, 0.0);
        assert_eq!(m.velocity().x, 0.0);
    }

    #[test]
    fn test_lossless_right_bounce() {
        let mut m = ball()
            .position(185.0, 50.0)
            .initial_velocity_x(10.0)
            .acceleration_y(0.0)
            .coefficient_restitution_x(1.0);

        let hits = m.tick(SURFACE);
        assert_eq!(hits.as_slice(), &[Edge::Right]);
        assert_eq!(m.current_position().x, 190.0);
        assert_eq!(m.velocity().x, -10.0);
    }

    #[test]
    fn test_corner_resolves_bottom_then_side() {
        let mut m = ball()
            .position(2.0, 88.0)
            .initial_velocity_x(-5.0)
            .initial_velocity_y(5.0)
            .acceleration_y(0.0);

        let hits = m.tick(SURFACE);
        assert_eq!(hits.as_slice(), &[Edge::Bottom, Edge::Left]);
        assert_eq!(m.current_position(), Point::new(0.0, 90.0));
    }

    #[test]
    fn test_no_top_edge() {
        let mut m = ball().initial_velocity_y(-50.0).acceleration_y(0.0);
        m.tick(SURFACE);
        assert_eq!(m.current_position().y, -50.0);
    }

    #[test]
    fn test_bounds_follow_surface_resize() {
        let mut m = ball().position(50.0, 80.0).acceleration_y(0.0).initial_velocity_y(5.0);

        // Tall surface: no contact
        assert!(m.tick(Size::new(200.0, 300.0)).is_empty());
        // Shrunk surface: contact at the new bound
        let hits = m.tick(Size::new(200.0, 60.0));
        assert_eq!(hits.as_slice(), &[Edge::Bottom]);
        assert_eq!(m.current_position().y, 50.0);
    }

    #[test]
    fn test_bouncing_ball_settles_under_gravity() {
        let mut m = ball().position(50.0, 0.0).coefficient_restitution_y(0.5);
        for _ in 0..2000 {
            m.tick(SURFACE);
            assert!(m.current_position().y <= m.bottom_bound(SURFACE));
        }
        assert!(m.velocity().y.abs() < 1.0);
    }

    #[test]
    fn test_reset_restores_start() {
        let mut m = ball().position(10.0, 10.0).initial_velocity_x(3.0);
        for _ in 0..5 {
            m.tick(SURFACE);
        }
        m.reset();
        assert_eq!(m.current_position(), Point::new(10.0, 10.0));
        assert_eq!(m.velocity(), Vec2::new(3.0, 0.0));
    }
}
