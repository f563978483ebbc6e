//! Free-flying camera.

use crate::config::{BindingsConfig, CameraConfig};
use crate::input::InputSource;
use horo::{horo_rotation, rotation, Geometry, Isometry, Vec3};
use tracing::trace;

/// A camera that flies through the model with inertia.
///
/// The pose maps camera space to world space; the velocity is expressed in
/// camera space, so turning the camera rotates the velocity the other way
/// and momentum keeps its world direction.
#[derive(Clone, Debug)]
pub struct GhostCamera {
    geometry: Geometry,
    pose: Isometry,
    velocity: Vec3<f64>,
    zoom: f64,
    rotation_lock: bool,
    slow: bool,
    config: CameraConfig,
    bindings: BindingsConfig,
}

impl GhostCamera {
    pub fn new(geometry: Geometry, config: CameraConfig, bindings: BindingsConfig) -> Self {
        Self {
            geometry,
            pose: Isometry::identity(),
            velocity: Vec3::zero(),
            zoom: config.initial_zoom,
            rotation_lock: false,
            slow: false,
            config,
            bindings,
        }
    }

    pub fn geometry(&self) -> Geometry { self.geometry }

    pub fn pose(&self) -> &Isometry { &self.pose }

    pub fn set_pose(&mut self, pose: Isometry) {
        self.pose = self.geometry.qr_unitary(&pose);
    }

    /// World-to-camera transform.
    pub fn view(&self) -> Isometry { self.geometry.transpose(&self.pose) }

    pub fn velocity(&self) -> Vec3<f64> { self.velocity }

    pub fn zoom(&self) -> f64 { self.zoom }

    pub fn rotation_lock(&self) -> bool { self.rotation_lock }

    pub fn is_slow(&self) -> bool { self.slow }

    /// Camera position in the model.
    pub fn position(&self) -> horo::Vec4<f64> { self.pose.col(3) }

    /// Advances the camera by `dt` seconds. Non-positive steps do nothing.
    pub fn step(&mut self, dt: f64, input: &impl InputSource) {
        if !(dt > 0.0) {
            return;
        }
        self.apply_switches(input);
        self.apply_rotation(dt, input);
        self.apply_acceleration(dt, input);
        self.apply_velocity(dt);
        if input.is_held(self.bindings.go_home) {
            // Blend towards the identity, then snap back onto the group.
            let pulled = self.pose + Isometry::identity() * dt;
            self.pose = self.geometry.svd_unitary(&pulled);
        }
        self.pose = self.geometry.qr_unitary(&self.pose);
        trace!(w = self.pose.get(3, 3), zoom = self.zoom, "camera stepped");
    }

    fn apply_switches(&mut self, input: &impl InputSource) {
        let b = &self.bindings;
        if input.pressed_this_step(b.toggle_rotation_lock) {
            self.rotation_lock = !self.rotation_lock;
        }
        if input.pressed_this_step(b.toggle_slow) {
            self.slow = !self.slow;
        }
        if input.is_held(b.zoom_in) {
            self.zoom *= self.config.zoom_factor;
        }
        if input.is_held(b.zoom_out) {
            self.zoom /= self.config.zoom_factor;
        }
    }

    fn apply_rotation(&mut self, dt: f64, input: &impl InputSource) {
        let look = input.mouse_delta() * (self.config.look_sensitivity * self.zoom);
        let mut roll = 0.0;
        if input.is_held(self.bindings.roll_clockwise) {
            roll -= 1.0;
        }
        if input.is_held(self.bindings.roll_counterclockwise) {
            roll += 1.0;
        }
        let turn = rotation(Vec3::x(), -look.y)
            * rotation(Vec3::y(), -look.x)
            * rotation(Vec3::z(), roll * self.config.roll_rate * dt);
        self.pose *= turn;
        // A pure rotation is inverted by its plain transpose.
        self.velocity = (turn.transpose() * self.velocity.extend(0.0)).truncate();
    }

    fn apply_acceleration(&mut self, dt: f64, input: &impl InputSource) {
        let b = &self.bindings;
        let axis = |neg, pos| -> f64 {
            let mut v = 0.0;
            if input.is_held(neg) {
                v -= 1.0;
            }
            if input.is_held(pos) {
                v += 1.0;
            }
            v
        };
        let mut goal = Vec3::new(axis(b.left, b.right), axis(b.down, b.up), axis(b.forward, b.backward));
        let norm = goal.norm();
        if norm > 1.0 {
            goal = goal / norm;
        }
        let (speed, accel) = if self.slow {
            (self.config.slow_speed, self.config.slow_acceleration)
        } else {
            (self.config.fast_speed, self.config.fast_acceleration)
        };
        goal = goal * speed;

        let max_change = accel * dt;
        let diff = goal - self.velocity;
        let dist = diff.norm();
        self.velocity = if dist < max_change { goal } else { self.velocity + diff * (max_change / dist) };
    }

    fn apply_velocity(&mut self, dt: f64) {
        let v = self.velocity * dt;
        if self.rotation_lock && self.geometry.is_hyperbolic() {
            // Slide along the horosphere so the ideal "up" point stays put.
            self.pose *= self.geometry.displacement(Vec3::new(0.0, 0.0, v.z));
            self.pose *= horo_rotation(v.x, v.y);
        } else {
            self.pose *= self.geometry.displacement(v);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::input::{keys, Button, UserInput};

    const DT: f64 = 1.0 / 60.0;

    fn camera(geometry: Geometry) -> GhostCamera {
        GhostCamera::new(geometry, CameraConfig::default(), BindingsConfig::default())
    }

    fn forward() -> UserInput {
        UserInput::new().with_held(Button::Mouse(keys::MOUSE_LEFT))
    }

    #[test]
    fn non_positive_dt_is_a_no_op() {
        let mut cam = camera(Geometry::Hyperbolic);
        cam.step(0.0, &forward().with_pressed(Button::Key(keys::LEFT_SHIFT)));
        cam.step(-1.0, &forward());
        cam.step(f64::NAN, &forward());
        assert_eq!(*cam.pose(), Isometry::identity());
        assert_eq!(cam.velocity(), Vec3::zero());
        assert!(!cam.is_slow());
    }

    #[test]
    fn acceleration_is_rate_limited() {
        let mut cam = camera(Geometry::Hyperbolic);
        cam.step(DT, &forward());
        let v = cam.velocity();
        assert!((v.z + 4.0 * DT).abs() < 1e-12, "{v:?}");
        for _ in 0..60 {
            cam.step(DT, &forward());
        }
        assert!((cam.velocity().z + 2.0).abs() < 1e-12, "{:?}", cam.velocity());
    }

    #[test]
    fn diagonal_goal_is_clamped_to_unit_speed() {
        let mut cam = camera(Geometry::Hyperbolic);
        let input = forward().with_held(Button::Key(keys::D)).with_held(Button::Key(keys::W));
        for _ in 0..120 {
            cam.step(DT, &input);
        }
        assert!((cam.velocity().norm() - 2.0).abs() < 1e-9);
    }

    #[test]
    fn toggles_are_edge_triggered() {
        let mut cam = camera(Geometry::Hyperbolic);
        let shift = UserInput::new().with_pressed(Button::Key(keys::LEFT_SHIFT));
        cam.step(DT, &shift);
        assert!(cam.is_slow());
        // Still held but not newly pressed.
        cam.step(DT, &UserInput::new().with_held(Button::Key(keys::LEFT_SHIFT)));
        assert!(cam.is_slow());
        cam.step(DT, &shift);
        assert!(!cam.is_slow());
    }

    #[test]
    fn zoom_scales_per_step() {
        let mut cam = camera(Geometry::Hyperbolic);
        let zoom_in = UserInput::new().with_held(Button::Key(keys::O));
        cam.step(DT, &zoom_in);
        cam.step(DT, &zoom_in);
        assert!((cam.zoom() - 0.964 * 0.964).abs() < 1e-12);
        cam.step(DT, &UserInput::new().with_held(Button::Key(keys::P)));
        assert!((cam.zoom() - 0.964).abs() < 1e-12);
    }

    #[test]
    fn flight_moves_along_the_view_axis() {
        for g in [Geometry::Hyperbolic, Geometry::Spherical] {
            let mut cam = camera(g);
            for _ in 0..60 {
                cam.step(DT, &forward());
            }
            let p = cam.position();
            assert!(p.z < -0.5, "{g:?}: {p:?}");
            assert!(p.x.abs() < 1e-9 && p.y.abs() < 1e-9, "{g:?}: {p:?}");
            assert!(g.is_isometry(cam.pose(), 1e-9), "{g:?}");
        }
    }

    #[test]
    fn turning_keeps_world_momentum() {
        let mut cam = camera(Geometry::Hyperbolic);
        for _ in 0..120 {
            cam.step(DT, &forward());
        }
        let before = cam.pose().mul_vec4(cam.velocity().extend(0.0));
        cam.step(1e-9, &UserInput::new().with_mouse_delta(300.0, 0.0));
        let after = cam.pose().mul_vec4(cam.velocity().extend(0.0));
        assert!((before - after).max_abs() < 1e-6, "{before:?} vs {after:?}");
    }

    #[test]
    fn rotation_lock_slides_on_horosphere() {
        let mut cam = camera(Geometry::Hyperbolic);
        cam.step(DT, &UserInput::new().with_pressed(Button::Key(keys::LEFT_CONTROL)));
        assert!(cam.rotation_lock());
        let up = UserInput::new().with_held(Button::Key(keys::W));
        for _ in 0..120 {
            cam.step(DT, &up);
        }
        // Parabolic motion keeps the ideal point (0,0,-1,1) fixed.
        let ideal = horo::Vec4::new(0.0, 0.0, -1.0, 1.0);
        let moved = cam.pose().mul_vec4(ideal);
        assert!((moved - ideal).max_abs() < 1e-9, "{moved:?}");
        assert!(cam.position().w > 1.5);
    }

    #[test]
    fn going_home_returns_to_origin() {
        for g in [Geometry::Hyperbolic, Geometry::Spherical] {
            let mut cam = camera(g);
            for _ in 0..40 {
                cam.step(DT, &forward().with_held(Button::Key(keys::D)));
            }
            // Coast to a stop so only the pull home moves the camera.
            for _ in 0..60 {
                cam.step(DT, &UserInput::new());
            }
            assert_eq!(cam.velocity(), Vec3::zero());
            let home = UserInput::new().with_held(Button::Key(keys::HOME));
            let start = g.distance(cam.position(), g.origin());
            let mut last = start;
            for _ in 0..600 {
                cam.step(DT, &home);
                let d = g.distance(cam.position(), g.origin());
                assert!(d <= last + 1e-9, "{g:?}: drifted away {last} -> {d}");
                last = d;
            }
            assert!(last < 0.2 * start, "{g:?}: {start} -> {last}");
            assert!(g.is_isometry(cam.pose(), 1e-9));
        }
    }

    #[test]
    fn view_inverts_pose() {
        let mut cam = camera(Geometry::Hyperbolic);
        for _ in 0..30 {
            cam.step(DT, &forward().with_mouse_delta(5.0, -3.0));
        }
        let product = cam.view() * *cam.pose();
        assert!(product.max_abs_diff(&Isometry::identity()) < 1e-9);
    }
}
