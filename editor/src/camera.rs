#[cfg(test)]
#[path = "camera_test.rs"]
mod camera_test;

use glam::DVec3;

use crate::consts::{DEFAULT_EYE, FAR, FOV_Y_DEG, MIN_ORBIT_DISTANCE, NEAR};

/// A point in either screen or world space.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    #[must_use]
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

// =============================================================================
// 2D
// =============================================================================

/// Pan/zoom state of the top-down 2D canvas.
///
/// `pan_x` / `pan_y` are in CSS pixels.
/// `zoom` is a scale factor (1.0 = no zoom).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Camera {
    pub pan_x: f64,
    pub pan_y: f64,
    pub zoom: f64,
}

impl Default for Camera {
    fn default() -> Self {
        Self { pan_x: 0.0, pan_y: 0.0, zoom: 1.0 }
    }
}

impl Camera {
    /// Convert a screen-space point (CSS pixels) to world coordinates.
    #[must_use]
    pub fn screen_to_world(&self, screen: Point) -> Point {
        Point { x: (screen.x - self.pan_x) / self.zoom, y: (screen.y - self.pan_y) / self.zoom }
    }

    /// Convert a world-space point to screen coordinates (CSS pixels).
    #[must_use]
    pub fn world_to_screen(&self, world: Point) -> Point {
        Point { x: world.x * self.zoom + self.pan_x, y: world.y * self.zoom + self.pan_y }
    }

    /// Shift the view by a screen-space delta.
    pub fn pan_by(&mut self, dx: f64, dy: f64) {
        self.pan_x += dx;
        self.pan_y += dy;
    }

    /// Multiply the zoom by `factor`, clamped to `[min, max]`, keeping the
    /// world point under `screen` fixed on screen.
    pub fn zoom_at(&mut self, screen: Point, factor: f64, min: f64, max: f64) {
        let next = (self.zoom * factor).clamp(min, max);
        let ratio = next / self.zoom;
        self.pan_x = screen.x - (screen.x - self.pan_x) * ratio;
        self.pan_y = screen.y - (screen.y - self.pan_y) * ratio;
        self.zoom = next;
    }
}

// =============================================================================
// 3D
// =============================================================================

/// A half-line in world space. `dir` is unit length.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Ray {
    pub origin: DVec3,
    pub dir: DVec3,
}

impl Ray {
    /// The point `t` units along the ray.
    #[must_use]
    pub fn at(&self, t: f64) -> DVec3 {
        self.origin + self.dir * t
    }
}

/// Perspective camera with a Y-up world.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PerspectiveCamera {
    pub eye: DVec3,
    pub target: DVec3,
    pub up: DVec3,
    /// Vertical field of view in degrees.
    pub fov_y_deg: f64,
    pub near: f64,
    pub far: f64,
}

impl Default for PerspectiveCamera {
    fn default() -> Self {
        OrbitCamera::default().perspective()
    }
}

impl PerspectiveCamera {
    /// Ray from the eye through a point in normalized device coordinates
    /// (`x` right, `y` up, both in `[-1, 1]`). `None` if the view basis is
    /// degenerate (eye on the target, or looking straight along `up`).
    #[must_use]
    pub fn ray_from_ndc(&self, ndc_x: f64, ndc_y: f64, aspect: f64) -> Option<Ray> {
        let forward = (self.target - self.eye).try_normalize()?;
        let right = forward.cross(self.up).try_normalize()?;
        let cam_up = right.cross(forward);
        let tan_half = (self.fov_y_deg.to_radians() * 0.5).tan();
        let dir = (forward + right * (ndc_x * tan_half * aspect) + cam_up * (ndc_y * tan_half)).try_normalize()?;
        Some(Ray { origin: self.eye, dir })
    }
}

/// Map a screen point (CSS pixels, origin top-left) to normalized device
/// coordinates for a viewport of `width` x `height`.
#[must_use]
pub fn screen_to_ndc(screen: Point, width: f64, height: f64) -> Point {
    Point::new(screen.x / width * 2.0 - 1.0, -(screen.y / height) * 2.0 + 1.0)
}

/// Spherical orbit around a target point. `polar` is measured from +Y and
/// kept within `(0, π/2]` so the eye never drops below the ground plane.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OrbitCamera {
    pub target: DVec3,
    pub distance: f64,
    pub azimuth: f64,
    pub polar: f64,
}

const MIN_POLAR: f64 = 1e-3;

impl Default for OrbitCamera {
    fn default() -> Self {
        Self::looking_at(DVec3::from_array(DEFAULT_EYE), DVec3::ZERO)
    }
}

impl OrbitCamera {
    /// Orbit state that places the eye at `eye` looking at `target`.
    #[must_use]
    pub fn looking_at(eye: DVec3, target: DVec3) -> Self {
        let offset = eye - target;
        let distance = offset.length().max(MIN_ORBIT_DISTANCE);
        let polar = (offset.y / distance).clamp(-1.0, 1.0).acos().clamp(MIN_POLAR, std::f64::consts::FRAC_PI_2);
        let azimuth = offset.x.atan2(offset.z);
        Self { target, distance, azimuth, polar }
    }

    #[must_use]
    pub fn eye(&self) -> DVec3 {
        let (sin_p, cos_p) = self.polar.sin_cos();
        let (sin_a, cos_a) = self.azimuth.sin_cos();
        self.target + DVec3::new(sin_p * sin_a, cos_p, sin_p * cos_a) * self.distance
    }

    /// Rotate around the target.
    pub fn orbit(&mut self, d_azimuth: f64, d_polar: f64) {
        self.azimuth += d_azimuth;
        self.polar = (self.polar + d_polar).clamp(MIN_POLAR, std::f64::consts::FRAC_PI_2);
    }

    /// Scale the distance to the target; `factor < 1` moves closer.
    pub fn dolly(&mut self, factor: f64) {
        self.distance = (self.distance * factor).max(MIN_ORBIT_DISTANCE);
    }

    #[must_use]
    pub fn perspective(&self) -> PerspectiveCamera {
        let eye = self.eye();
        PerspectiveCamera { eye, target: self.target, up: DVec3::Y, fov_y_deg: FOV_Y_DEG, near: NEAR, far: FAR }
    }
}
