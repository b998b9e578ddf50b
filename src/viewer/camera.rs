//! Orbit camera framing the soccer ball
//!
//! Spherical-coordinate camera around the origin. The field of view is chosen
//! so the whole ball, plus margins, fits the viewport at the start distance.

use glam::{Mat4, Vec3};

use crate::settings::CameraSettings;

/// Below this distance rotation slows down for finer control
const SLOW_ROTATE_DISTANCE: f32 = 5.0;

/// Height of the frame that holds the ball with margin and padding on both sides
pub fn full_height(settings: &CameraSettings) -> f32 {
    let border = settings.margin_percentage + settings.padding_percentage;
    settings.ball_diameter / (1.0 - border / 50.0)
}

/// Vertical field of view in degrees that fits `height` at `distance`
///
/// Portrait viewports widen the frame so the ball also fits horizontally.
pub fn fit_fov_degrees(height: f32, aspect: f32, distance: f32) -> f32 {
    let mut half = height / 2.0;
    if aspect < 1.0 {
        half /= aspect;
    }
    let hypotenuse = (half * half + distance * distance).sqrt();
    (half / hypotenuse).asin().to_degrees() * 2.0
}

/// Rotate speed for a camera distance
pub fn rotate_speed_for_distance(distance: f32, default_speed: f32) -> f32 {
    if distance < SLOW_ROTATE_DISTANCE {
        (distance - 2.0) / 3.0 + 0.5
    } else {
        default_speed
    }
}

/// Camera orbiting the ball
pub struct ViewerCamera {
    settings: CameraSettings,
    /// Horizontal angle (yaw) in radians
    yaw: f32,
    /// Vertical angle (pitch) in radians
    pitch: f32,
    distance: f32,
    /// Aspect ratio (width/height) for projection
    aspect: f32,
    /// Vertical field of view in degrees
    fov: f32,
    rotate_speed: f32,
}

impl ViewerCamera {
    pub fn new(settings: &CameraSettings, aspect: f32) -> Self {
        let mut camera = Self {
            settings: settings.clone(),
            yaw: 0.0,
            pitch: 0.0,
            distance: settings.start_distance,
            aspect,
            fov: 0.0,
            rotate_speed: settings.rotate_speed,
        };
        camera.set_aspect(aspect);
        camera.update();
        camera
    }

    /// Update aspect ratio and refit the field of view
    pub fn set_aspect(&mut self, aspect: f32) {
        if !aspect.is_finite() || aspect <= 0.0 {
            tracing::warn!("Ignoring invalid aspect ratio {}", aspect);
            return;
        }
        self.aspect = aspect;
        let height = full_height(&self.settings);
        self.fov = fit_fov_degrees(height, aspect, self.settings.start_distance);
    }

    /// Viewport resize in pixels
    pub fn resize(&mut self, width: u32, height: u32) {
        if width == 0 || height == 0 {
            return;
        }
        self.set_aspect(width as f32 / height as f32);
    }

    /// Per-frame tick
    pub fn update(&mut self) {
        self.rotate_speed = rotate_speed_for_distance(self.distance, self.settings.rotate_speed);
    }

    pub fn view_matrix(&self) -> Mat4 {
        Mat4::look_at_rh(self.eye_position(), Vec3::ZERO, Vec3::Y)
    }

    pub fn projection_matrix(&self) -> Mat4 {
        Mat4::perspective_rh(
            self.fov.to_radians(),
            self.aspect,
            self.settings.near_plane,
            self.settings.far_plane,
        )
    }

    pub fn view_projection_matrix(&self) -> Mat4 {
        self.projection_matrix() * self.view_matrix()
    }

    pub fn eye_position(&self) -> Vec3 {
        let x = self.distance * self.pitch.cos() * self.yaw.sin();
        let y = self.distance * self.pitch.sin();
        let z = self.distance * self.pitch.cos() * self.yaw.cos();
        Vec3::new(x, y, z)
    }

    /// Handle mouse drag for orbit, `delta` in radians before speed scaling
    pub fn on_mouse_drag(&mut self, delta: (f32, f32)) {
        self.yaw -= delta.0 * self.rotate_speed;
        // Clamp pitch to avoid flipping over the poles (~80 degrees)
        self.pitch = (self.pitch + delta.1 * self.rotate_speed).clamp(-1.4, 1.4);
    }

    /// Handle scroll for zoom
    pub fn on_scroll(&mut self, delta: f32) {
        self.distance = (self.distance * (1.0 - delta * 0.1 * self.settings.zoom_speed))
            .clamp(self.settings.min_distance, self.settings.max_distance);
    }

    pub fn distance(&self) -> f32 {
        self.distance
    }

    pub fn fov(&self) -> f32 {
        self.fov
    }

    pub fn aspect(&self) -> f32 {
        self.aspect
    }

    pub fn rotate_speed(&self) -> f32 {
        self.rotate_speed
    }

    /// Reset camera to the start position
    pub fn reset(&mut self) {
        self.yaw = 0.0;
        self.pitch = 0.0;
        self.distance = self.settings.start_distance;
        self.update();
    }
}
