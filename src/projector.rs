//! Projection of the floor offset into a camera-relative anchor point.
//!
//! No depth is recovered from the image. The anchor sits `depth_scale` units
//! along the camera's forward direction in the horizontal plane, and its
//! height is the projection-space offset of the floor estimate:
//!
//! ```text
//! anchor = (forward.x * depth_scale, y_proj, forward.z * depth_scale)
//! ```
//!
//! The forward direction is owned by the host; [`CameraPose`] is the seam
//! through which it is supplied.
use nalgebra::{UnitQuaternion, Vector3};
use serde::{Deserialize, Serialize};

const MIN_FORWARD_NORM: f32 = 1e-6;

/// Projection constants.
#[derive(Clone, Copy, Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct ProjectionParams {
    /// Distance in front of the camera at which the anchor is placed.
    pub depth_scale: f32,
    /// Scale applied to the normalised floor row (`y_proj = -y_norm * gain`).
    pub vertical_gain: f32,
}

impl Default for ProjectionParams {
    fn default() -> Self {
        Self {
            depth_scale: 2.0,
            vertical_gain: 0.5,
        }
    }
}

impl ProjectionParams {
    pub fn validate(&self) -> Result<(), String> {
        if !(self.depth_scale > 0.0 && self.depth_scale.is_finite()) {
            return Err(format!("depth_scale must be > 0, got {}", self.depth_scale));
        }
        if !(self.vertical_gain > 0.0 && self.vertical_gain.is_finite()) {
            return Err(format!("vertical_gain must be > 0, got {}", self.vertical_gain));
        }
        Ok(())
    }
}

/// 3D placement point relative to the viewer.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct AnchorPoint {
    pub x: f32,
    pub y: f32,
    pub z: f32,
}

impl AnchorPoint {
    /// `x,y,z` without spaces.
    pub fn to_csv(&self) -> String {
        format!("{},{},{}", self.x, self.y, self.z)
    }
}

/// Source of the camera forward direction at projection time.
pub trait CameraPose {
    /// Forward direction in the anchor's coordinate frame, or `None` when the
    /// pose is not available yet.
    fn forward(&self) -> Option<Vector3<f32>>;
}

impl CameraPose for Vector3<f32> {
    fn forward(&self) -> Option<Vector3<f32>> {
        Some(*self)
    }
}

/// Camera orientation; the camera looks down its local `-Z` axis.
impl CameraPose for UnitQuaternion<f32> {
    fn forward(&self) -> Option<Vector3<f32>> {
        Some(self * -Vector3::<f32>::z())
    }
}

impl<T: CameraPose> CameraPose for Option<T> {
    fn forward(&self) -> Option<Vector3<f32>> {
        self.as_ref().and_then(CameraPose::forward)
    }
}

impl<T: CameraPose + ?Sized> CameraPose for &T {
    fn forward(&self) -> Option<Vector3<f32>> {
        (**self).forward()
    }
}

/// Places anchors a fixed distance in front of the camera.
#[derive(Clone, Copy, Debug)]
pub struct Projector {
    depth_scale: f32,
}

impl Projector {
    pub fn new(depth_scale: f32) -> Self {
        Self { depth_scale }
    }

    /// Project with an explicit forward vector (assumed unit length).
    pub fn project(&self, y_proj: f32, forward: &Vector3<f32>) -> AnchorPoint {
        AnchorPoint {
            x: forward.x * self.depth_scale,
            y: y_proj,
            z: forward.z * self.depth_scale,
        }
    }

    /// Query `pose`, normalise its forward vector and project.
    ///
    /// `None` when the pose is unavailable or its forward vector is not finite
    /// or has (near) zero length.
    pub fn project_with_pose(&self, y_proj: f32, pose: &impl CameraPose) -> Option<AnchorPoint> {
        let forward = pose.forward()?;
        if !forward.iter().all(|v| v.is_finite()) {
            return None;
        }
        let unit = forward.try_normalize(MIN_FORWARD_NORM)?;
        Some(self.project(y_proj, &unit))
    }
}

impl From<&ProjectionParams> for Projector {
    fn from(params: &ProjectionParams) -> Self {
        Projector::new(params.depth_scale)
    }
}
