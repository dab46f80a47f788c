//! Transform payloads.
//!
//! Transform nodes carry a full affine matrix. [`Pose`] is the usual way of
//! building one: a translation, rotation and non-uniform scale that is baked
//! into a matrix before it is stored on the node.

use cgmath::{One, Quaternion, SquareMatrix, Vector3, Zero};

/// Affine 3D transform stored as a column-major 4x4 matrix.
pub type Affine = cgmath::Matrix4<f32>;

pub fn identity() -> Affine {
    Affine::identity()
}

/// Position, rotation (as quaternion) and scale of a transform node.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Pose {
    pub position: Vector3<f32>,
    pub rotation: Quaternion<f32>,
    pub scale: Vector3<f32>,
}

impl Pose {
    pub fn identity() -> Self {
        Pose {
            position: Vector3::zero(),
            rotation: Quaternion::one(),
            scale: Vector3::new(1.0, 1.0, 1.0),
        }
    }

    pub fn at(x: f32, y: f32, z: f32) -> Self {
        Vector3::new(x, y, z).into()
    }

    pub fn with_rotation(mut self, rotation: Quaternion<f32>) -> Self {
        self.rotation = rotation;
        self
    }

    pub fn with_scale(mut self, x: f32, y: f32, z: f32) -> Self {
        self.scale = Vector3::new(x, y, z);
        self
    }

    /// Scales first, then rotates, then moves.
    pub fn to_matrix(&self) -> Affine {
        let Vector3 { x, y, z } = self.scale;
        Affine::from_translation(self.position)
            * Affine::from(self.rotation)
            * Affine::from_nonuniform_scale(x, y, z)
    }
}

impl From<Vector3<f32>> for Pose {
    fn from(position: Vector3<f32>) -> Self {
        Pose {
            position,
            ..Pose::identity()
        }
    }
}

impl From<Pose> for Affine {
    fn from(pose: Pose) -> Self {
        pose.to_matrix()
    }
}

impl Default for Pose {
    fn default() -> Self {
        Pose::identity()
    }
}

#[cfg(test)]
mod tests {
    use cgmath::{Deg, Rotation3, Vector4};

    use super::*;

    #[test]
    fn default_pose_is_identity() {
        assert_eq!(Pose::default().to_matrix(), identity());
    }

    #[test]
    fn translation_lands_in_last_column() {
        let m = Pose::at(1.0, 2.0, 3.0).to_matrix();
        assert_eq!(m.w, Vector4::new(1.0, 2.0, 3.0, 1.0));
    }

    #[test]
    fn scale_applies_before_translation() {
        let pose = Pose::at(1.0, 0.0, 0.0).with_scale(2.0, 2.0, 2.0);
        let p = pose.to_matrix() * Vector4::new(1.0, 1.0, 1.0, 1.0);
        assert_eq!(p, Vector4::new(3.0, 2.0, 2.0, 1.0));
    }

    #[test]
    fn rotation_applies_before_translation() {
        let pose = Pose::at(0.0, 0.0, 5.0).with_rotation(Quaternion::from_angle_z(Deg(90.0)));
        let p = pose.to_matrix() * Vector4::new(1.0, 0.0, 0.0, 1.0);
        assert!((p.x - 0.0).abs() < 1e-6);
        assert!((p.y - 1.0).abs() < 1e-6);
        assert_eq!(p.z, 5.0);
    }
}
