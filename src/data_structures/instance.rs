//! Instances produced by a flush.
//!
//! An instance stamps a [`Group`] with the cumulative transform that was in
//! effect when the group was flushed. For upload, [`Instance::to_raw`] packs
//! the transform the way the vertex shaders expect it.

use cgmath::{Matrix, SquareMatrix};

use crate::data_structures::{model::Group, transform::Affine};

#[derive(Clone, Debug, PartialEq)]
pub struct Instance {
    id: u32,
    group: Group,
    transform: Affine,
}

impl Instance {
    pub(crate) fn new(id: u32, group: Group, transform: Affine) -> Self {
        Self {
            id,
            group,
            transform,
        }
    }

    /// Position of this instance in the world's instance list.
    pub fn id(&self) -> u32 {
        self.id
    }

    pub fn group(&self) -> &Group {
        &self.group
    }

    pub fn transform(&self) -> &Affine {
        &self.transform
    }

    /// Normals are transformed by the inverse transpose of the linear part.
    /// Singular transforms fall back to the linear part itself.
    pub fn normal_matrix(&self) -> cgmath::Matrix3<f32> {
        let linear = cgmath::Matrix3::from_cols(
            self.transform.x.truncate(),
            self.transform.y.truncate(),
            self.transform.z.truncate(),
        );
        linear
            .invert()
            .map(|inverse| inverse.transpose())
            .unwrap_or(linear)
    }

    pub fn to_raw(&self) -> InstanceRaw {
        let det = self.transform.determinant();
        InstanceRaw {
            model: self.transform.into(),
            normal: self.normal_matrix().into(),
            handedness: det.signum(),
        }
    }
}

/// Flat, `Pod` form of an instance for upload into an instance buffer:
/// model matrix, normal matrix and the sign of the determinant.
#[repr(C)]
#[derive(Debug, Copy, Clone, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct InstanceRaw {
    pub model: [[f32; 4]; 4],
    pub normal: [[f32; 3]; 3],
    pub handedness: f32,
}
