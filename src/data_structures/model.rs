//! Renderer-side models and the groups that bundle them.
//!
//! A model pairs a geometry or volume with the appearance resolved for it
//! during compilation. Models are collected per transform scope and bundled
//! into a [`Group`] when the scope is flushed.

use crate::data_structures::handle::{GeometryHandle, MaterialId, TransferFunctionHandle, VolumeHandle};

/// Material assignment of a geometric model.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum MaterialBinding {
    /// One material for every primitive.
    Single(MaterialId),
    /// Material list handed to the renderer as is; only ever set through an
    /// explicit override.
    PerPrimitive(Vec<MaterialId>),
}

impl From<MaterialId> for MaterialBinding {
    fn from(id: MaterialId) -> Self {
        MaterialBinding::Single(id)
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GeometricModel {
    pub geometry: GeometryHandle,
    pub material: MaterialBinding,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct VolumetricModel {
    pub volume: VolumeHandle,
    pub transfer_function: TransferFunctionHandle,
}

/// Models sharing one transform scope.
///
/// Never empty: a flush with nothing pending does not produce a group.
#[derive(Clone, Debug, PartialEq, Eq, Default)]
pub struct Group {
    geometries: Vec<GeometricModel>,
    volumes: Vec<VolumetricModel>,
}

impl Group {
    /// Moves the pending models into a new group, leaving both buffers empty.
    ///
    /// Returns `None` (and touches nothing) when both buffers are empty.
    pub fn take_from(
        geometries: &mut Vec<GeometricModel>,
        volumes: &mut Vec<VolumetricModel>,
    ) -> Option<Self> {
        if geometries.is_empty() && volumes.is_empty() {
            return None;
        }
        Some(Self {
            geometries: std::mem::take(geometries),
            volumes: std::mem::take(volumes),
        })
    }

    pub fn geometries(&self) -> &[GeometricModel] {
        &self.geometries
    }

    pub fn volumes(&self) -> &[VolumetricModel] {
        &self.volumes
    }

    pub fn has_geometry(&self) -> bool {
        !self.geometries.is_empty()
    }

    pub fn has_volume(&self) -> bool {
        !self.volumes.is_empty()
    }

    pub fn len(&self) -> usize {
        self.geometries.len() + self.volumes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
