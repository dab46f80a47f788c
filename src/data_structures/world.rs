//! The committed output of a compilation.

use crate::data_structures::{
    handle::LightHandle,
    instance::{Instance, InstanceRaw},
};

/// All instances and lights of one traversal.
///
/// The compiler hands the world out only after its final commit, so callers
/// never see one that is still being assembled.
#[derive(Clone, Debug, PartialEq, Default)]
pub struct World {
    name: String,
    instances: Vec<Instance>,
    lights: Vec<LightHandle>,
    commits: u32,
}

impl World {
    pub(crate) fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Default::default()
        }
    }

    pub(crate) fn set_instances(&mut self, instances: Vec<Instance>) {
        self.instances = instances;
    }

    /// Lights form a set: adding one twice keeps the first position.
    pub(crate) fn add_light(&mut self, light: LightHandle) -> bool {
        if self.lights.contains(&light) {
            return false;
        }
        self.lights.push(light);
        true
    }

    /// Repeated commits leave the content untouched.
    pub(crate) fn commit(&mut self) {
        self.commits += 1;
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn instances(&self) -> &[Instance] {
        &self.instances
    }

    pub fn lights(&self) -> &[LightHandle] {
        &self.lights
    }

    pub fn commit_count(&self) -> u32 {
        self.commits
    }

    pub fn is_committed(&self) -> bool {
        self.commits > 0
    }

    /// Geometric and volumetric models over all instances.
    pub fn model_count(&self) -> usize {
        self.instances.iter().map(|inst| inst.group().len()).sum()
    }

    pub fn to_raw_instances(&self) -> Vec<InstanceRaw> {
        self.instances.iter().map(Instance::to_raw).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lights_are_deduplicated() {
        let mut world = World::new("w");
        assert!(world.add_light(LightHandle(1)));
        assert!(world.add_light(LightHandle(2)));
        assert!(!world.add_light(LightHandle(1)));
        assert_eq!(world.lights(), &[LightHandle(1), LightHandle(2)]);
    }

    #[test]
    fn commit_is_idempotent_for_content() {
        let mut world = World::new("w");
        world.add_light(LightHandle(1));
        world.commit();
        let snapshot = world.lights().to_vec();
        world.commit();
        assert_eq!(world.commit_count(), 2);
        assert_eq!(world.lights(), snapshot.as_slice());
        assert!(world.is_committed());
    }
}
