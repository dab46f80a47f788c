//! Per-run traversal state.
//!
//! A [`TraversalContext`] is created for one compilation and dropped with it.
//! It owns the inherited-attribute stacks, the models waiting for the next
//! flush and everything the world will be assembled from.

use crate::{
    appearance::AttributeStack,
    data_structures::{
        handle::{LightHandle, MaterialId, TransferFunctionHandle},
        instance::Instance,
        model::{GeometricModel, Group, VolumetricModel},
        transform::{self, Affine},
        world::World,
    },
    error::{CompileError, CompileResult},
};

/// Counters collected while walking, reported alongside the world.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct TraversalStats {
    pub nodes_visited: usize,
    pub geometries: usize,
    pub volumes: usize,
    pub instances: usize,
    pub lights: usize,
    /// Transform entries that found nothing pending and skipped the flush.
    pub skipped_flushes: usize,
    pub max_depth: usize,
}

impl TraversalStats {
    pub fn models(&self) -> usize {
        self.geometries + self.volumes
    }
}

/// Models collected since the last flush.
#[derive(Debug, Default)]
struct Pending {
    geometries: Vec<GeometricModel>,
    volumes: Vec<VolumetricModel>,
}

#[derive(Debug)]
pub struct TraversalContext {
    transforms: AttributeStack<Affine>,
    pub(crate) materials: AttributeStack<MaterialId>,
    pub(crate) tfns: AttributeStack<TransferFunctionHandle>,
    pending: Pending,
    instances: Vec<Instance>,
    lights: Vec<LightHandle>,
    world: Option<World>,
    pub(crate) stats: TraversalStats,
}

impl TraversalContext {
    pub fn new() -> Self {
        Self {
            transforms: AttributeStack::with_root("transform", transform::identity()),
            materials: AttributeStack::new("material"),
            tfns: AttributeStack::new("transfer function"),
            pending: Pending::default(),
            instances: Vec::new(),
            lights: Vec::new(),
            world: None,
            stats: TraversalStats::default(),
        }
    }

    /// Cumulative transform of the current scope.
    pub fn current_transform(&self) -> Affine {
        // the root entry is never popped
        self.transforms
            .peek()
            .copied()
            .unwrap_or_else(transform::identity)
    }

    pub fn transform_depth(&self) -> usize {
        self.transforms.depth()
    }

    pub fn push_transform(&mut self, local: Affine) {
        let cumulative = self.current_transform() * local;
        self.transforms.push(cumulative);
    }

    pub fn pop_transform(&mut self) -> CompileResult<Affine> {
        if self.transforms.depth() <= 1 {
            return Err(CompileError::StackUnderflow {
                stack: self.transforms.name(),
            });
        }
        self.transforms.pop()
    }

    pub fn add_geometry(&mut self, model: GeometricModel) {
        self.stats.geometries += 1;
        self.pending.geometries.push(model);
    }

    pub fn add_volume(&mut self, model: VolumetricModel) {
        self.stats.volumes += 1;
        self.pending.volumes.push(model);
    }

    pub fn pending_geometries(&self) -> usize {
        self.pending.geometries.len()
    }

    pub fn pending_volumes(&self) -> usize {
        self.pending.volumes.len()
    }

    /// Whether anything arrived since the last flush.
    pub fn has_pending(&self) -> bool {
        self.pending_geometries() + self.pending_volumes() > 0
    }

    /**
     * Bundles everything pending into one instance at the current transform.
     *
     * Both buffers are drained together, so no model can end up in two
     * instances. Nothing pending means nothing happens; returns whether an
     * instance was appended.
     */
    pub fn flush(&mut self) -> bool {
        log::debug!(
            "flushing {} geometries and {} volumes",
            self.pending.geometries.len(),
            self.pending.volumes.len()
        );
        let Some(group) = Group::take_from(&mut self.pending.geometries, &mut self.pending.volumes)
        else {
            return false;
        };
        let id = self.instances.len() as u32;
        self.instances
            .push(Instance::new(id, group, self.current_transform()));
        self.stats.instances += 1;
        log::debug!("number of instances: {}", self.instances.len());
        true
    }

    pub fn instances(&self) -> &[Instance] {
        &self.instances
    }

    /// Lights seen so far; duplicates are dropped.
    pub fn add_light(&mut self, light: LightHandle) {
        if self.lights.contains(&light) {
            log::debug!("light {:?} already in the light set", light);
            return;
        }
        self.lights.push(light);
        self.stats.lights += 1;
        if let Some(world) = self.world.as_mut() {
            world.add_light(light);
        }
    }

    pub fn open_world(&mut self, name: &str) -> CompileResult<()> {
        if let Some(open) = &self.world {
            return Err(CompileError::malformed(format!(
                "world '{}' opened inside world '{}'",
                name,
                open.name()
            )));
        }
        let mut world = World::new(name);
        // lights that showed up before the world still belong to it
        for light in &self.lights {
            world.add_light(*light);
        }
        self.world = Some(world);
        Ok(())
    }

    pub fn has_world(&self) -> bool {
        self.world.is_some()
    }

    /// Commits the open world, if any. Returns whether a world was committed.
    pub fn commit_world(&mut self) -> bool {
        match self.world.as_mut() {
            Some(world) => {
                world.commit();
                true
            }
            None => false,
        }
    }

    /**
     * Final flush, attaches instances and lights and commits.
     *
     * Hands the world out; the context keeps nothing that points into it.
     */
    pub fn finish_world(&mut self) -> CompileResult<World> {
        self.flush();
        let mut world = self
            .world
            .take()
            .ok_or_else(|| CompileError::malformed("world closed without being opened"))?;
        world.set_instances(std::mem::take(&mut self.instances));
        world.commit();
        Ok(world)
    }
}

impl Default for TraversalContext {
    fn default() -> Self {
        Self::new()
    }
}
