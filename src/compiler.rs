//! Scene graph to render instances.
//!
//! [`SceneCompiler`] is the visitor that turns a walk over the scene tree into
//! a committed [`World`]. Every node kind has an enter action and an exit
//! action; together they keep the transform and appearance stacks balanced,
//! cut instance boundaries at transform scopes and assemble the world when
//! the world node closes.
//!
//! | kind               | enter                                   | exit                  |
//! |--------------------|-----------------------------------------|-----------------------|
//! | world              | open the world                          | flush, assemble, commit |
//! | material reference | push material                           | (optionally pop)      |
//! | geometry           | resolve material, queue model, no descent | -                   |
//! | volume             | resolve transfer function, queue model, no descent | -          |
//! | transfer function  | push transfer function                  | pop                   |
//! | transform          | flush if geometry is queued, push       | flush, pop            |
//! | light              | add to light set                        | re-commit world       |

use crate::{
    appearance::{resolve_material, resolve_transfer_function},
    config::CompileConfig,
    context::{TraversalContext, TraversalStats},
    data_structures::{
        handle::{GeometryHandle, LightHandle, MaterialId, TransferFunctionHandle, VolumeHandle},
        model::{GeometricModel, VolumetricModel},
        node::{Node, NodeKind},
        transform::Affine,
        world::World,
    },
    error::{CompileError, CompileResult},
    traverse::{Visitor, traverse},
};

/// Result of a successful compilation.
#[derive(Clone, Debug)]
pub struct CompiledScene {
    pub world: World,
    pub stats: TraversalStats,
}

/// Compiles the tree below `root` into a committed world.
pub fn compile(root: &Node, config: &CompileConfig) -> CompileResult<CompiledScene> {
    let mut compiler = SceneCompiler::new(config.clone());
    traverse(root, &mut compiler, config.max_depth)?;
    compiler.finish()
}

/// Single-use: build one per compilation.
#[derive(Debug)]
pub struct SceneCompiler {
    config: CompileConfig,
    ctx: TraversalContext,
    depth: usize,
    /// Nodes entered after the world closed whose exit is still due.
    ignored: usize,
    world: Option<World>,
}

impl SceneCompiler {
    pub fn new(config: CompileConfig) -> Self {
        Self {
            config,
            ctx: TraversalContext::new(),
            depth: 0,
            ignored: 0,
            world: None,
        }
    }

    pub fn context(&self) -> &TraversalContext {
        &self.ctx
    }

    pub fn transform_depth(&self) -> usize {
        self.ctx.transform_depth()
    }

    /// Whether the world node has closed; everything after that is ignored.
    pub fn is_done(&self) -> bool {
        self.world.is_some()
    }

    pub fn stats(&self) -> &TraversalStats {
        &self.ctx.stats
    }

    /// Hands out the committed world.
    ///
    /// Fails when the walk stopped with transform scopes still open, e.g.
    /// when driving [`Visitor`] by hand and finishing before the ancestors
    /// of the world have exited.
    pub fn finish(self) -> CompileResult<CompiledScene> {
        let world = self.world.ok_or(CompileError::MissingWorld)?;
        let open = self.ctx.transform_depth().saturating_sub(1);
        if open > 0 {
            return Err(CompileError::malformed(format!(
                "finished with {open} transform scope(s) still open"
            )));
        }
        Ok(CompiledScene {
            world,
            stats: self.ctx.stats,
        })
    }

    fn create_geometry(&mut self, node: &Node) -> CompileResult<()> {
        let geometry = node.value_as::<GeometryHandle>()?;
        let material = resolve_material(node, &self.ctx.materials)?;
        log::trace!("geometry '{}' -> {:?}", node.name(), material);
        self.ctx.add_geometry(GeometricModel { geometry, material });
        Ok(())
    }

    fn create_volume(&mut self, node: &Node) -> CompileResult<()> {
        let volume = node.value_as::<VolumeHandle>()?;
        let transfer_function = resolve_transfer_function(node, &self.ctx.tfns)?;
        self.ctx.add_volume(VolumetricModel {
            volume,
            transfer_function,
        });
        Ok(())
    }

    fn enter_transform(&mut self, node: &Node) -> CompileResult<()> {
        let local = node.value_as::<Affine>()?;
        // only new geometry opens an instance boundary; queued volumes
        // follow into the nested scope unless configured otherwise
        let cut = if self.config.cut_volumes_at_transforms {
            self.ctx.has_pending()
        } else {
            self.ctx.pending_geometries() > 0
        };
        if cut {
            self.ctx.flush();
        } else {
            self.ctx.stats.skipped_flushes += 1;
        }
        self.ctx.push_transform(local);
        Ok(())
    }

    fn close_scope(&mut self, node: &Node) -> CompileResult<()> {
        match node.kind() {
            NodeKind::Transform => {
                self.ctx.pop_transform()?;
            }
            NodeKind::TransferFunction => {
                self.ctx.tfns.pop()?;
            }
            NodeKind::MaterialReference if self.config.pop_material_on_exit => {
                self.ctx.materials.pop()?;
            }
            _ => {}
        }
        Ok(())
    }

    fn close_world(&mut self, node: &Node) -> CompileResult<()> {
        let world = self.ctx.finish_world()?;
        if world.instances().is_empty() && self.config.warn_on_empty_world {
            log::warn!("world '{}' was committed without any instance", node.name());
        }
        log::info!(
            "committed world '{}': {} instances, {} models, {} lights",
            world.name(),
            world.instances().len(),
            world.model_count(),
            world.lights().len()
        );
        self.world = Some(world);
        Ok(())
    }
}

impl Visitor for SceneCompiler {
    fn enter(&mut self, node: &Node) -> CompileResult<bool> {
        if self.is_done() {
            log::warn!(
                "ignoring {} '{}' after the world was committed",
                node.kind(),
                node.name()
            );
            self.ignored += 1;
            return Ok(false);
        }
        self.depth += 1;
        self.ctx.stats.nodes_visited += 1;
        self.ctx.stats.max_depth = self.ctx.stats.max_depth.max(self.depth);
        log::trace!("enter {} '{}'", node.kind(), node.name());

        let descend = match node.kind() {
            NodeKind::World => {
                self.ctx.open_world(node.name())?;
                true
            }
            NodeKind::MaterialReference => {
                self.ctx.materials.push(node.value_as::<MaterialId>()?);
                true
            }
            NodeKind::Geometry => {
                self.create_geometry(node)?;
                false
            }
            NodeKind::Volume => {
                self.create_volume(node)?;
                false
            }
            NodeKind::TransferFunction => {
                self.ctx
                    .tfns
                    .push(node.value_as::<TransferFunctionHandle>()?);
                true
            }
            NodeKind::Transform => {
                self.enter_transform(node)?;
                true
            }
            NodeKind::Light => {
                if !self.ctx.has_world() {
                    log::warn!("light '{}' appears outside of a world", node.name());
                }
                self.ctx.add_light(node.value_as::<LightHandle>()?);
                true
            }
            NodeKind::Other => true,
        };
        Ok(descend)
    }

    fn exit(&mut self, node: &Node) -> CompileResult<()> {
        if self.ignored > 0 {
            self.ignored -= 1;
            return Ok(());
        }
        self.depth = self.depth.saturating_sub(1);
        log::trace!("exit {} '{}'", node.kind(), node.name());

        if self.is_done() {
            // ancestors of the world still close their scopes, but nothing
            // reaches the committed world anymore
            return self.close_scope(node);
        }

        match node.kind() {
            NodeKind::World => self.close_world(node)?,
            NodeKind::Transform => {
                self.ctx.flush();
                self.close_scope(node)?;
            }
            NodeKind::Light if self.config.commit_on_light => {
                self.ctx.commit_world();
            }
            _ => self.close_scope(node)?,
        }
        Ok(())
    }
}
