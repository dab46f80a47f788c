//! flow-sg
//!
//! Compiles a hierarchical scene description into a flat, renderer-ready
//! world. A single depth-first walk accumulates transforms, resolves
//! inherited materials and transfer functions, and cuts the collected
//! geometries and volumes into instances whenever the transform scope
//! changes. The result is one committed [`World`] holding every instance and
//! light of the scene.
//!
//! High-level modules
//! - `data_structures`: scene nodes, handles, models, instances and the world
//! - `appearance`: inherited attribute stacks and override-first resolution
//! - `context`: per-run traversal state and the flush into instances
//! - `traverse`: generic depth-first walker with enter/exit hooks
//! - `compiler`: the node-kind state machine driving the compilation
//! - `config`: options of a compilation run
//! - `error`: the error type shared by all of the above
//!
//! ```
//! use flow_sg::{CompileConfig, GeometryHandle, MaterialId, Node, compile};
//!
//! let scene = Node::world("world").with_child(
//!     Node::material_reference("steel", MaterialId(0))
//!         .with_child(Node::geometry("teapot", GeometryHandle(1))),
//! );
//! let compiled = compile(&scene, &CompileConfig::default()).unwrap();
//! assert_eq!(compiled.world.instances().len(), 1);
//! ```

pub mod appearance;
pub mod compiler;
pub mod config;
pub mod context;
pub mod data_structures;
pub mod error;
pub mod traverse;

pub use compiler::{CompiledScene, SceneCompiler, compile};
pub use config::CompileConfig;
pub use context::TraversalStats;
pub use data_structures::{
    handle::{GeometryHandle, LightHandle, MaterialId, TransferFunctionHandle, VolumeHandle},
    instance::{Instance, InstanceRaw},
    model::{GeometricModel, Group, MaterialBinding, VolumetricModel},
    node::{Node, NodeKind, Value},
    transform::{Affine, Pose},
    world::World,
};
pub use error::{CompileError, CompileResult};
pub use traverse::{Visitor, traverse};

// Re-exports the math types used in payloads for convenience in downstream code.
pub use cgmath;
