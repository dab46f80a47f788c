//! Scene description and compiler output types.
//!
//! - `node` is the input tree: kinds, payloads and named children
//! - `handle` holds opaque ids of renderer-side objects
//! - `transform` contains the affine payload and the `Pose` helper
//! - `model` has geometric/volumetric models and the groups bundling them
//! - `instance` stamps a group with a transform and packs it for the GPU
//! - `world` is the committed result of a compilation

pub mod handle;
pub mod instance;
pub mod model;
pub mod node;
pub mod transform;
pub mod world;
