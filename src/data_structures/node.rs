//! The hierarchical scene description consumed by the compiler.
//!
//! A [`Node`] is tagged with a [`NodeKind`], may carry one typed [`Value`]
//! payload and owns an ordered list of named children. The application builds
//! and edits the tree; during compilation it is only ever borrowed, so it
//! cannot change under the walk. Because children are owned, a tree can never
//! contain itself.

use std::fmt;

use crate::{
    data_structures::{
        handle::{GeometryHandle, LightHandle, MaterialId, TransferFunctionHandle, VolumeHandle},
        transform::{Affine, Pose},
    },
    error::{CompileError, CompileResult},
};

/// Name of the child that overrides a geometry's inherited material.
pub const MATERIAL_CHILD: &str = "material";
/// Name of the child that overrides a volume's inherited transfer function.
pub const TRANSFER_FUNCTION_CHILD: &str = "transferFunction";

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum NodeKind {
    World,
    Transform,
    MaterialReference,
    Geometry,
    Volume,
    TransferFunction,
    Light,
    Other,
}

impl fmt::Display for NodeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            NodeKind::World => "world",
            NodeKind::Transform => "transform",
            NodeKind::MaterialReference => "material reference",
            NodeKind::Geometry => "geometry",
            NodeKind::Volume => "volume",
            NodeKind::TransferFunction => "transfer function",
            NodeKind::Light => "light",
            NodeKind::Other => "other",
        };
        f.write_str(name)
    }
}

/// Typed payload of a node.
#[derive(Clone, Debug, PartialEq, Default)]
pub enum Value {
    #[default]
    None,
    Affine(Affine),
    Material(MaterialId),
    /// One material per primitive of the geometry it overrides.
    Materials(Vec<MaterialId>),
    Geometry(GeometryHandle),
    Volume(VolumeHandle),
    TransferFunction(TransferFunctionHandle),
    Light(LightHandle),
}

impl Value {
    pub fn type_name(&self) -> &'static str {
        match self {
            Value::None => "none",
            Value::Affine(_) => "affine",
            Value::Material(_) => "material",
            Value::Materials(_) => "material list",
            Value::Geometry(_) => "geometry",
            Value::Volume(_) => "volume",
            Value::TransferFunction(_) => "transfer function",
            Value::Light(_) => "light",
        }
    }
}

/// Types that can be read out of a node's [`Value`].
pub trait FromValue: Sized {
    const TYPE_NAME: &'static str;

    fn from_value(value: &Value) -> Option<Self>;
}

macro_rules! from_value {
    ($ty:ty, $variant:ident, $name:literal) => {
        impl FromValue for $ty {
            const TYPE_NAME: &'static str = $name;

            fn from_value(value: &Value) -> Option<Self> {
                match value {
                    Value::$variant(inner) => Some(inner.clone()),
                    _ => None,
                }
            }
        }
    };
}

from_value!(Affine, Affine, "affine");
from_value!(MaterialId, Material, "material");
from_value!(Vec<MaterialId>, Materials, "material list");
from_value!(GeometryHandle, Geometry, "geometry");
from_value!(VolumeHandle, Volume, "volume");
from_value!(TransferFunctionHandle, TransferFunction, "transfer function");
from_value!(LightHandle, Light, "light");

#[derive(Clone, Debug, PartialEq)]
pub struct Node {
    name: String,
    kind: NodeKind,
    value: Value,
    children: Vec<Node>,
}

impl Node {
    pub fn new(name: impl Into<String>, kind: NodeKind) -> Self {
        Self {
            name: name.into(),
            kind,
            value: Value::None,
            children: Vec::new(),
        }
    }

    pub fn world(name: impl Into<String>) -> Self {
        Self::new(name, NodeKind::World)
    }

    pub fn transform(name: impl Into<String>, xfm: impl Into<Affine>) -> Self {
        Self::new(name, NodeKind::Transform).with_value(Value::Affine(xfm.into()))
    }

    pub fn pose(name: impl Into<String>, pose: Pose) -> Self {
        Self::transform(name, pose)
    }

    pub fn material_reference(name: impl Into<String>, material: MaterialId) -> Self {
        Self::new(name, NodeKind::MaterialReference).with_value(Value::Material(material))
    }

    pub fn geometry(name: impl Into<String>, geometry: GeometryHandle) -> Self {
        Self::new(name, NodeKind::Geometry).with_value(Value::Geometry(geometry))
    }

    pub fn volume(name: impl Into<String>, volume: VolumeHandle) -> Self {
        Self::new(name, NodeKind::Volume).with_value(Value::Volume(volume))
    }

    pub fn transfer_function(name: impl Into<String>, tfn: TransferFunctionHandle) -> Self {
        Self::new(name, NodeKind::TransferFunction).with_value(Value::TransferFunction(tfn))
    }

    pub fn light(name: impl Into<String>, light: LightHandle) -> Self {
        Self::new(name, NodeKind::Light).with_value(Value::Light(light))
    }

    /// A plain parameter node, e.g. a `material` override below a geometry.
    pub fn param(name: impl Into<String>, value: Value) -> Self {
        Self::new(name, NodeKind::Other).with_value(value)
    }

    pub fn with_value(mut self, value: Value) -> Self {
        self.value = value;
        self
    }

    pub fn with_child(mut self, child: Node) -> Self {
        self.children.push(child);
        self
    }

    pub fn with_children(mut self, children: impl IntoIterator<Item = Node>) -> Self {
        self.children.extend(children);
        self
    }

    pub fn add_child(&mut self, child: Node) {
        self.children.push(child);
    }

    pub fn set_value(&mut self, value: Value) {
        self.value = value;
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn kind(&self) -> NodeKind {
        self.kind
    }

    pub fn value(&self) -> &Value {
        &self.value
    }

    pub fn children(&self) -> &[Node] {
        &self.children
    }

    pub fn children_mut(&mut self) -> &mut Vec<Node> {
        &mut self.children
    }

    pub fn has_child(&self, name: &str) -> bool {
        self.children.iter().any(|child| child.name == name)
    }

    /// First child called `name`.
    pub fn child(&self, name: &str) -> CompileResult<&Node> {
        self.children
            .iter()
            .find(|child| child.name == name)
            .ok_or_else(|| CompileError::MissingChild {
                node: self.name.clone(),
                child: name.to_string(),
            })
    }

    /// Reads the payload as `T`, failing if the node stores something else.
    pub fn value_as<T: FromValue>(&self) -> CompileResult<T> {
        T::from_value(&self.value).ok_or_else(|| CompileError::TypeMismatch {
            node: self.name.clone(),
            kind: self.kind,
            expected: T::TYPE_NAME,
            found: self.value.type_name(),
        })
    }

    /// Number of nodes in this subtree, including `self`.
    pub fn subtree_len(&self) -> usize {
        1 + self.children.iter().map(Node::subtree_len).sum::<usize>()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn value_as_reads_matching_payload() {
        let node = Node::geometry("g", GeometryHandle(4));
        assert_eq!(node.value_as::<GeometryHandle>().unwrap(), GeometryHandle(4));
    }

    #[test]
    fn value_as_reports_mismatch() {
        let node = Node::light("sun", LightHandle(1));
        let err = node.value_as::<Affine>().unwrap_err();
        match err {
            CompileError::TypeMismatch {
                node,
                kind,
                expected,
                found,
            } => {
                assert_eq!(node, "sun");
                assert_eq!(kind, NodeKind::Light);
                assert_eq!(expected, "affine");
                assert_eq!(found, "light");
            }
            other => panic!("unexpected error {other:?}"),
        }
    }

    #[test]
    fn named_child_lookup() {
        let node = Node::geometry("g", GeometryHandle(0))
            .with_child(Node::param(MATERIAL_CHILD, Value::Material(MaterialId(2))));
        assert!(node.has_child(MATERIAL_CHILD));
        assert!(!node.has_child(TRANSFER_FUNCTION_CHILD));
        assert_eq!(
            node.child(MATERIAL_CHILD)
                .and_then(|c| c.value_as::<MaterialId>())
                .unwrap(),
            MaterialId(2)
        );
        assert!(matches!(
            node.child("nope"),
            Err(CompileError::MissingChild { .. })
        ));
    }

    #[test]
    fn subtree_len_counts_all_nodes() {
        let tree = Node::world("w").with_children([
            Node::light("l", LightHandle(0)),
            Node::new("g", NodeKind::Other).with_child(Node::geometry("x", GeometryHandle(1))),
        ]);
        assert_eq!(tree.subtree_len(), 4);
    }
}
