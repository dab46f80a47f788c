//! Inherited appearance state.
//!
//! Materials and transfer functions flow down the tree through scopes: a
//! reference node pushes a value, leaves below it read the top, and an
//! explicit override child on the leaf always beats whatever was inherited.

use crate::{
    data_structures::{
        handle::{MaterialId, TransferFunctionHandle},
        model::MaterialBinding,
        node::{FromValue, MATERIAL_CHILD, Node, TRANSFER_FUNCTION_CHILD, Value},
    },
    error::{CompileError, CompileResult},
};

/// A stack of resolved values, one entry per open scope.
#[derive(Clone, Debug)]
pub struct AttributeStack<T> {
    name: &'static str,
    entries: Vec<T>,
}

impl<T> AttributeStack<T> {
    pub fn new(name: &'static str) -> Self {
        Self {
            name,
            entries: Vec::new(),
        }
    }

    /// Stack with a bottom entry that can never be popped.
    pub fn with_root(name: &'static str, root: T) -> Self {
        Self {
            name,
            entries: vec![root],
        }
    }

    pub fn push(&mut self, value: T) {
        self.entries.push(value);
    }

    pub fn pop(&mut self) -> CompileResult<T> {
        self.entries
            .pop()
            .ok_or(CompileError::StackUnderflow { stack: self.name })
    }

    pub fn peek(&self) -> Option<&T> {
        self.entries.last()
    }

    pub fn depth(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn name(&self) -> &'static str {
        self.name
    }
}

/// Reads the override child `child` of `node` if there is one, otherwise
/// falls back to `inherited`.
fn resolve<T, O>(
    node: &Node,
    child: &str,
    inherited: Option<&T>,
    attribute: &'static str,
) -> CompileResult<O>
where
    T: Clone + Into<O>,
    O: FromValue,
{
    if node.has_child(child) {
        return node.child(child)?.value_as::<O>();
    }
    inherited
        .cloned()
        .map(Into::into)
        .ok_or_else(|| CompileError::UnresolvedAppearance {
            node: node.name().to_string(),
            kind: node.kind(),
            attribute,
        })
}

impl FromValue for MaterialBinding {
    const TYPE_NAME: &'static str = "material or material list";

    fn from_value(value: &Value) -> Option<Self> {
        match value {
            Value::Material(id) => Some(MaterialBinding::Single(*id)),
            Value::Materials(ids) => Some(MaterialBinding::PerPrimitive(ids.clone())),
            _ => None,
        }
    }
}

/// Material of a geometry node.
pub fn resolve_material(
    node: &Node,
    materials: &AttributeStack<MaterialId>,
) -> CompileResult<MaterialBinding> {
    resolve(node, MATERIAL_CHILD, materials.peek(), "material")
}

/// Transfer function of a volume node.
pub fn resolve_transfer_function(
    node: &Node,
    tfns: &AttributeStack<TransferFunctionHandle>,
) -> CompileResult<TransferFunctionHandle> {
    resolve(node, TRANSFER_FUNCTION_CHILD, tfns.peek(), "transfer function")
}
