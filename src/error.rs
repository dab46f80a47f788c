use crate::data_structures::node::NodeKind;

pub type CompileResult<T> = Result<T, CompileError>;

/// Every failure aborts the compilation; no partially assembled world escapes.
#[derive(thiserror::Error, Debug)]
pub enum CompileError {
    #[error("node '{node}' ({kind}) holds a {found} value, expected {expected}")]
    TypeMismatch {
        node: String,
        kind: NodeKind,
        expected: &'static str,
        found: &'static str,
    },

    #[error("node '{node}' has no child named '{child}'")]
    MissingChild { node: String, child: String },

    #[error("{kind} node '{node}' has no {attribute}: no override child and nothing inherited")]
    UnresolvedAppearance {
        node: String,
        kind: NodeKind,
        attribute: &'static str,
    },

    #[error("malformed scene: {0}")]
    Malformed(String),

    #[error("scene is nested deeper than {limit} levels")]
    DepthLimitExceeded { limit: usize },

    #[error("{stack} stack underflow")]
    StackUnderflow { stack: &'static str },

    #[error("traversal finished without closing a world node")]
    MissingWorld,

    #[error("at '{path}': {source}")]
    At {
        path: String,
        #[source]
        source: Box<CompileError>,
    },

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl CompileError {
    pub fn malformed(msg: impl Into<String>) -> Self {
        Self::Malformed(msg.into())
    }

    /// Attaches the tree position; errors that already carry one keep the
    /// innermost path.
    pub fn at(self, path: impl Into<String>) -> Self {
        match self {
            located @ CompileError::At { .. } => located,
            other => CompileError::At {
                path: path.into(),
                source: Box::new(other),
            },
        }
    }

    /// The error without its position.
    pub fn root_cause(&self) -> &CompileError {
        match self {
            CompileError::At { source, .. } => source.root_cause(),
            other => other,
        }
    }

    pub fn path(&self) -> Option<&str> {
        match self {
            CompileError::At { path, .. } => Some(path),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_names_the_node() {
        let err = CompileError::UnresolvedAppearance {
            node: "teapot".into(),
            kind: NodeKind::Geometry,
            attribute: "material",
        };
        let msg = err.to_string();
        assert!(msg.contains("teapot"));
        assert!(msg.contains("geometry"));
        assert!(msg.contains("material"));
    }

    #[test]
    fn at_keeps_innermost_path() {
        let err = CompileError::MissingWorld.at("a/b/c").at("a/b");
        assert_eq!(err.path(), Some("a/b/c"));
        assert!(matches!(err.root_cause(), CompileError::MissingWorld));
        assert!(err.to_string().starts_with("at 'a/b/c':"));
    }

    #[test]
    fn other_preserves_source() {
        let base = std::io::Error::other("backend gone");
        let err = CompileError::from(anyhow::Error::new(base));
        assert!(err.to_string().contains("backend gone"));
    }
}
