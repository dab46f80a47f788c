//! Knobs for a compilation run.

/// Options of a single compilation.
///
/// The defaults reproduce the classic behavior: the world is re-committed on
/// every light, materials stay inherited after their reference node closes.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CompileConfig {
    /// Deepest nesting accepted before the tree is rejected as malformed.
    pub max_depth: usize,
    /// Commit the world again whenever a light node closes.
    pub commit_on_light: bool,
    /// Pop the material stack when a material reference closes, so a
    /// material no longer leaks into the following siblings.
    pub pop_material_on_exit: bool,
    /// Log a warning when a world is committed without any instance.
    pub warn_on_empty_world: bool,
    /// Entering a transform also cuts an instance for pending volumes. Off,
    /// only pending geometries force the cut and queued volumes move into
    /// the nested scope.
    pub cut_volumes_at_transforms: bool,
}

impl CompileConfig {
    pub const DEFAULT_MAX_DEPTH: usize = 512;

    pub fn new() -> Self {
        Self {
            max_depth: Self::DEFAULT_MAX_DEPTH,
            commit_on_light: true,
            pop_material_on_exit: false,
            warn_on_empty_world: true,
            cut_volumes_at_transforms: false,
        }
    }

    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }

    pub fn with_commit_on_light(mut self, commit_on_light: bool) -> Self {
        self.commit_on_light = commit_on_light;
        self
    }

    pub fn with_pop_material_on_exit(mut self, pop: bool) -> Self {
        self.pop_material_on_exit = pop;
        self
    }

    pub fn with_warn_on_empty_world(mut self, warn: bool) -> Self {
        self.warn_on_empty_world = warn;
        self
    }

    pub fn with_cut_volumes_at_transforms(mut self, cut: bool) -> Self {
        self.cut_volumes_at_transforms = cut;
        self
    }
}

impl Default for CompileConfig {
    fn default() -> Self {
        Self::new()
    }
}
