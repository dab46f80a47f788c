//! Opaque handles to renderer-side objects.
//!
//! The compiler never looks inside a handle. Geometries, volumes, transfer
//! functions and lights are created and owned by the rendering backend; the
//! scene graph only refers to them by id.

macro_rules! handle {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
        pub struct $name(pub u32);

        impl $name {
            pub fn id(self) -> u32 {
                self.0
            }
        }

        impl From<u32> for $name {
            fn from(id: u32) -> Self {
                Self(id)
            }
        }
    };
}

handle!(
    /// Index into the renderer's material registry.
    MaterialId
);
handle!(
    /// Renderer-side geometry (mesh, spheres, curves, ...).
    GeometryHandle
);
handle!(
    /// Renderer-side volume (structured or unstructured grid).
    VolumeHandle
);
handle!(
    /// Renderer-side transfer function mapping volume samples to color and opacity.
    TransferFunctionHandle
);
handle!(LightHandle);
