pub mod attrib;
pub mod builder;
pub mod cells;
pub mod polydata;

// Re-export the container and its building blocks.
pub use self::attrib::{AttribDict, AttribKind, Attribute};
pub use self::cells::*;
pub use self::polydata::*;
