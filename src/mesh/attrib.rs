#![warn(missing_docs)]

//! # Attribute API.
//!
//! This module defines the per-point attribute model of a polygonal dataset.
//! Attributes are stored in a dictionary keyed by [`AttribKind`], with one
//! attribute array per kind. An attribute array holds one logical value per mesh
//! point, where a value is a fixed-width group of scalars (e.g. 3 scalars per
//! normal), flattened into a single `Vec` in point order.
//!
//! The component width of each array is declared at construction. When meshes
//! are appended, two arrays of the same kind are compatible only if their
//! widths match; incompatible or missing arrays cause the kind to be dropped
//! from the combined output rather than raising an error.

use std::fmt;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// The kind of a per-point attribute array.
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum AttribKind {
    /// Scalar field, one component per point by default.
    Scalar,
    /// Vector field, three components per point.
    Vector,
    /// Unit normal field, three components per point.
    Normal,
    /// Texture coordinate field, two components per point by default.
    TexCoord,
    /// Symmetric tensor field, nine components per point.
    Tensor,
}

impl AttribKind {
    /// All attribute kinds in a fixed order.
    pub const ALL: [AttribKind; 5] = [
        AttribKind::Scalar,
        AttribKind::Vector,
        AttribKind::Normal,
        AttribKind::TexCoord,
        AttribKind::Tensor,
    ];

    /// The customary component width for this kind.
    ///
    /// Arrays may declare a different width (e.g. 3D texture coordinates); the
    /// declared width is what compatibility checks compare.
    #[inline]
    pub fn default_components(self) -> usize {
        match self {
            AttribKind::Scalar => 1,
            AttribKind::Vector => 3,
            AttribKind::Normal => 3,
            AttribKind::TexCoord => 2,
            AttribKind::Tensor => 9,
        }
    }
}

impl fmt::Display for AttribKind {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            AttribKind::Scalar => write!(f, "scalar"),
            AttribKind::Vector => write!(f, "vector"),
            AttribKind::Normal => write!(f, "normal"),
            AttribKind::TexCoord => write!(f, "texcoord"),
            AttribKind::Tensor => write!(f, "tensor"),
        }
    }
}

/// A flat per-point attribute array with a declared component width.
///
/// The data length is always `components * len()` where `len()` is the number of
/// logical values, which matches the owning mesh's point count.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Attribute<T> {
    components: usize,
    data: Vec<T>,
}

impl<T> Attribute<T> {
    /// Construct an empty attribute array with the given component width.
    #[inline]
    pub fn with_components(components: usize) -> Attribute<T> {
        debug_assert!(components > 0);
        Attribute {
            components,
            data: Vec::new(),
        }
    }

    /// Construct an attribute from a flat data vector.
    ///
    /// The data length must be a multiple of `components`.
    pub fn from_flat_vec(components: usize, data: Vec<T>) -> Result<Attribute<T>, Error> {
        if components == 0 {
            return Err(Error::InvalidComponents(components));
        }
        if data.len() % components != 0 {
            return Err(Error::WrongSize {
                expected_size: components * (data.len() / components),
                given_size: data.len(),
            });
        }
        Ok(Attribute { components, data })
    }

    /// Declared component width of each logical value.
    #[inline]
    pub fn components(&self) -> usize {
        self.components
    }

    /// Number of logical values in this array.
    #[inline]
    pub fn len(&self) -> usize {
        self.data.len() / self.components
    }

    /// True if this array holds no values.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Flat view of the underlying data in point order.
    #[inline]
    pub fn data(&self) -> &[T] {
        &self.data
    }

    /// Consume the array and return the flat data vector.
    #[inline]
    pub fn into_vec(self) -> Vec<T> {
        self.data
    }

    /// Iterator over logical values as fixed-width slices.
    #[inline]
    pub fn iter(&self) -> std::slice::Chunks<T> {
        self.data.chunks(self.components)
    }

    /// The logical value at `idx` as a slice of `components` scalars.
    #[inline]
    pub fn value(&self, idx: usize) -> &[T] {
        &self.data[idx * self.components..(idx + 1) * self.components]
    }
}

impl<T: Clone> Attribute<T> {
    /// Append all values from `other`.
    ///
    /// The caller is responsible for checking that widths match; this is the copy
    /// half of the two-phase append (availability is decided separately).
    #[inline]
    pub fn extend_from(&mut self, other: &Attribute<T>) {
        debug_assert_eq!(self.components, other.components);
        self.data.extend_from_slice(&other.data);
    }
}

/// Attribute dictionary mapping each kind to at most one array.
pub type AttribDict<T> = ahash::AHashMap<AttribKind, Attribute<T>>;

/// Error type for constructing and retrieving attributes.
///
/// These errors belong to the container API used when building meshes. The
/// append algorithm itself never fails on attributes; incompatibilities there
/// resolve to exclusion.
#[derive(Debug, PartialEq)]
pub enum Error {
    /// The attribute with the given kind is not defined on the mesh.
    DoesNotExist(AttribKind),
    /// Given data size does not match the expected attribute size.
    WrongSize {
        /// Expected flat data length (component width times point count).
        expected_size: usize,
        /// Given flat data length.
        given_size: usize,
    },
    /// The declared component width is unusable.
    InvalidComponents(usize),
}

impl std::error::Error for Error {}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Error::DoesNotExist(kind) => {
                write!(f, "no {} attribute is defined on this mesh", kind)
            }
            Error::WrongSize {
                expected_size,
                given_size,
            } => write!(
                f,
                "wrong attribute data size: expected {} scalars but {} were given",
                expected_size, given_size
            ),
            Error::InvalidComponents(components) => {
                write!(f, "invalid attribute component width: {}", components)
            }
        }
    }
}
