//!
//! Cell storage module. Defines the four cell topology categories of a polygonal
//! dataset and the chunked index-list container shared by all of them.
//!

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// The topology category of a cell.
///
/// A polygonal dataset keeps one [`CellArray`] per category. Keeping the
/// categories in a fixed array keyed by this tag lets the append logic treat all
/// four uniformly.
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum CellType {
    /// Isolated points, one index list per vertex cell.
    Vertex,
    /// Polylines of two or more points.
    Line,
    /// Closed polygons with any number of sides.
    Polygon,
    /// Triangle strips, where each index after the second completes a triangle.
    TriangleStrip,
}

impl CellType {
    /// All categories in storage order.
    pub const ALL: [CellType; 4] = [
        CellType::Vertex,
        CellType::Line,
        CellType::Polygon,
        CellType::TriangleStrip,
    ];

    /// Storage slot of this category inside a `[CellArray; 4]`.
    #[inline]
    pub fn index(self) -> usize {
        self as usize
    }
}

/// A sequence of variable-length cells referencing mesh points.
///
/// Cell vertex indices are stored in a flat `indices` vector. The `offsets`
/// vector marks the start of each cell in `indices`; the last element is always
/// the length of `indices` for convenience.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct CellArray {
    /// Indices into the mesh points, for all cells back to back.
    pub indices: Vec<usize>,
    /// Offsets into `indices` marking individual cells.
    pub offsets: Vec<usize>,
}

impl CellArray {
    /// Construct an empty cell array.
    #[inline]
    pub fn new() -> CellArray {
        CellArray {
            indices: Vec::new(),
            offsets: vec![0],
        }
    }

    /// Construct a `CellArray` from a flat size-prefixed encoding.
    ///
    /// The `cells` slice contains the indices of each cell preceded by the number
    /// of indices in that cell:
    /// ```verbatim
    ///     n i_1 i_2 ... i_n m j_1 j_2 ... j_m ...
    /// ```
    ///
    /// # Examples
    /// ```
    /// use polymerge::mesh::CellArray;
    /// let cells = CellArray::from_encoded(&[3, 0, 1, 2, // first triangle
    ///                                       3, 1, 3, 2, // second triangle
    ///                                       4, 0, 1, 5, 4]); // quadrilateral
    ///
    /// assert_eq!(cells.indices, [0, 1, 2, 1, 3, 2, 0, 1, 5, 4]);
    /// assert_eq!(cells.offsets, [0, 3, 6, 10]);
    /// ```
    pub fn from_encoded(cells: &[usize]) -> CellArray {
        let mut indices = Vec::new();
        let mut offsets = Vec::new();
        let mut i = 0;
        while i < cells.len() {
            let n = cells[i];
            offsets.push(indices.len());
            i += 1;

            for k in 0..n {
                indices.push(cells[i + k]);
            }

            i += n;
        }

        offsets.push(indices.len());

        CellArray { indices, offsets }
    }

    /// Append a single cell given as a list of point indices.
    #[inline]
    pub fn push_cell(&mut self, cell: &[usize]) {
        self.indices.extend_from_slice(cell);
        self.offsets.push(self.indices.len());
    }

    /// Number of cells in this array.
    #[inline]
    pub fn num_cells(&self) -> usize {
        self.offsets.len() - 1
    }

    /// Total number of point indices over all cells.
    #[inline]
    pub fn num_cell_indices(&self) -> usize {
        self.indices.len()
    }

    /// True if this array contains no cells.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.num_cells() == 0
    }

    /// Number of point indices in the cell at `idx`.
    #[inline]
    pub fn cell_len(&self, idx: usize) -> usize {
        self.offsets[idx + 1] - self.offsets[idx]
    }

    /// The point indices of the cell at `idx`.
    #[inline]
    pub fn cell(&self, idx: usize) -> &[usize] {
        &self.indices[self.offsets[idx]..self.offsets[idx + 1]]
    }

    /// Iterator over cells as slices of point indices.
    pub fn cell_iter(&self) -> CellSliceIter {
        CellSliceIter {
            indices: &self.indices,
            offsets: &self.offsets,
        }
    }

    /// Append all cells from `other`, shifting every point index by `point_offset`.
    ///
    /// This is the concatenation primitive used when meshes are appended: cell
    /// structure is preserved verbatim while the indices are renumbered into the
    /// combined point sequence.
    pub fn append_shifted(&mut self, other: &CellArray, point_offset: usize) {
        let num_indices = self.indices.len();
        self.offsets
            .extend(other.offsets.iter().skip(1).map(|&i| i + num_indices));
        self.indices
            .extend(other.indices.iter().map(|&i| i + point_offset));
    }
}

impl Default for CellArray {
    fn default() -> Self {
        CellArray::new()
    }
}

/// Iterator over the cells of a [`CellArray`] yielding slices of point indices.
pub struct CellSliceIter<'a> {
    /// Point indices of the remaining cells.
    indices: &'a [usize],
    /// Cell offsets into the `indices` array as in `CellArray`.
    offsets: &'a [usize],
}

impl<'a> Iterator for CellSliceIter<'a> {
    type Item = &'a [usize];

    fn next(&mut self) -> Option<&'a [usize]> {
        match self.offsets.split_first() {
            Some((head, tail)) => {
                if tail.is_empty() {
                    return None;
                }
                self.offsets = tail;
                let n = tail[0] - *head;
                let (l, r) = self.indices.split_at(n);
                self.indices = r;
                Some(l)
            }
            None => {
                debug_assert!(false);
                None
            }
        }
    }
}
