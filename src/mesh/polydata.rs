//!
//! PolyData module. Defines the polygonal dataset container: a sequence of 3D
//! points, four categorized cell topologies referencing them, and optional
//! per-point attribute arrays.
//!

use std::collections::hash_map::Entry;

use crate::mesh::attrib::*;
use crate::mesh::cells::*;
use crate::Real;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// A polygonal surface dataset.
///
/// Cells are grouped into the four [`CellType`] categories, each stored as an
/// independent [`CellArray`]. Every index in every cell refers to the `points`
/// sequence and must be smaller than the point count; the container assumes
/// well-formed topology and does not re-validate it.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct PolyData<T: Real> {
    /// Point coordinates. Insertion order is significant: cell indices and
    /// attribute values refer to points by position.
    pub points: Vec<[T; 3]>,
    /// Cell topology, one array per category indexed by [`CellType::index`].
    pub cells: [CellArray; 4],
    /// Per-point attribute arrays.
    pub point_attributes: AttribDict<T>,
}

impl<T: Real> PolyData<T> {
    /// Construct a dataset containing only points, with no cells or attributes.
    ///
    /// # Examples
    /// ```
    /// use polymerge::mesh::PolyData;
    /// let points = vec![
    ///     [0.0, 0.0, 0.0],
    ///     [1.0, 0.0, 0.0],
    ///     [0.0, 1.0, 0.0]];
    ///
    /// let mesh = PolyData::new(points.clone());
    ///
    /// assert_eq!(mesh.points, points);
    /// assert_eq!(mesh.num_cells_total(), 0);
    /// ```
    #[inline]
    pub fn new(points: Vec<[T; 3]>) -> PolyData<T> {
        PolyData {
            points,
            cells: [
                CellArray::new(),
                CellArray::new(),
                CellArray::new(),
                CellArray::new(),
            ],
            point_attributes: AttribDict::default(),
        }
    }

    /// Replace the cell array of the given category, returning `self` for
    /// chained construction.
    ///
    /// # Examples
    /// ```
    /// use polymerge::mesh::{CellArray, CellType, PolyData};
    /// let mesh = PolyData::new(vec![
    ///         [0.0, 0.0, 0.0],
    ///         [1.0, 0.0, 0.0],
    ///         [0.0, 1.0, 0.0]])
    ///     .with_cells(CellType::Polygon, CellArray::from_encoded(&[3, 0, 1, 2]));
    ///
    /// assert_eq!(mesh.num_cells(CellType::Polygon), 1);
    /// ```
    #[inline]
    pub fn with_cells(mut self, cell_type: CellType, cells: CellArray) -> PolyData<T> {
        self.cells[cell_type.index()] = cells;
        self
    }

    /// The cell array of the given category.
    #[inline]
    pub fn cells(&self, cell_type: CellType) -> &CellArray {
        &self.cells[cell_type.index()]
    }

    /// Mutable cell array of the given category.
    #[inline]
    pub fn cells_mut(&mut self, cell_type: CellType) -> &mut CellArray {
        &mut self.cells[cell_type.index()]
    }

    /// Iterator over the cells of one category as slices of point indices.
    #[inline]
    pub fn cell_iter(&self, cell_type: CellType) -> CellSliceIter {
        self.cells(cell_type).cell_iter()
    }

    /// Number of points in the dataset.
    #[inline]
    pub fn num_points(&self) -> usize {
        self.points.len()
    }

    /// Number of cells in one category.
    #[inline]
    pub fn num_cells(&self, cell_type: CellType) -> usize {
        self.cells(cell_type).num_cells()
    }

    /// Total number of cells over all four categories.
    #[inline]
    pub fn num_cells_total(&self) -> usize {
        self.cells.iter().map(|c| c.num_cells()).sum()
    }

    /// Iterator over point coordinates.
    #[inline]
    pub fn point_iter(&self) -> std::slice::Iter<[T; 3]> {
        self.points.iter()
    }

    /*
     * Attribute API.
     */

    /// Set an attribute array from flat data, whether or not it already exists.
    ///
    /// `data` must contain exactly `components` scalars per point.
    pub fn set_attrib_data(
        &mut self,
        kind: AttribKind,
        components: usize,
        data: Vec<T>,
    ) -> Result<&mut Attribute<T>, Error> {
        if components == 0 {
            return Err(Error::InvalidComponents(components));
        }
        let expected_size = components * self.num_points();
        let given_size = data.len();
        if given_size != expected_size {
            return Err(Error::WrongSize {
                expected_size,
                given_size,
            });
        }
        let attrib = Attribute::from_flat_vec(components, data)?;
        Ok(match self.point_attributes.entry(kind) {
            Entry::Occupied(mut entry) => {
                entry.insert(attrib);
                entry.into_mut()
            }
            Entry::Vacant(entry) => entry.insert(attrib),
        })
    }

    /// True if an attribute of the given kind is defined.
    #[inline]
    pub fn has_attrib(&self, kind: AttribKind) -> bool {
        self.point_attributes.contains_key(&kind)
    }

    /// The attribute array of the given kind, if defined.
    #[inline]
    pub fn attrib(&self, kind: AttribKind) -> Option<&Attribute<T>> {
        self.point_attributes.get(&kind)
    }

    /// Flat data slice of the attribute of the given kind.
    #[inline]
    pub fn attrib_as_slice(&self, kind: AttribKind) -> Result<&[T], Error> {
        self.attrib(kind)
            .map(|a| a.data())
            .ok_or(Error::DoesNotExist(kind))
    }

    /// Remove and return the attribute of the given kind. Returns `None` if it
    /// was never defined.
    #[inline]
    pub fn remove_attrib(&mut self, kind: AttribKind) -> Option<Attribute<T>> {
        self.point_attributes.remove(&kind)
    }
}

impl<T: Real + bytemuck::Pod> PolyData<T> {
    /// Point coordinates as a flat slice of scalars, `x y z` per point.
    #[inline]
    pub fn points_flat(&self) -> &[T] {
        bytemuck::cast_slice(&self.points)
    }
}

impl<T: Real> Default for PolyData<T> {
    /// Produce an empty dataset.
    ///
    /// This is not particularly useful on its own, however it serves as a null
    /// case for the append algorithms: an empty input contributes nothing.
    fn default() -> Self {
        PolyData::new(vec![])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn triangle() -> PolyData<f64> {
        PolyData::new(vec![[0.0, 0.0, 0.0], [1.0, 0.0, 0.0], [0.0, 1.0, 0.0]])
            .with_cells(CellType::Polygon, CellArray::from_encoded(&[3, 0, 1, 2]))
    }

    #[test]
    fn counts() {
        let mesh = triangle();
        assert_eq!(mesh.num_points(), 3);
        assert_eq!(mesh.num_cells(CellType::Polygon), 1);
        assert_eq!(mesh.num_cells(CellType::Line), 0);
        assert_eq!(mesh.num_cells_total(), 1);
    }

    #[test]
    fn attrib_round_trip() {
        let mut mesh = triangle();
        mesh.set_attrib_data(AttribKind::Scalar, 1, vec![0.5, 1.5, 2.5])
            .unwrap();

        assert!(mesh.has_attrib(AttribKind::Scalar));
        assert_eq!(
            mesh.attrib_as_slice(AttribKind::Scalar).unwrap(),
            &[0.5, 1.5, 2.5]
        );

        let removed = mesh.remove_attrib(AttribKind::Scalar).unwrap();
        assert_eq!(removed.components(), 1);
        assert!(!mesh.has_attrib(AttribKind::Scalar));
        assert_eq!(
            mesh.attrib_as_slice(AttribKind::Scalar),
            Err(Error::DoesNotExist(AttribKind::Scalar))
        );
    }

    #[test]
    fn attrib_size_is_checked() {
        let mut mesh = triangle();
        let res = mesh.set_attrib_data(AttribKind::Normal, 3, vec![0.0; 8]);
        assert_eq!(
            res.unwrap_err(),
            Error::WrongSize {
                expected_size: 9,
                given_size: 8,
            }
        );
    }

    #[test]
    fn set_attrib_overwrites() {
        let mut mesh = triangle();
        mesh.set_attrib_data(AttribKind::Scalar, 1, vec![1.0, 1.0, 1.0])
            .unwrap();
        mesh.set_attrib_data(AttribKind::Scalar, 1, vec![2.0, 2.0, 2.0])
            .unwrap();
        assert_eq!(
            mesh.attrib_as_slice(AttribKind::Scalar).unwrap(),
            &[2.0, 2.0, 2.0]
        );
    }

    #[test]
    fn flat_points_view() {
        let mesh = triangle();
        assert_eq!(
            mesh.points_flat(),
            &[0.0, 0.0, 0.0, 1.0, 0.0, 0.0, 0.0, 1.0, 0.0]
        );
    }
}
