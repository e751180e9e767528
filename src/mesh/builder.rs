/**
 * This module provides convenience builders for common datasets. Builders double
 * as piece-aware producers: they can generate a requested subset of the full
 * dataset, which makes them usable as partitioned inputs to the appender.
 */
use crate::mesh::cells::{CellArray, CellType};
use crate::mesh::polydata::PolyData;
use crate::pipeline::{PieceRequest, PolyDataSource};
use crate::Real;

/// Axis plane orientation.
#[derive(Copy, Clone, Debug, PartialEq)]
pub enum AxisPlaneOrientation {
    XY,
    YZ,
    ZX,
}

/// Parameters that define a grid that lies in one of the 3 axis planes in 3D space.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct GridBuilder {
    /// Number of grid cells in each column.
    pub rows: usize,
    /// Number of grid cells in each row.
    pub cols: usize,
    /// Axis orientation of the grid.
    pub orientation: AxisPlaneOrientation,
}

impl GridBuilder {
    /// Generate a [-1,1]x[-1,1] grid of quad polygons with the given cell
    /// resolution and orientation. The grid nodes are specified in row major
    /// order.
    pub fn build<T: Real>(self) -> PolyData<T> {
        self.build_piece(PieceRequest::default())
    }

    /// Generate the subset of the grid assigned to one piece.
    ///
    /// Pieces partition grid columns contiguously: piece `p` of `n` covers cell
    /// columns `[p*cols/n, (p+1)*cols/n)`, extended by `ghost_levels` columns
    /// where the grid continues past the piece boundary. Only points referenced
    /// by the produced cells are emitted, so adjacent pieces both contain their
    /// shared seam column of points. A piece with no cell columns yields an
    /// empty dataset.
    pub fn build_piece<T: Real>(self, request: PieceRequest) -> PolyData<T> {
        let GridBuilder {
            rows,
            cols,
            orientation,
        } = self;

        let PieceRequest {
            piece,
            num_pieces,
            ghost_levels,
        } = request;

        if piece >= num_pieces {
            return PolyData::default();
        }

        // Contiguous column range of this piece, with ghost cells clamped to the
        // grid bounds.
        let begin = (piece * cols / num_pieces).saturating_sub(ghost_levels);
        let end = (((piece + 1) * cols) / num_pieces + ghost_levels).min(cols);

        if begin >= end {
            return PolyData::default();
        }

        let mut positions = Vec::new();

        // iterate over the covered node columns
        for j in begin..=end {
            for i in 0..=rows {
                let r = T::from(-1.0 + 2.0 * (i as f64) / rows as f64).unwrap();
                let c = T::from(-1.0 + 2.0 * (j as f64) / cols as f64).unwrap();
                let node_pos = match orientation {
                    AxisPlaneOrientation::XY => [r, c, T::zero()],
                    AxisPlaneOrientation::YZ => [T::zero(), r, c],
                    AxisPlaneOrientation::ZX => [c, T::zero(), r],
                };
                positions.push(node_pos);
            }
        }

        let mut quads = CellArray::new();

        // iterate over the covered cell columns; indices are local to the
        // points produced above
        for j in 0..(end - begin) {
            for i in 0..rows {
                quads.push_cell(&[
                    (rows + 1) * j + i,
                    (rows + 1) * j + i + 1,
                    (rows + 1) * (j + 1) + i + 1,
                    (rows + 1) * (j + 1) + i,
                ]);
            }
        }

        PolyData::new(positions).with_cells(CellType::Polygon, quads)
    }
}

impl<T: Real> PolyDataSource<T> for GridBuilder {
    /// A grid can be subdivided down to one cell column per piece.
    fn max_pieces(&self) -> usize {
        self.cols
    }

    fn produce(&self, request: PieceRequest) -> PolyData<T> {
        self.build_piece(request)
    }
}
