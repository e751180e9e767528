pub mod append;

pub use self::append::*;

/// Useful utilities for testing algorithms in this module.
#[cfg(test)]
pub(crate) mod test_utils {
    use crate::mesh::attrib::AttribKind;
    use crate::mesh::{CellArray, CellType};
    type PolyData = crate::mesh::PolyData<f64>;

    /// A combined dataset along with the two parts it decomposes into: a
    /// triangle and a disconnected line segment.
    pub(crate) fn build_polydata_sample() -> (PolyData, PolyData, PolyData) {
        let combined = PolyData::new(vec![
            [0.0, 0.0, 0.0],
            [1.0, 0.0, 0.0],
            [0.0, 1.0, 0.0],
            [0.0, 0.0, 1.0],
            [0.0, 0.0, 2.0],
        ])
        .with_cells(CellType::Polygon, CellArray::from_encoded(&[3, 0, 1, 2]))
        .with_cells(CellType::Line, CellArray::from_encoded(&[2, 3, 4]));

        let comp1 = PolyData::new(vec![
            [0.0, 0.0, 0.0],
            [1.0, 0.0, 0.0],
            [0.0, 1.0, 0.0],
        ])
        .with_cells(CellType::Polygon, CellArray::from_encoded(&[3, 0, 1, 2]));

        let comp2 = PolyData::new(vec![[0.0, 0.0, 1.0], [0.0, 0.0, 2.0]])
            .with_cells(CellType::Line, CellArray::from_encoded(&[2, 0, 1]));

        (combined, comp1, comp2)
    }

    /// Attach matching scalar and normal attributes to all three sample meshes.
    pub(crate) fn add_attribs_to_polydata(sample: &mut (PolyData, PolyData, PolyData)) {
        sample
            .0
            .set_attrib_data(
                AttribKind::Scalar,
                1,
                (0..sample.0.num_points()).map(|i| i as f64).collect(),
            )
            .unwrap();
        sample
            .1
            .set_attrib_data(AttribKind::Scalar, 1, vec![0.0, 1.0, 2.0])
            .unwrap();
        sample
            .2
            .set_attrib_data(AttribKind::Scalar, 1, vec![3.0, 4.0])
            .unwrap();

        sample
            .0
            .set_attrib_data(AttribKind::Normal, 3, vec![0.0; 3 * 5])
            .unwrap();
        sample
            .1
            .set_attrib_data(AttribKind::Normal, 3, vec![0.0; 3 * 3])
            .unwrap();
        sample
            .2
            .set_attrib_data(AttribKind::Normal, 3, vec![0.0; 3 * 2])
            .unwrap();
    }
}
