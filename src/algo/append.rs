/*!
 * This module defines the core append algorithm: concatenating a collection of
 * polygonal datasets into a single one. Geometry is always appended; per-point
 * attributes are appended only when every contributing input supplies them.
 */

use crate::mesh::attrib::{AttribKind, Attribute};
use crate::mesh::PolyData;
use crate::Real;

/// Compute which attribute kinds survive an append over the given inputs.
///
/// A kind is included iff every input defines it with a non-empty array of
/// matching component width. The returned pairs carry that common width. This
/// is the all-or-nothing fan-in rule: a kind missing, empty, or width-mismatched
/// on any single input is dropped for the entire output, so the combined
/// attribute arrays are never partially populated.
///
/// Callers pass only inputs that contribute points; an empty `inputs` slice
/// yields no attributes.
pub fn common_point_attributes<T: Real>(inputs: &[&PolyData<T>]) -> Vec<(AttribKind, usize)> {
    let mut common = Vec::new();
    'kinds: for kind in AttribKind::ALL {
        let mut width = None;
        for mesh in inputs {
            match mesh.attrib(kind) {
                Some(attrib) if !attrib.is_empty() => match width {
                    Some(w) if w != attrib.components() => {
                        log::debug!(
                            "dropping {} attribute: component width {} does not match {}",
                            kind,
                            attrib.components(),
                            w
                        );
                        continue 'kinds;
                    }
                    _ => width = Some(attrib.components()),
                },
                // Missing or empty on this input excludes the kind outright.
                _ => continue 'kinds,
            }
        }
        if let Some(width) = width {
            common.push((kind, width));
        }
    }
    common
}

/// Append a collection of datasets into a single freshly allocated dataset.
///
/// Inputs are read once each, in iteration order, which fixes the output
/// point and cell ordering. Inputs with no points are skipped entirely: they
/// contribute no geometry and do not participate in attribute availability.
/// Cell index lists are preserved verbatim aside from being shifted by their
/// input's starting point offset. Nothing is deduplicated; coincident points
/// from different inputs remain distinct.
///
/// There are no failure modes: anomalous inputs degrade to contributing less
/// rather than producing an error.
///
/// # Examples
/// ```
/// use polymerge::mesh::{CellArray, CellType, PolyData};
/// use polymerge::append_all;
///
/// let tri = PolyData::new(vec![[0.0, 0.0, 0.0], [1.0, 0.0, 0.0], [0.0, 1.0, 0.0]])
///     .with_cells(CellType::Polygon, CellArray::from_encoded(&[3, 0, 1, 2]));
/// let line = PolyData::new(vec![[0.0, 0.0, 1.0], [0.0, 0.0, 2.0]])
///     .with_cells(CellType::Line, CellArray::from_encoded(&[2, 0, 1]));
///
/// let combined = append_all([&tri, &line]);
///
/// assert_eq!(combined.num_points(), 5);
/// assert_eq!(combined.cells(CellType::Polygon).cell(0), &[0, 1, 2]);
/// assert_eq!(combined.cells(CellType::Line).cell(0), &[3, 4]);
/// ```
pub fn append_all<'a, T, I>(inputs: I) -> PolyData<T>
where
    T: Real,
    I: IntoIterator<Item = &'a PolyData<T>>,
{
    // Inputs without points contribute nothing, not even to availability.
    let inputs: Vec<&PolyData<T>> = inputs
        .into_iter()
        .filter(|mesh| {
            if mesh.num_points() == 0 {
                log::debug!("skipping input with no points");
                false
            } else {
                true
            }
        })
        .collect();

    // Decide attribute availability in full before copying any data.
    let common = common_point_attributes(&inputs);

    let mut output = PolyData::default();
    output
        .points
        .reserve(inputs.iter().map(|mesh| mesh.num_points()).sum());
    for &(kind, width) in &common {
        output
            .point_attributes
            .insert(kind, Attribute::with_components(width));
    }

    for mesh in inputs {
        // This input's starting point offset in the combined dataset.
        let point_offset = output.num_points();

        output.points.extend_from_slice(&mesh.points);

        for (kind, dest) in output.point_attributes.iter_mut() {
            if let Some(src) = mesh.attrib(*kind) {
                dest.extend_from(src);
            }
        }

        // All four cell categories shift uniformly.
        for (dest, src) in output.cells.iter_mut().zip(mesh.cells.iter()) {
            dest.append_shifted(src, point_offset);
        }
    }

    output
}

/// Append a slice of datasets. Equivalent to [`append_all`] over borrowed
/// elements.
#[inline]
pub fn append_slice<T: Real>(meshes: &[PolyData<T>]) -> PolyData<T> {
    append_all(meshes.iter())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::algo::test_utils::*;
    use crate::mesh::{CellArray, CellType};

    type Mesh = PolyData<f64>;

    #[test]
    fn identity() {
        let mut sample = build_polydata_sample();
        add_attribs_to_polydata(&mut sample);
        let (_, comp1, _) = sample;

        let out = append_all([&comp1]);
        assert_eq!(out, comp1);
    }

    #[test]
    fn empty_inputs_are_skipped() {
        let mut sample = build_polydata_sample();
        add_attribs_to_polydata(&mut sample);
        let (_, comp1, comp2) = sample;
        let empty = Mesh::default();

        let with_empty = append_all([&empty, &comp1, &empty, &comp2, &empty]);
        let without = append_all([&comp1, &comp2]);
        assert_eq!(with_empty, without);
    }

    #[test]
    fn no_inputs_yield_empty_output() {
        let out: Mesh = append_all([]);
        assert_eq!(out, Mesh::default());
    }

    #[test]
    fn offsets_renumber_cells() {
        let (combined, comp1, comp2) = build_polydata_sample();

        let out = append_all([&comp1, &comp2]);

        assert_eq!(out.num_points(), 5);
        assert_eq!(out.cells(CellType::Polygon).cell(0), &[0, 1, 2]);
        assert_eq!(out.cells(CellType::Line).cell(0), &[3, 4]);
        assert_eq!(out, combined);
    }

    #[test]
    fn point_order_is_insertion_order() {
        let (_, comp1, comp2) = build_polydata_sample();

        let out = append_all([&comp2, &comp1]);

        let expected: Vec<[f64; 3]> = comp2
            .point_iter()
            .chain(comp1.point_iter())
            .cloned()
            .collect();
        assert_eq!(out.points, expected);
    }

    #[test]
    fn attributes_concatenate_per_segment() {
        let mut sample = build_polydata_sample();
        add_attribs_to_polydata(&mut sample);
        let (combined, comp1, comp2) = sample;

        let out = append_all([&comp1, &comp2]);
        assert_eq!(out, combined);

        let scalars = out.attrib_as_slice(AttribKind::Scalar).unwrap();
        assert_eq!(scalars.len(), out.num_points());
        assert_eq!(&scalars[..3], comp1.attrib_as_slice(AttribKind::Scalar).unwrap());
        assert_eq!(&scalars[3..], comp2.attrib_as_slice(AttribKind::Scalar).unwrap());
    }

    #[test]
    fn attribute_missing_on_one_input_is_dropped() {
        let (_, mut comp1, comp2) = build_polydata_sample();
        comp1
            .set_attrib_data(AttribKind::Normal, 3, vec![0.5; 3 * 3])
            .unwrap();

        let out = append_all([&comp1, &comp2]);

        assert!(!out.has_attrib(AttribKind::Normal));
        assert_eq!(out.num_points(), 5);
    }

    #[test]
    fn attribute_width_mismatch_is_dropped() {
        let (_, mut comp1, mut comp2) = build_polydata_sample();
        comp1
            .set_attrib_data(AttribKind::TexCoord, 2, vec![0.0; 2 * 3])
            .unwrap();
        comp2
            .set_attrib_data(AttribKind::TexCoord, 3, vec![0.0; 3 * 2])
            .unwrap();

        let out = append_all([&comp1, &comp2]);

        assert!(!out.has_attrib(AttribKind::TexCoord));
    }

    #[test]
    fn common_attributes_intersect_by_kind_and_width() {
        let mut sample = build_polydata_sample();
        add_attribs_to_polydata(&mut sample);
        let (_, mut comp1, comp2) = sample;
        comp1
            .set_attrib_data(AttribKind::Tensor, 9, vec![0.0; 9 * 3])
            .unwrap();

        // Tensor exists only on comp1, so only scalar and normal survive.
        // Results follow the fixed kind order.
        let common = common_point_attributes(&[&comp1, &comp2]);
        assert_eq!(common, vec![(AttribKind::Scalar, 1), (AttribKind::Normal, 3)]);
    }

    #[test]
    fn all_four_categories_shift() {
        let a = Mesh::new(vec![[0.0; 3], [1.0; 3], [2.0; 3], [3.0; 3]])
            .with_cells(CellType::Vertex, CellArray::from_encoded(&[1, 0]))
            .with_cells(CellType::Line, CellArray::from_encoded(&[2, 0, 1]))
            .with_cells(CellType::Polygon, CellArray::from_encoded(&[3, 0, 1, 2]))
            .with_cells(
                CellType::TriangleStrip,
                CellArray::from_encoded(&[4, 0, 1, 2, 3]),
            );
        let b = a.clone();

        let out = append_all([&a, &b]);

        assert_eq!(out.num_points(), 8);
        assert_eq!(out.cells(CellType::Vertex).cell(1), &[4]);
        assert_eq!(out.cells(CellType::Line).cell(1), &[4, 5]);
        assert_eq!(out.cells(CellType::Polygon).cell(1), &[4, 5, 6]);
        assert_eq!(out.cells(CellType::TriangleStrip).cell(1), &[4, 5, 6, 7]);

        // Totals are sums over the inputs.
        assert_eq!(out.num_cells_total(), a.num_cells_total() + b.num_cells_total());
    }

    #[test]
    fn randomized_point_clouds_concatenate_in_order() {
        use rand::prelude::*;

        let mut rng = StdRng::seed_from_u64(37);
        let meshes: Vec<Mesh> = (0..8)
            .map(|_| {
                let n = rng.random_range(0..5);
                Mesh::new(
                    (0..n)
                        .map(|_| [rng.random::<f64>(), rng.random(), rng.random()])
                        .collect(),
                )
            })
            .collect();

        let out = append_slice(&meshes);

        let expected: Vec<[f64; 3]> = meshes
            .iter()
            .flat_map(|mesh| mesh.point_iter().cloned())
            .collect();
        assert_eq!(out.points, expected);
        assert_eq!(out.num_cells_total(), 0);
    }

    #[test]
    fn repeated_append_is_deterministic() {
        let mut sample = build_polydata_sample();
        add_attribs_to_polydata(&mut sample);
        let (_, comp1, comp2) = sample;

        let first = append_all([&comp1, &comp2]);
        let second = append_all([&comp1, &comp2]);
        assert_eq!(first, second);
    }
}
