//!
//! The appender filter. Owns an ordered list of dataset producers and combines
//! whatever they produce into a single polygonal dataset.
//!
//! In the default mode every input is asked for the same piece that was
//! requested of the filter. In parallel-streaming mode each input is asked for
//! its own distinct piece, so that `n` independent producers can generate one
//! partition of a logically unified dataset each; the merge then reassembles
//! the whole, duplicating points along piece seams.
//!

use std::sync::Arc;

use crate::algo::append_all;
use crate::mesh::PolyData;
use crate::pipeline::piece::{assign_piece, PieceRequest};
use crate::Real;

/// A producer of polygonal datasets.
///
/// This is the input collaborator contract of the appender: anything that can
/// report how finely it subdivides and produce a dataset for a requested piece.
/// Producers unable to honor a request degrade to producing what they can,
/// possibly an empty dataset; they must not fail.
pub trait PolyDataSource<T: Real>: Send + Sync {
    /// Largest number of pieces this source can usefully produce. Sources that
    /// ignore piece requests report 1.
    fn max_pieces(&self) -> usize {
        1
    }

    /// Produce the dataset for the requested piece.
    fn produce(&self, request: PieceRequest) -> PolyData<T>;
}

/// A plain dataset is a static source: it ignores the request and hands out a
/// copy of itself. Under streaming this is the degraded case: the same data is
/// contributed regardless of the assigned piece.
impl<T: Real> PolyDataSource<T> for PolyData<T> {
    fn produce(&self, _request: PieceRequest) -> PolyData<T> {
        self.clone()
    }
}

/// A filter that appends the datasets of all its inputs into one.
///
/// Inputs are kept in insertion order, which fixes the point and cell order of
/// the output. The appender never mutates its inputs; every execution reads
/// them once and allocates a fresh output.
///
/// # Examples
/// ```
/// use polymerge::mesh::{CellArray, CellType, PolyData};
/// use polymerge::pipeline::Appender;
///
/// let tri = PolyData::new(vec![[0.0, 0.0, 0.0], [1.0, 0.0, 0.0], [0.0, 1.0, 0.0]])
///     .with_cells(CellType::Polygon, CellArray::from_encoded(&[3, 0, 1, 2]));
///
/// let mut appender = Appender::new();
/// appender.add_mesh(tri.clone());
/// appender.add_mesh(tri);
///
/// let combined = appender.execute();
/// assert_eq!(combined.num_points(), 6);
/// assert_eq!(combined.cells(CellType::Polygon).cell(1), &[3, 4, 5]);
/// ```
pub struct Appender<T: Real> {
    /// Ordered input list. Duplicates are permitted and merged once per entry.
    inputs: Vec<Arc<dyn PolyDataSource<T>>>,
    /// When set, each input is asked for a distinct piece of the output.
    parallel_streaming: bool,
}

impl<T: Real> Appender<T> {
    /// Construct an appender with no inputs and streaming disabled.
    #[inline]
    pub fn new() -> Appender<T> {
        Appender {
            inputs: Vec::new(),
            parallel_streaming: false,
        }
    }

    /// Append a source to the input list.
    ///
    /// The same source may be added multiple times; it will contribute once per
    /// entry. Empty sources are permitted and skipped at merge time. No
    /// topology validation happens here.
    #[inline]
    pub fn add_input(&mut self, source: Arc<dyn PolyDataSource<T>>) {
        self.inputs.push(source);
    }

    /// Wrap a dataset in a static source and add it, returning the handle so it
    /// can later be removed by identity.
    pub fn add_mesh(&mut self, mesh: PolyData<T>) -> Arc<dyn PolyDataSource<T>> {
        let source: Arc<dyn PolyDataSource<T>> = Arc::new(mesh);
        self.add_input(Arc::clone(&source));
        source
    }

    /// Remove the first input identical to `source` (reference identity).
    ///
    /// Silently does nothing if the source was never added.
    pub fn remove_input(&mut self, source: &Arc<dyn PolyDataSource<T>>) {
        if let Some(pos) = self
            .inputs
            .iter()
            .position(|input| Arc::ptr_eq(input, source))
        {
            self.inputs.remove(pos);
        }
    }

    /// The input at `index` in insertion order, or `None` when out of bounds.
    #[inline]
    pub fn get_input(&self, index: usize) -> Option<&Arc<dyn PolyDataSource<T>>> {
        self.inputs.get(index)
    }

    /// Number of inputs currently attached.
    #[inline]
    pub fn num_inputs(&self) -> usize {
        self.inputs.len()
    }

    /// Whether parallel streaming is enabled.
    #[inline]
    pub fn parallel_streaming(&self) -> bool {
        self.parallel_streaming
    }

    /// Enable or disable parallel streaming.
    #[inline]
    pub fn set_parallel_streaming(&mut self, enabled: bool) {
        self.parallel_streaming = enabled;
    }

    /// How many pieces this filter can be asked to subdivide its output into.
    ///
    /// Under streaming each global piece fans out into one distinct piece per
    /// input, so subdividability multiplies by the input count. Without
    /// streaming every input must replicate the same request, so the filter can
    /// only be subdivided as finely as its most subdividable input.
    pub fn max_pieces(&self) -> usize {
        let single = self
            .inputs
            .iter()
            .map(|source| source.max_pieces())
            .max()
            .unwrap_or(1);
        if self.parallel_streaming {
            single * self.inputs.len().max(1)
        } else {
            single
        }
    }

    /// Produce the whole combined dataset.
    #[inline]
    pub fn execute(&self) -> PolyData<T> {
        self.execute_piece(PieceRequest::default())
    }

    /// Produce one piece of the combined dataset.
    ///
    /// Each input is assigned its piece by the extent coordinator, produces its
    /// contribution, and the contributions are appended in insertion order.
    /// Inputs producing no points are skipped; attribute kinds not common to
    /// all contributing inputs are dropped from the output.
    pub fn execute_piece(&self, request: PieceRequest) -> PolyData<T> {
        let produced = self.produce_inputs(request);
        append_all(produced.iter())
    }

    /// Ask every input for its assigned piece, in insertion order.
    #[cfg(not(feature = "parallel"))]
    fn produce_inputs(&self, request: PieceRequest) -> Vec<PolyData<T>> {
        let num_inputs = self.inputs.len();
        self.inputs
            .iter()
            .enumerate()
            .map(|(i, source)| {
                let assigned = assign_piece(request, i, num_inputs, self.parallel_streaming);
                log::trace!(
                    "input {} assigned piece {}/{}",
                    i,
                    assigned.piece,
                    assigned.num_pieces
                );
                source.produce(assigned)
            })
            .collect()
    }

    /// Ask every input for its assigned piece, producing on the rayon pool.
    ///
    /// Collection is positional, so output ordering stays insertion-order
    /// deterministic regardless of production concurrency.
    #[cfg(feature = "parallel")]
    fn produce_inputs(&self, request: PieceRequest) -> Vec<PolyData<T>> {
        use rayon::prelude::*;

        let num_inputs = self.inputs.len();
        self.inputs
            .par_iter()
            .enumerate()
            .map(|(i, source)| {
                let assigned = assign_piece(request, i, num_inputs, self.parallel_streaming);
                log::trace!(
                    "input {} assigned piece {}/{}",
                    i,
                    assigned.piece,
                    assigned.num_pieces
                );
                source.produce(assigned)
            })
            .collect()
    }
}

impl<T: Real> Default for Appender<T> {
    fn default() -> Self {
        Appender::new()
    }
}
