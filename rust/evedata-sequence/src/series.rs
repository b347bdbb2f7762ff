//! The sampled data of one device.
//!
//! [`DataSeries`] is the capability set the join engine consumes; [`Series`]
//! is its concrete, immutable implementation as produced by the file layer.

use std::sync::Arc;

use evedata_common::{Result, error::Error, verify_arg};
use evedata_format::{DataType, DeviceType, Dimension, MetaData, PosRef, count_to_i32};

use crate::{
    companion::{AverageData, StdDeviationData},
    samples::Samples,
    values::NativeValue,
};

/// An immutable, sparse series of samples keyed by position reference.
///
/// Implementors guarantee that `pos_refs()` is strictly ascending and that
/// `samples()` holds exactly one row per position reference, in the same order.
///
/// A series handed to a join must not be mutated while the join runs; the
/// provided implementations are immutable once constructed.
pub trait DataSeries: Send + Sync {
    fn meta(&self) -> &Arc<MetaData>;

    /// Strictly ascending position references of the samples.
    fn pos_refs(&self) -> &[PosRef];

    fn samples(&self) -> &Samples;

    fn average(&self) -> Option<&Arc<AverageData>> {
        None
    }

    fn std_deviation(&self) -> Option<&Arc<StdDeviationData>> {
        None
    }

    fn device_type(&self) -> DeviceType {
        self.meta().device_type
    }

    fn data_type(&self) -> DataType {
        self.samples().data_type()
    }

    fn is_array(&self) -> bool {
        self.samples().is_array()
    }

    /// Number of samples (position references).
    fn len(&self) -> usize {
        self.pos_refs().len()
    }

    fn is_empty(&self) -> bool {
        self.pos_refs().is_empty()
    }

    /// Rows and columns of the data; `columns > 1` for array data, even when
    /// every recorded row holds at most one element.
    fn dimension(&self) -> Dimension {
        let columns = self.samples().columns();
        Dimension {
            rows: self.len(),
            columns: if self.is_array() { columns.max(2) } else { columns },
        }
    }

    /// Index of the sample recorded at `pos_ref`, if any.
    fn position_of(&self, pos_ref: PosRef) -> Option<usize> {
        self.pos_refs().binary_search(&pos_ref).ok()
    }

    /// Number of array elements recorded at `pos_ref`.
    ///
    /// Returns `-1` if this is not array data or nothing was recorded at
    /// `pos_ref`. Saturates at `i32::MAX`.
    fn array_value_count(&self, pos_ref: PosRef) -> i32 {
        if !self.is_array() {
            return -1;
        }
        self.position_of(pos_ref)
            .map_or(-1, |i| count_to_i32(self.samples().row_len(i)))
    }
}

impl<T: DataSeries + ?Sized> DataSeries for &T {
    fn meta(&self) -> &Arc<MetaData> {
        (**self).meta()
    }

    fn pos_refs(&self) -> &[PosRef] {
        (**self).pos_refs()
    }

    fn samples(&self) -> &Samples {
        (**self).samples()
    }

    fn average(&self) -> Option<&Arc<AverageData>> {
        (**self).average()
    }

    fn std_deviation(&self) -> Option<&Arc<StdDeviationData>> {
        (**self).std_deviation()
    }
}

impl<T: DataSeries + ?Sized> DataSeries for Box<T> {
    fn meta(&self) -> &Arc<MetaData> {
        (**self).meta()
    }

    fn pos_refs(&self) -> &[PosRef] {
        (**self).pos_refs()
    }

    fn samples(&self) -> &Samples {
        (**self).samples()
    }

    fn average(&self) -> Option<&Arc<AverageData>> {
        (**self).average()
    }

    fn std_deviation(&self) -> Option<&Arc<StdDeviationData>> {
        (**self).std_deviation()
    }
}

impl<T: DataSeries + ?Sized> DataSeries for Arc<T> {
    fn meta(&self) -> &Arc<MetaData> {
        (**self).meta()
    }

    fn pos_refs(&self) -> &[PosRef] {
        (**self).pos_refs()
    }

    fn samples(&self) -> &Samples {
        (**self).samples()
    }

    fn average(&self) -> Option<&Arc<AverageData>> {
        (**self).average()
    }

    fn std_deviation(&self) -> Option<&Arc<StdDeviationData>> {
        (**self).std_deviation()
    }
}

/// Concrete [`DataSeries`]: metadata, sorted position references, samples
/// and optional companion bookkeeping.
#[derive(Debug, Clone)]
pub struct Series {
    meta: Arc<MetaData>,
    pos_refs: Vec<PosRef>,
    samples: Samples,
    average: Option<Arc<AverageData>>,
    std_deviation: Option<Arc<StdDeviationData>>,
}

impl Series {
    /// Creates a series, validating it against its metadata.
    ///
    /// Validates that:
    /// - there is one sample per position reference
    /// - array offsets cover exactly the stored values
    /// - position references are unique
    /// - the sample type matches `meta.data_type`
    /// - the sample shape (scalar/array) matches `meta.dimension`
    ///
    /// Position references given out of order are sorted, carrying their
    /// samples along.
    pub fn try_new(
        meta: impl Into<Arc<MetaData>>,
        pos_refs: Vec<PosRef>,
        samples: Samples,
    ) -> Result<Series> {
        let meta = meta.into();
        verify_arg!(samples, samples.len() == pos_refs.len());
        verify_arg!(samples, samples.is_consistent());
        if samples.data_type() != meta.data_type {
            return Err(Error::type_mismatch(
                &meta.id,
                meta.data_type.name(),
                samples.data_type().name(),
            ));
        }
        if samples.is_array() != meta.is_array() {
            return Err(Error::shape_mismatch(&meta.id, samples.is_array()));
        }

        let (pos_refs, samples) = if pos_refs.windows(2).all(|w| w[0] < w[1]) {
            (pos_refs, samples)
        } else {
            let mut order = (0..pos_refs.len()).collect::<Vec<_>>();
            order.sort_by_key(|&i| pos_refs[i]);
            let sorted = order.iter().map(|&i| pos_refs[i]).collect::<Vec<_>>();
            if let Some(w) = sorted.windows(2).find(|w| w[0] == w[1]) {
                return Err(Error::invalid_arg(
                    "pos_refs",
                    format!("duplicate position reference {} in '{}'", w[0], meta.id),
                ));
            }
            (sorted, samples.reorder(&order))
        };

        Ok(Series {
            meta,
            pos_refs,
            samples,
            average: None,
            std_deviation: None,
        })
    }

    /// Creates a scalar series from typed values.
    pub fn scalar<T: NativeValue>(
        meta: impl Into<Arc<MetaData>>,
        pos_refs: Vec<PosRef>,
        values: Vec<T>,
    ) -> Result<Series> {
        Series::try_new(meta, pos_refs, Samples::scalar(values))
    }

    /// Creates an array series, one vector of values per position reference.
    pub fn array<T: NativeValue>(
        meta: impl Into<Arc<MetaData>>,
        pos_refs: Vec<PosRef>,
        rows: Vec<Vec<T>>,
    ) -> Result<Series> {
        Series::try_new(meta, pos_refs, Samples::array(rows))
    }

    /// Attaches average/limit bookkeeping. Non-empty vectors must have one
    /// entry per (sorted) position reference.
    pub fn with_average(mut self, average: AverageData) -> Result<Series> {
        verify_arg!(average, average.lengths().all(|len| len == self.pos_refs.len()));
        self.average = Some(Arc::new(average));
        Ok(self)
    }

    /// Attaches standard deviation bookkeeping. Non-empty vectors must have
    /// one entry per (sorted) position reference.
    pub fn with_std_deviation(mut self, std_deviation: StdDeviationData) -> Result<Series> {
        verify_arg!(
            std_deviation,
            std_deviation.lengths().all(|len| len == self.pos_refs.len())
        );
        self.std_deviation = Some(Arc::new(std_deviation));
        Ok(self)
    }

    pub fn has_average_data(&self) -> bool {
        self.average.is_some()
    }

    pub fn has_std_deviation(&self) -> bool {
        self.std_deviation.is_some()
    }

    /// All values of a scalar series.
    pub fn scalar_values<T: NativeValue>(&self) -> Result<&[T]> {
        self.samples.scalar_values(&self.meta.id)
    }

    /// The array recorded at `pos_ref`, or `None` if nothing was recorded there.
    pub fn array_values<T: NativeValue>(&self, pos_ref: PosRef) -> Result<Option<&[T]>> {
        if !self.samples.is_array() {
            return Err(Error::shape_mismatch(&self.meta.id, true));
        }
        match self.position_of(pos_ref) {
            Some(i) => self.samples.array_row(&self.meta.id, i).map(Some),
            None => Ok(None),
        }
    }

    /// The scalar value recorded at `pos_ref`, or `None` if nothing was recorded
    /// there.
    pub fn value_at<T: NativeValue>(&self, pos_ref: PosRef) -> Result<Option<T>> {
        let values = self.scalar_values::<T>()?;
        Ok(self.position_of(pos_ref).map(|i| values[i].clone()))
    }
}

impl DataSeries for Series {
    fn meta(&self) -> &Arc<MetaData> {
        &self.meta
    }

    fn pos_refs(&self) -> &[PosRef] {
        &self.pos_refs
    }

    fn samples(&self) -> &Samples {
        &self.samples
    }

    fn average(&self) -> Option<&Arc<AverageData>> {
        self.average.as_ref()
    }

    fn std_deviation(&self) -> Option<&Arc<StdDeviationData>> {
        self.std_deviation.as_ref()
    }
}
