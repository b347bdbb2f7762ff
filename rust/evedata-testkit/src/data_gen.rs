//! Random sparse series generation.

use std::ops::Range;

use evedata_format::{DataType, DeviceType, Dimension, MetaData, PosRef};
use evedata_sequence::{Samples, Series, Values, offsets::Offsets};

/// Generator of random series over a position reference span.
///
/// Seeded, so a failing test can be reproduced from the seed it prints.
pub struct SeriesGenerator {
    rng: fastrand::Rng,
    span: Range<PosRef>,
    density: f64,
    shared: Vec<PosRef>,
}

impl SeriesGenerator {
    /// Creates a generator sampling position references from `span`; each one
    /// is kept with probability `density`.
    pub fn new(seed: u64, span: Range<PosRef>, density: f64) -> SeriesGenerator {
        assert!(!span.is_empty());
        assert!((0.0..=1.0).contains(&density));
        SeriesGenerator {
            rng: fastrand::Rng::with_seed(seed),
            span,
            density,
            shared: Vec::new(),
        }
    }

    /// Makes every generated series sample `shared` in addition to its random
    /// position references, so that intersections are not empty.
    pub fn with_shared(mut self, shared: impl IntoIterator<Item = PosRef>) -> SeriesGenerator {
        let mut shared = shared
            .into_iter()
            .filter(|p| self.span.contains(p))
            .collect::<Vec<_>>();
        shared.sort_unstable();
        shared.dedup();
        self.shared = shared;
        self
    }

    /// Random strictly ascending position references within the span,
    /// including the shared ones.
    pub fn pos_refs(&mut self) -> Vec<PosRef> {
        let density = self.density;
        let shared = &self.shared;
        let rng = &mut self.rng;
        self.span
            .clone()
            .filter(|p| shared.binary_search(p).is_ok() || rng.f64() < density)
            .collect()
    }

    pub fn values(&mut self, data_type: DataType, len: usize) -> Values {
        let rng = &mut self.rng;
        match data_type {
            DataType::Unknown => panic!("no values for the unknown type"),
            DataType::String => Values::String(
                (0..len)
                    .map(|_| format!("state-{}", rng.u8(0..8)))
                    .collect(),
            ),
            DataType::Int8 => Values::Int8((0..len).map(|_| rng.i8(..)).collect()),
            DataType::Int16 => Values::Int16((0..len).map(|_| rng.i16(..)).collect()),
            DataType::Int32 => Values::Int32((0..len).map(|_| rng.i32(..)).collect()),
            DataType::Int64 => Values::Int64((0..len).map(|_| rng.i64(..)).collect()),
            DataType::UInt8 => Values::UInt8((0..len).map(|_| rng.u8(..)).collect()),
            DataType::UInt16 => Values::UInt16((0..len).map(|_| rng.u16(..)).collect()),
            DataType::UInt32 => Values::UInt32((0..len).map(|_| rng.u32(..)).collect()),
            DataType::UInt64 => Values::UInt64((0..len).map(|_| rng.u64(..)).collect()),
            DataType::Float32 => {
                Values::Float32((0..len).map(|_| rng.f32() * 100.0 - 50.0).collect())
            }
            DataType::Float64 => {
                Values::Float64((0..len).map(|_| rng.f64() * 1000.0 - 500.0).collect())
            }
        }
    }

    /// A random scalar series.
    pub fn scalar_series(
        &mut self,
        id: &str,
        device_type: DeviceType,
        data_type: DataType,
    ) -> Series {
        let pos_refs = self.pos_refs();
        let values = self.values(data_type, pos_refs.len());
        let meta = MetaData::new(id, device_type, data_type)
            .with_dimension(Dimension::scalar(pos_refs.len()));
        Series::try_new(meta, pos_refs, Samples::Scalar(values)).expect("valid random series")
    }

    /// A random array series with row lengths in `1..=max_len` (`max_len > 1`).
    pub fn array_series(
        &mut self,
        id: &str,
        device_type: DeviceType,
        data_type: DataType,
        max_len: usize,
    ) -> Series {
        assert!(max_len > 1);
        let pos_refs = self.pos_refs();
        let lengths = (0..pos_refs.len())
            .map(|_| self.rng.usize(1..=max_len))
            .collect::<Vec<_>>();
        let offsets = Offsets::from_lengths(lengths.iter().copied());
        let values = self.values(data_type, offsets.last());
        let meta = MetaData::new(id, device_type, data_type)
            .with_dimension(Dimension::array(pos_refs.len(), max_len));
        let samples = Samples::try_array(offsets, values).expect("consistent offsets");
        Series::try_new(meta, pos_refs, samples).expect("valid random series")
    }

    /// A mix of axes and channels of assorted types, scalar and array.
    pub fn mixed_series(&mut self, count: usize) -> Vec<Series> {
        const TYPES: [DataType; 5] = [
            DataType::Float64,
            DataType::Int32,
            DataType::Float32,
            DataType::String,
            DataType::UInt16,
        ];
        (0..count)
            .map(|i| {
                let device_type = if self.rng.bool() {
                    DeviceType::Axis
                } else {
                    DeviceType::Channel
                };
                let data_type = TYPES[self.rng.usize(..TYPES.len())];
                let id = format!("Sim:{device_type}{i:02}");
                if self.rng.u8(0..5) == 0 {
                    self.array_series(&id, device_type, data_type, 4)
                } else {
                    self.scalar_series(&id, device_type, data_type)
                }
            })
            .collect()
    }
}
