//! Monomorphic value buffers.

use std::ops::Range;

use evedata_common::{Result, error::Error};
use evedata_format::DataType;

/// A buffer of values sharing one [`DataType`].
///
/// Each variant owns a plain `Vec` of the corresponding native type.
#[derive(Debug, Clone, PartialEq)]
pub enum Values {
    String(Vec<String>),
    Int8(Vec<i8>),
    Int16(Vec<i16>),
    Int32(Vec<i32>),
    Int64(Vec<i64>),
    UInt8(Vec<u8>),
    UInt16(Vec<u16>),
    UInt32(Vec<u32>),
    UInt64(Vec<u64>),
    Float32(Vec<f32>),
    Float64(Vec<f64>),
}

/// Applies `$body` to the inner vector of any `Values` variant.
macro_rules! with_values {
    ($values:expr, $v:ident => $body:expr) => {
        match $values {
            Values::String($v) => $body,
            Values::Int8($v) => $body,
            Values::Int16($v) => $body,
            Values::Int32($v) => $body,
            Values::Int64($v) => $body,
            Values::UInt8($v) => $body,
            Values::UInt16($v) => $body,
            Values::UInt32($v) => $body,
            Values::UInt64($v) => $body,
            Values::Float32($v) => $body,
            Values::Float64($v) => $body,
        }
    };
}

/// Same as `with_values!`, rebuilding a `Values` of the same variant from `$body`.
macro_rules! map_values {
    ($values:expr, $v:ident => $body:expr) => {
        match $values {
            Values::String($v) => Values::String($body),
            Values::Int8($v) => Values::Int8($body),
            Values::Int16($v) => Values::Int16($body),
            Values::Int32($v) => Values::Int32($body),
            Values::Int64($v) => Values::Int64($body),
            Values::UInt8($v) => Values::UInt8($body),
            Values::UInt16($v) => Values::UInt16($body),
            Values::UInt32($v) => Values::UInt32($body),
            Values::UInt64($v) => Values::UInt64($body),
            Values::Float32($v) => Values::Float32($body),
            Values::Float64($v) => Values::Float64($body),
        }
    };
}

/// One output slot of a [`Values::take`] operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TakeSlot {
    /// Copy the source value at this index.
    Index(usize),
    /// Store NaN (floating-point types only; other types store their default).
    NotANumber,
    /// Store the type's default value; the slot is expected to be marked
    /// absent by the caller.
    Placeholder,
}

impl Values {
    /// Creates an empty buffer for `data_type`.
    ///
    /// Fails for [`DataType::Unknown`], which has no storage.
    pub fn empty(data_type: DataType) -> Result<Values> {
        Values::with_capacity(data_type, 0)
    }

    pub fn with_capacity(data_type: DataType, capacity: usize) -> Result<Values> {
        let values = match data_type {
            DataType::Unknown => {
                return Err(Error::invalid_arg(
                    "data_type",
                    "no value storage for the unknown type",
                ));
            }
            DataType::String => Values::String(Vec::with_capacity(capacity)),
            DataType::Int8 => Values::Int8(Vec::with_capacity(capacity)),
            DataType::Int16 => Values::Int16(Vec::with_capacity(capacity)),
            DataType::Int32 => Values::Int32(Vec::with_capacity(capacity)),
            DataType::Int64 => Values::Int64(Vec::with_capacity(capacity)),
            DataType::UInt8 => Values::UInt8(Vec::with_capacity(capacity)),
            DataType::UInt16 => Values::UInt16(Vec::with_capacity(capacity)),
            DataType::UInt32 => Values::UInt32(Vec::with_capacity(capacity)),
            DataType::UInt64 => Values::UInt64(Vec::with_capacity(capacity)),
            DataType::Float32 => Values::Float32(Vec::with_capacity(capacity)),
            DataType::Float64 => Values::Float64(Vec::with_capacity(capacity)),
        };
        Ok(values)
    }

    pub fn from_vec<T: NativeValue>(values: Vec<T>) -> Values {
        T::wrap(values)
    }

    /// Returns the type tag of the stored values.
    pub fn data_type(&self) -> DataType {
        match self {
            Values::String(_) => DataType::String,
            Values::Int8(_) => DataType::Int8,
            Values::Int16(_) => DataType::Int16,
            Values::Int32(_) => DataType::Int32,
            Values::Int64(_) => DataType::Int64,
            Values::UInt8(_) => DataType::UInt8,
            Values::UInt16(_) => DataType::UInt16,
            Values::UInt32(_) => DataType::UInt32,
            Values::UInt64(_) => DataType::UInt64,
            Values::Float32(_) => DataType::Float32,
            Values::Float64(_) => DataType::Float64,
        }
    }

    #[inline]
    pub fn len(&self) -> usize {
        with_values!(self, v => v.len())
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Returns the values as a typed slice, or `None` if `T` does not match
    /// the stored type.
    #[inline]
    pub fn as_slice<T: NativeValue>(&self) -> Option<&[T]> {
        T::slice(self)
    }

    /// Same as [`Values::as_slice`], failing with `TypeMismatch` instead of
    /// returning `None`.
    pub fn try_as_slice<T: NativeValue>(&self, element: &str) -> Result<&[T]> {
        T::slice(self).ok_or_else(|| {
            Error::type_mismatch(element, T::DATA_TYPE.name(), self.data_type().name())
        })
    }

    /// Builds a new buffer of the same type with one value per slot.
    ///
    /// # Panics
    ///
    /// Panics if a `TakeSlot::Index` is out of bounds.
    pub fn take(&self, slots: &[TakeSlot]) -> Values {
        map_values!(self, v => take_vec(v, slots))
    }

    /// Builds a new buffer of the same type by concatenating the given source
    /// ranges.
    ///
    /// # Panics
    ///
    /// Panics if a range is out of bounds.
    pub fn take_ranges<I>(&self, ranges: I) -> Values
    where
        I: IntoIterator<Item = Range<usize>>,
    {
        map_values!(self, v => {
            let mut out = Vec::new();
            for range in ranges {
                out.extend_from_slice(&v[range]);
            }
            out
        })
    }
}

fn take_vec<T: NativeValue>(src: &[T], slots: &[TakeSlot]) -> Vec<T> {
    slots
        .iter()
        .map(|slot| match *slot {
            TakeSlot::Index(i) => src[i].clone(),
            TakeSlot::NotANumber => T::not_a_number().unwrap_or_default(),
            TakeSlot::Placeholder => T::default(),
        })
        .collect()
}

/// A native Rust type that can be stored in [`Values`].
///
/// This is the typed-access seam: `T::DATA_TYPE` is checked against the
/// buffer's tag on every access.
pub trait NativeValue: Clone + Default + ToString + PartialEq + Send + Sync + 'static {
    const DATA_TYPE: DataType;

    /// Returns the stored values if the buffer holds `Self`.
    fn slice(values: &Values) -> Option<&[Self]>;

    fn wrap(values: Vec<Self>) -> Values;

    /// The NaN value of this type, `None` if the type has none.
    fn not_a_number() -> Option<Self> {
        None
    }
}

macro_rules! impl_native_value {
    ($ty:ty, $variant:ident) => {
        impl NativeValue for $ty {
            const DATA_TYPE: DataType = DataType::$variant;

            #[inline]
            fn slice(values: &Values) -> Option<&[Self]> {
                match values {
                    Values::$variant(v) => Some(v.as_slice()),
                    _ => None,
                }
            }

            #[inline]
            fn wrap(values: Vec<Self>) -> Values {
                Values::$variant(values)
            }
        }
    };
    ($ty:ty, $variant:ident, nan) => {
        impl NativeValue for $ty {
            const DATA_TYPE: DataType = DataType::$variant;

            #[inline]
            fn slice(values: &Values) -> Option<&[Self]> {
                match values {
                    Values::$variant(v) => Some(v.as_slice()),
                    _ => None,
                }
            }

            #[inline]
            fn wrap(values: Vec<Self>) -> Values {
                Values::$variant(values)
            }

            fn not_a_number() -> Option<Self> {
                Some(<$ty>::NAN)
            }
        }
    };
}

impl_native_value!(String, String);
impl_native_value!(i8, Int8);
impl_native_value!(i16, Int16);
impl_native_value!(i32, Int32);
impl_native_value!(i64, Int64);
impl_native_value!(u8, UInt8);
impl_native_value!(u16, UInt16);
impl_native_value!(u32, UInt32);
impl_native_value!(u64, UInt64);
impl_native_value!(f32, Float32, nan);
impl_native_value!(f64, Float64, nan);

impl<T: NativeValue> From<Vec<T>> for Values {
    fn from(values: Vec<T>) -> Self {
        T::wrap(values)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_typed_access_checks_tag() {
        let values = Values::from_vec(vec![1.5f64, 2.5]);
        assert_eq!(values.data_type(), DataType::Float64);
        assert_eq!(values.as_slice::<f64>(), Some(&[1.5, 2.5][..]));
        assert!(values.as_slice::<f32>().is_none());
        assert!(values.as_slice::<i64>().is_none());

        let err = values.try_as_slice::<i32>("SimChan:01").unwrap_err();
        assert_eq!(
            err.to_string(),
            "type mismatch for 'SimChan:01': expected int32, found float64"
        );
    }

    #[test]
    fn test_empty_unknown_type_fails() {
        assert!(Values::empty(DataType::Unknown).is_err());
        for ty in DataType::ALL {
            let values = Values::empty(ty).unwrap();
            assert_eq!(values.data_type(), ty);
            assert!(values.is_empty());
        }
    }

    #[test]
    fn test_take_float_slots() {
        let values = Values::from(vec![10.0f32, 11.0, 13.0]);
        let taken = values.take(&[
            TakeSlot::Index(0),
            TakeSlot::NotANumber,
            TakeSlot::Index(2),
            TakeSlot::Placeholder,
        ]);
        let taken = taken.as_slice::<f32>().unwrap();
        assert_eq!(taken[0], 10.0);
        assert!(taken[1].is_nan());
        assert_eq!(taken[2], 13.0);
        assert_eq!(taken[3], 0.0);
    }

    #[test]
    fn test_take_string_slots() {
        let values = Values::from(vec!["open".to_string(), "closed".to_string()]);
        let taken = values.take(&[
            TakeSlot::Index(1),
            TakeSlot::NotANumber,
            TakeSlot::Index(1),
        ]);
        assert_eq!(
            taken.as_slice::<String>().unwrap(),
            ["closed", "", "closed"]
        );
    }

    #[test]
    fn test_take_ranges() {
        let values = Values::from(vec![1u16, 2, 3, 4, 5, 6]);
        let taken = values.take_ranges([4..6, 0..0, 0..2]);
        assert_eq!(taken.as_slice::<u16>().unwrap(), [5, 6, 1, 2]);
    }
}
