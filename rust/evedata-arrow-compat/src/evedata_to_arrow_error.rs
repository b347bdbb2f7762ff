//! Utilities for converting evedata errors to Arrow-compatible errors.

use arrow_schema::ArrowError;
use evedata_common::error::Error as EvedataError;

/// Trait for converting types into an [`ArrowError`].
pub trait ToArrowError {
    fn to_arrow_err(self) -> ArrowError;
}

/// Trait for converting results with custom errors into Arrow-compatible results.
pub trait ToArrowResult {
    type Success;

    fn to_arrow_res(self) -> Result<Self::Success, ArrowError>;
}

impl<T, E> ToArrowResult for Result<T, E>
where
    E: ToArrowError,
{
    type Success = T;

    fn to_arrow_res(self) -> Result<Self::Success, ArrowError> {
        self.map_err(|e| e.to_arrow_err())
    }
}

impl ToArrowError for EvedataError {
    /// Maps argument and type faults onto the matching `ArrowError` variants,
    /// and falls back to `ArrowError::ExternalError` for everything else.
    fn to_arrow_err(self) -> ArrowError {
        use evedata_common::error::ErrorKind;
        match self.kind() {
            ErrorKind::InvalidArgument { name, message } => {
                ArrowError::InvalidArgumentError(format!("{name}: {message}"))
            }
            ErrorKind::IndexOutOfRange { .. } => ArrowError::InvalidArgumentError(self.to_string()),
            ErrorKind::TypeMismatch { .. } | ErrorKind::ShapeMismatch { .. } => {
                ArrowError::SchemaError(self.to_string())
            }
            _ => ArrowError::ExternalError(self.into()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_mapping() {
        let err = EvedataError::invalid_arg("rule", "unknown fill rule").to_arrow_err();
        assert!(matches!(err, ArrowError::InvalidArgumentError(m) if m == "rule: unknown fill rule"));

        let err = EvedataError::type_mismatch("SimMt:axis", "int32", "float64").to_arrow_err();
        assert!(matches!(err, ArrowError::SchemaError(_)));

        let res: evedata_common::Result<()> = Err(EvedataError::not_found("SimMt:axis"));
        assert!(matches!(res.to_arrow_res(), Err(ArrowError::ExternalError(_))));
    }
}
