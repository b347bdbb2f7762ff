pub type Result<T> = std::result::Result<T, crate::error::Error>;

#[macro_export]
macro_rules! verify_arg {
    ($name:expr, $expr:expr) => {{
        let result = $expr;
        $crate::result::verify_arg(result, stringify!($name), stringify!($expr))?;
    }};
}

#[macro_export]
macro_rules! verify_data {
    ($name:expr, $expr:expr) => {{
        let result = $expr;
        $crate::result::verify_data(result, stringify!($name), stringify!($expr))?;
    }};
}

/// Fails with `IndexOutOfRange` unless `$index < $len`.
#[macro_export]
macro_rules! verify_index {
    ($what:literal, $index:expr, $len:expr) => {{
        $crate::result::verify_index($what, $index, $len)?;
    }};
}

#[inline]
pub fn verify_index(what: &'static str, index: usize, len: usize) -> Result<()> {
    if index < len {
        Ok(())
    } else {
        Err(crate::error::Error::index_out_of_range(what, index, len))
    }
}

#[inline]
pub fn verify_arg(predicate: bool, name: &str, condition: &str) -> Result<()> {
    if predicate {
        Ok(())
    } else {
        invalid_arg(name, condition)
    }
}

#[inline]
pub fn verify_data(predicate: bool, name: &str, condition: &str) -> Result<()> {
    if predicate {
        Ok(())
    } else {
        invalid_format(name, condition)
    }
}

#[cold]
pub fn invalid_arg(name: &str, condition: &str) -> Result<()> {
    Err(crate::error::ErrorKind::InvalidArgument {
        name: name.to_string(),
        message: condition.to_string(),
    }
    .into())
}

#[cold]
pub fn invalid_format(name: &str, condition: &str) -> Result<()> {
    Err(crate::error::ErrorKind::InvalidFormat {
        element: name.to_string(),
        message: condition.to_string(),
    }
    .into())
}

#[cfg(test)]
mod tests {
    use crate::error::ErrorKind;

    fn checked(rows: usize, row: usize) -> super::Result<usize> {
        verify_arg!(rows, rows > 0);
        verify_index!("row", row, rows);
        Ok(row)
    }

    #[test]
    fn test_verify_macros() {
        assert_eq!(checked(3, 2).unwrap(), 2);
        assert!(matches!(
            checked(0, 0).unwrap_err().kind(),
            ErrorKind::InvalidArgument { .. }
        ));
        assert!(matches!(
            checked(3, 3).unwrap_err().kind(),
            ErrorKind::IndexOutOfRange { what: "row", .. }
        ));
    }
}
