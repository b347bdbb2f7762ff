//! Conversion of a whole joined table into an Arrow `RecordBatch`.

use std::sync::Arc;

use arrow_array::{ArrayRef, Int32Array, RecordBatch, RecordBatchOptions};
use arrow_schema::{DataType as ArrowDataType, Field as ArrowField, Schema as ArrowSchema};
use evedata_common::{Result, error::Error};
use evedata_join::JoinedTable;

use crate::{IntoArrowArray, evedata_to_arrow_schema::ToArrowField};

/// Name of the leading column holding the row position references.
pub const POSREF_FIELD: &str = "posref";

/// Arrow schema of `table`: a non-nullable `posref` column followed by one
/// field per joined column.
pub fn joined_table_schema(table: &JoinedTable) -> Result<ArrowSchema> {
    let mut fields = Vec::with_capacity(table.column_count() + 1);
    fields.push(ArrowField::new(POSREF_FIELD, ArrowDataType::Int32, false));
    for column in table.columns() {
        fields.push(
            column
                .meta()
                .to_arrow_field(column.data_type(), column.is_array())?,
        );
    }
    Ok(ArrowSchema::new(fields))
}

/// Builds a record batch holding every row of `table`.
pub fn joined_table_to_record_batch(table: &JoinedTable) -> Result<RecordBatch> {
    let schema = Arc::new(joined_table_schema(table)?);
    let mut arrays = Vec::with_capacity(table.column_count() + 1);
    arrays.push(Arc::new(Int32Array::from(table.pos_refs().to_vec())) as ArrayRef);
    for column in table.columns() {
        arrays.push(column.into_arrow_array()?);
    }
    let options = RecordBatchOptions::new().with_row_count(Some(table.row_count()));
    RecordBatch::try_new_with_options(schema, arrays, &options)
        .map_err(|e| Error::arrow("joined table batch", e))
}
