use crate::domain::ports::ErrorDescriptor;
use crate::domain::table::Table;
use serde_json::Value;

pub const ERROR_COLUMNS: [&str; 2] = ["error_items", "status"];

/// One row per error, `reason` under `error_items` and `status` beside it,
/// in input order.
pub fn format_errors<E: ErrorDescriptor>(errors: &[E]) -> Table {
    let mut table = Table::new(ERROR_COLUMNS);
    for error in errors {
        table.push_record([
            (ERROR_COLUMNS[0].to_string(), Value::from(error.reason())),
            (ERROR_COLUMNS[1].to_string(), Value::from(error.status())),
        ]);
    }
    table
}
