//! Schema command implementation.

use issuebook_lib::Snapshot;

use crate::Result;
use crate::format::print_json;

/// JSON Schema of the durable slot document.
#[must_use]
pub fn slot_schema() -> schemars::schema::RootSchema {
    schemars::schema_for!(Snapshot)
}

/// Execute the schema command.
///
/// # Errors
///
/// Returns `Json` if the schema cannot be serialized.
pub fn execute() -> Result<()> {
    print_json(&slot_schema())
}
