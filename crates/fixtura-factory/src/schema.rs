use schemars::schema::RootSchema;
use schemars::schema_for;

use crate::loader::DefinitionFile;

/// Emit the JSON Schema for definition files.
pub fn definition_file_json_schema() -> RootSchema {
    schema_for!(DefinitionFile)
}
