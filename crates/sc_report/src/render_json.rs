//! JSON renderer: the report model with its section order fixed by struct layout.

use crate::{ReportError, ReportModel};

pub fn render_json(model: &ReportModel) -> Result<String, ReportError> {
    serde_json::to_string_pretty(model).map_err(|_| ReportError::Template("json_serialize"))
}
