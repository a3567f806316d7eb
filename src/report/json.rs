// Mon Aug 17 2026 - Alex

use crate::report::aggregate::Verdict;
use serde::ser::{SerializeStruct, Serializer};
use serde::Serialize;

// Field order is the documented schema:
//   {"pass", "counts": {info, warning, error, critical}, "findings": [...]}
// Findings carry {"rule","severity","message","file","line","path"}.
// Do not append fields without bumping the schema.
struct JsonReport<'a>(&'a Verdict);

impl Serialize for JsonReport<'_> {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let mut state = serializer.serialize_struct("Report", 3)?;
        state.serialize_field("pass", &self.0.pass)?;
        state.serialize_field("counts", &self.0.counts)?;
        state.serialize_field(
            "findings",
            &self.0.findings.iter().map(JsonFinding).collect::<Vec<_>>(),
        )?;
        state.end()
    }
}

struct JsonFinding<'a>(&'a crate::report::Finding);

impl Serialize for JsonFinding<'_> {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let mut state = serializer.serialize_struct("Finding", 6)?;
        state.serialize_field("rule", &self.0.rule)?;
        state.serialize_field("severity", self.0.severity.as_str())?;
        state.serialize_field("message", &self.0.message)?;
        state.serialize_field("file", &self.0.location.file)?;
        state.serialize_field("line", &self.0.location.line)?;
        state.serialize_field("path", &self.0.location.path)?;
        state.end()
    }
}

pub fn emit_json(verdict: &Verdict) -> String {
    serde_json::to_string_pretty(&JsonReport(verdict)).unwrap_or_else(|_| "{}".to_string())
}
