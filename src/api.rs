//! Wire contracts for the analysis backend.
//!
//! The parser, smell detectors and security scanner live in a separate
//! service; these are the shapes this UI consumes from it. The graph
//! payload itself deserializes straight into the dependency graph
//! component's `GraphData`.

use serde::Deserialize;

/// Source text of one file inside an analyzed workspace.
#[derive(Clone, Debug, Deserialize)]
pub struct FileContentPayload {
	/// Full file contents.
	pub content: String,
}

/// Severity assigned by a detector.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Severity {
	/// Cosmetic or stylistic finding.
	Minor,
	/// Should be fixed, does not block.
	Major,
	/// Must be fixed; likely exploitable or corrupting.
	Critical,
}

/// Location of a finding inside the workspace.
#[derive(Clone, Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FilePointer {
	/// Workspace-relative file path.
	pub file: String,
	/// First affected line, 1-based.
	pub start_line: u32,
	/// Last affected line, inclusive.
	pub end_line: u32,
}

/// One detected issue (code smell or vulnerability).
#[derive(Clone, Debug, Deserialize)]
pub struct Evidence {
	/// Where in the workspace the issue sits.
	#[serde(flatten)]
	pub location: FilePointer,
	/// Identifier of the detector that produced this record.
	pub detector: String,
	/// How bad it is.
	pub severity: Severity,
	/// Human-readable one-line description.
	pub summary: String,
}

/// Assessment payload for one workspace.
#[derive(Clone, Debug, Default, Deserialize)]
pub struct AssessmentPayload {
	/// Every finding the backend reported.
	pub evidence: Vec<Evidence>,
}
