use serde::Serialize;

/// The derived (test case x application) execution grid. Never stored;
/// recomputed from the current selection on demand.
#[derive(Serialize, Clone, Debug, Eq, PartialEq)]
pub struct TestMatrix {
    /// Distinct apps across the selection, in first-seen order. One column
    /// per app.
    pub apps: Vec<String>,
    pub rows: Vec<MatrixRow>,
}

#[derive(Serialize, Clone, Debug, Eq, PartialEq)]
pub struct MatrixRow {
    pub test_case_id: String,
    pub test_case_name: String,
    pub cells: Vec<MatrixCell>,
}

/// A cell is editable only when the app is selected for that test case;
/// otherwise it renders as an explicit not-applicable marker, never an
/// editable blank.
#[derive(Serialize, Clone, Debug, Eq, PartialEq)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum MatrixCell {
    Editable { user_id: String },
    NotApplicable,
}
