//! Maps arbitrary incoming column names onto the canonical schema.

use mediadash_core::CanonicalField;

use crate::error::SchemaError;
use crate::table::RawTable;

/// Normalizes a column name for matching: trims, lower-cases, and replaces
/// each space with an underscore. `" Media Type"` becomes `"media_type"`.
#[must_use]
pub fn normalize_column_name(name: &str) -> String {
    name.trim().to_lowercase().replace(' ', "_")
}

/// Builds the renaming map from source column index to canonical field.
///
/// When several columns normalize to the same field, the first one wins and
/// the rest are left out of the map (they stay in the table under their
/// source names and are ignored downstream).
#[must_use]
pub fn column_mapping(columns: &[String]) -> Vec<(usize, CanonicalField)> {
    let mut mapping: Vec<(usize, CanonicalField)> = Vec::new();
    for (idx, column) in columns.iter().enumerate() {
        let Some(field) = CanonicalField::from_name(&normalize_column_name(column)) else {
            continue;
        };
        if mapping.iter().any(|&(_, f)| f == field) {
            tracing::warn!(
                column = %column,
                field = %field,
                "duplicate column for canonical field; keeping the first"
            );
            continue;
        }
        mapping.push((idx, field));
    }
    mapping
}

/// A raw table whose six canonical columns have been located and renamed.
///
/// Non-canonical columns are preserved but never read.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NormalizedTable {
    table: RawTable,
    indices: [usize; 6],
}

impl NormalizedTable {
    #[must_use]
    pub fn table(&self) -> &RawTable {
        &self.table
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.table.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.table.is_empty()
    }

    /// Column index holding `field`.
    #[must_use]
    pub fn column_index(&self, field: CanonicalField) -> usize {
        self.indices[field_slot(field)]
    }

    /// The `field` cell of `row`, or `None` when missing.
    #[must_use]
    pub fn value(&self, row: usize, field: CanonicalField) -> Option<&str> {
        self.table.cell(row, self.column_index(field))
    }
}

/// Renames matched columns to their canonical names and checks that all six
/// canonical fields are present.
///
/// # Errors
///
/// Returns [`SchemaError`] listing every canonical field without a matching
/// column. The caller must stop processing.
pub fn normalize_schema(table: RawTable) -> Result<NormalizedTable, SchemaError> {
    let mapping = column_mapping(table.columns());

    let missing: Vec<&'static str> = CanonicalField::ALL
        .into_iter()
        .filter(|field| !mapping.iter().any(|(_, f)| f == field))
        .map(CanonicalField::name)
        .collect();

    if !missing.is_empty() {
        tracing::error!(missing = ?missing, "dataset is missing required columns");
        return Err(SchemaError { missing });
    }

    let mut indices = [0usize; 6];
    for &(idx, field) in &mapping {
        indices[field_slot(field)] = idx;
    }

    let renames: Vec<(usize, &str)> = mapping.iter().map(|&(i, f)| (i, f.name())).collect();
    let table = table.with_renamed(&renames);

    tracing::debug!(rows = table.len(), "schema normalized");

    Ok(NormalizedTable { table, indices })
}

fn field_slot(field: CanonicalField) -> usize {
    match field {
        CanonicalField::Date => 0,
        CanonicalField::Platform => 1,
        CanonicalField::Sentiment => 2,
        CanonicalField::Location => 3,
        CanonicalField::Engagements => 4,
        CanonicalField::MediaType => 5,
    }
}
