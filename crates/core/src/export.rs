//! CSV rendering for the full resource export.

/// Fixed export column order.
pub const CSV_COLUMNS: &[&str] = &[
    "name",
    "description",
    "category",
    "categories",
    "tags",
    "status",
    "address",
    "city",
    "state",
    "zip",
    "serviceArea",
    "phone",
    "email",
    "website",
    "services",
    "hours",
    "eligibility",
    "accessInfo",
    "languages",
    "internalNotes",
    "publicNotes",
    "confidenceScore",
    "lastVerifiedAt",
];

/// Separator used when an array column is flattened into one cell.
pub const LIST_SEPARATOR: &str = "; ";

/// Quote a single cell: wrap in double quotes and double any embedded quote.
pub fn quote_field(value: &str) -> String {
    format!("\"{}\"", value.replace('"', "\"\""))
}

/// Flatten an array column into one cell value.
pub fn join_list(values: &[String]) -> String {
    values.join(LIST_SEPARATOR)
}

/// Render one CSV line (without trailing newline). Every cell is quoted.
pub fn csv_line<S: AsRef<str>>(cells: &[S]) -> String {
    cells
        .iter()
        .map(|c| quote_field(c.as_ref()))
        .collect::<Vec<_>>()
        .join(",")
}

/// Render the header line.
pub fn header_line() -> String {
    csv_line(CSV_COLUMNS)
}
