use serde::{Deserialize, Serialize};

/// One untyped spreadsheet cell, as handed over by whatever read the
/// workbook. Blanks arrive as JSON `null`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum CellValue {
    Blank,
    Number(f64),
    Text(String),
}

impl CellValue {
    pub fn is_blank(&self) -> bool {
        match self {
            CellValue::Blank => true,
            CellValue::Number(_) => false,
            CellValue::Text(s) => s.trim().is_empty(),
        }
    }

    /// Stringified cell content, `None` for blanks.
    pub fn text(&self) -> Option<String> {
        match self {
            CellValue::Blank => None,
            CellValue::Number(n) => Some(n.to_string()),
            CellValue::Text(s) => {
                let trimmed = s.trim();
                if trimmed.is_empty() {
                    None
                } else {
                    Some(trimmed.to_string())
                }
            }
        }
    }
}

/// Bulk import payload: a sheet as a 2-D matrix plus the chosen date
/// column and target date. The column is detected when not supplied.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ImportRequest {
    pub cells: Vec<Vec<CellValue>>,
    #[serde(default)]
    pub date_column: Option<usize>,
    pub target_date: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ImportResponse {
    pub success: bool,
    pub count: usize,
    /// Column index the rows were matched on.
    pub date_column: usize,
}

/// Sheet inspection payload: which column holds dates and which dates
/// it holds, without touching the store.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ImportPreviewRequest {
    pub cells: Vec<Vec<CellValue>>,
    #[serde(default)]
    pub date_column: Option<usize>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ImportPreview {
    pub date_column: usize,
    /// Unique dates found in the column, canonical `MM/DD/YYYY` form.
    pub dates: Vec<String>,
}
