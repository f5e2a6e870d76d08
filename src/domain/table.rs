use crate::utils::error::{ReportError, Result};
use serde::Serialize;
use serde_json::{Map, Value};

/// Ordered rows of named columns. Column order is stable and rows keep the
/// order in which they were pushed.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Table {
    columns: Vec<String>,
    rows: Vec<Vec<Value>>,
}

impl Table {
    pub fn new<I, S>(columns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            columns: columns.into_iter().map(Into::into).collect(),
            rows: Vec::new(),
        }
    }

    /// Single-column table, one row per value.
    pub fn from_column<I, V>(name: &str, values: I) -> Self
    where
        I: IntoIterator<Item = V>,
        V: Into<Value>,
    {
        Self {
            columns: vec![name.to_string()],
            rows: values.into_iter().map(|v| vec![v.into()]).collect(),
        }
    }

    pub fn push_row(&mut self, row: Vec<Value>) -> Result<()> {
        if row.len() != self.columns.len() {
            return Err(ReportError::ShapeError {
                expected: self.columns.len(),
                actual: row.len(),
            });
        }
        self.rows.push(row);
        Ok(())
    }

    /// 以欄位名稱加入一列；沒看過的欄位會接在最後，先前的列補 null
    pub fn push_record<I>(&mut self, fields: I)
    where
        I: IntoIterator<Item = (String, Value)>,
    {
        let mut row = vec![Value::Null; self.columns.len()];
        for (name, value) in fields {
            match self.column_index(&name) {
                Some(idx) => row[idx] = value,
                None => {
                    self.columns.push(name);
                    for existing in &mut self.rows {
                        existing.push(Value::Null);
                    }
                    row.push(value);
                }
            }
        }
        self.rows.push(row);
    }

    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    pub fn rows(&self) -> &[Vec<Value>] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.columns.iter().position(|c| c == name)
    }

    pub fn column(&self, name: &str) -> Option<Vec<&Value>> {
        let idx = self.column_index(name)?;
        Some(self.rows.iter().map(|row| &row[idx]).collect())
    }

    pub fn get(&self, row: usize, column: &str) -> Option<&Value> {
        let idx = self.column_index(column)?;
        self.rows.get(row).map(|r| &r[idx])
    }

    pub fn record(&self, row: usize) -> Option<Map<String, Value>> {
        self.rows.get(row).map(|cells| {
            self.columns
                .iter()
                .cloned()
                .zip(cells.iter().cloned())
                .collect()
        })
    }

    pub fn records(&self) -> Vec<Map<String, Value>> {
        (0..self.rows.len()).filter_map(|i| self.record(i)).collect()
    }

    pub fn to_csv(&self) -> Result<String> {
        self.to_delimited(b',')
    }

    pub fn to_tsv(&self) -> Result<String> {
        self.to_delimited(b'\t')
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(&self.records())?)
    }

    fn to_delimited(&self, delimiter: u8) -> Result<String> {
        let mut writer = csv::WriterBuilder::new()
            .delimiter(delimiter)
            .from_writer(Vec::new());

        writer.write_record(&self.columns)?;
        for row in &self.rows {
            writer.write_record(row.iter().map(render_cell))?;
        }

        let bytes = writer.into_inner().map_err(|e| {
            ReportError::IoError(std::io::Error::new(e.error().kind(), e.error().to_string()))
        })?;
        // 所有 cell 都來自 String，輸出必為 UTF-8
        Ok(String::from_utf8_lossy(&bytes).into_owned())
    }
}

fn render_cell(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}
