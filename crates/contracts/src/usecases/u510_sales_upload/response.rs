use serde::{Deserialize, Serialize};

/// Backend answer to `POST /upload`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(from = "RawUploadResult")]
pub struct UploadResult {
    pub message: String,
    pub rows: u64,
    pub columns: u64,
    pub column_names: Vec<String>,
}

/// Older backends send `columns` as the list of names and no `column_names`.
#[derive(Deserialize)]
#[serde(untagged)]
enum ColumnsField {
    Count(u64),
    Names(Vec<String>),
}

#[derive(Deserialize)]
struct RawUploadResult {
    #[serde(default)]
    message: String,
    #[serde(default)]
    rows: u64,
    #[serde(default)]
    columns: Option<ColumnsField>,
    #[serde(default)]
    column_names: Option<Vec<String>>,
}

impl From<RawUploadResult> for UploadResult {
    fn from(raw: RawUploadResult) -> Self {
        let (count, names_from_columns) = match raw.columns {
            Some(ColumnsField::Count(n)) => (Some(n), None),
            Some(ColumnsField::Names(names)) => (None, Some(names)),
            None => (None, None),
        };
        let column_names = raw.column_names.or(names_from_columns).unwrap_or_default();
        let columns = count.unwrap_or(column_names.len() as u64);

        Self {
            message: raw.message,
            rows: raw.rows,
            columns,
            column_names,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_full_payload() {
        let json = r#"{
            "message": "ok",
            "rows": 120,
            "columns": 6,
            "column_names": ["date", "sku", "qty", "price", "brand", "platform"]
        }"#;
        let result: UploadResult = serde_json::from_str(json).unwrap();
        assert_eq!(result.message, "ok");
        assert_eq!(result.rows, 120);
        assert_eq!(result.columns, 6);
        assert_eq!(result.column_names.len(), 6);
        assert_eq!(result.column_names[0], "date");
    }

    #[test]
    fn test_columns_as_name_list() {
        let json = r#"{
            "message": "File uploaded successfully",
            "rows": 3,
            "columns": ["Order_Date", "Brand", "Price"]
        }"#;
        let result: UploadResult = serde_json::from_str(json).unwrap();
        assert_eq!(result.columns, 3);
        assert_eq!(result.column_names, vec!["Order_Date", "Brand", "Price"]);
    }

    #[test]
    fn test_serialized_shape() {
        let result = UploadResult {
            message: "ok".into(),
            rows: 1,
            columns: 1,
            column_names: vec!["sku".into()],
        };
        let value = serde_json::to_value(&result).unwrap();
        assert_eq!(value["columns"], 1);
        assert_eq!(value["column_names"][0], "sku");
    }
}
