use std::borrow::Cow;
use std::path::Path;

use models::record::Record;
use tokio::fs;

use crate::errors::ServiceError;

pub const CSV_HEADERS: [&str; 3] = ["ID", "Name", "Age"];

const LINE_END: &str = "\r\n";

/// Quote a field when it contains a delimiter, a quote or a line break.
fn escape_field(field: &str) -> Cow<'_, str> {
    if field.contains([',', '"', '\r', '\n']) {
        Cow::Owned(format!("\"{}\"", field.replace('"', "\"\"")))
    } else {
        Cow::Borrowed(field)
    }
}

/// Render the header row followed by one row per record, in the given order.
pub fn render(records: &[Record]) -> String {
    let mut out = String::new();
    out.push_str(&CSV_HEADERS.join(","));
    out.push_str(LINE_END);
    for rec in records {
        out.push_str(&rec.id.to_string());
        out.push(',');
        out.push_str(&escape_field(&rec.name));
        out.push(',');
        out.push_str(&rec.age.to_string());
        out.push_str(LINE_END);
    }
    out
}

/// Write the CSV export to `dest`, overwriting whatever is there.
pub async fn write_csv(dest: &Path, records: &[Record]) -> Result<(), ServiceError> {
    fs::write(dest, render(records))
        .await
        .map_err(|e| ServiceError::persistence(format!("export {}: {e}", dest.display())))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_collection_has_header_only() {
        assert_eq!(render(&[]), "ID,Name,Age\r\n");
    }

    #[test]
    fn rows_follow_collection_order() {
        let rows = [Record::new(2, "Bruno", 25), Record::new(1, "Ana", 30)];
        assert_eq!(render(&rows), "ID,Name,Age\r\n2,Bruno,25\r\n1,Ana,30\r\n");
    }

    #[test]
    fn names_with_special_characters_are_quoted() {
        let rows = [Record::new(1, "Silva, Ana", 30), Record::new(2, "Jo \"JJ\" Lee", 40)];
        let out = render(&rows);
        assert!(out.contains("1,\"Silva, Ana\",30\r\n"));
        assert!(out.contains("2,\"Jo \"\"JJ\"\" Lee\",40\r\n"));
    }
}
