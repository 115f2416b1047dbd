#[doc = "Upload container format, inferred from the file name suffix"]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UploadFormat {
    Csv,
    Excel,
}

impl UploadFormat {
    #[doc = r#"
        A `.csv` suffix selects delimited-text parsing; everything else is
        treated as a spreadsheet container and handed to the workbook reader,
        which rejects unsupported payloads itself.
    "#]
    pub fn from_file_name(file_name: &str) -> Self {
        if file_name.to_ascii_lowercase().ends_with(".csv") {
            UploadFormat::Csv
        } else {
            UploadFormat::Excel
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn suffix_selects_the_parser() {
        assert_eq!(UploadFormat::from_file_name("data.csv"), UploadFormat::Csv);
        assert_eq!(UploadFormat::from_file_name("DATA.CSV"), UploadFormat::Csv);
        assert_eq!(UploadFormat::from_file_name("data.xlsx"), UploadFormat::Excel);
        assert_eq!(UploadFormat::from_file_name("data.xls"), UploadFormat::Excel);
    }
}
