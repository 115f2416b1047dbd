#[doc = r#"
    A single table cell after loading.

    Numbers are held as `f64` regardless of the source container; everything
    that fails numeric parsing stays text. Missing cells are `Empty` so that
    column lengths stay uniform.
"#]
#[derive(Debug, Clone, PartialEq)]
pub enum CellValue {
    Number(f64),
    Text(String),
    Empty,
}

impl CellValue {
    #[doc = "Parses one raw field the way the loader sees it: number, text, or empty"]
    pub fn from_raw(raw: &str) -> Self {
        let trimmed: &str = raw.trim();

        if trimmed.is_empty() {
            return CellValue::Empty;
        }

        match trimmed.parse::<f64>() {
            Ok(number) if number.is_finite() => CellValue::Number(number),
            _ => CellValue::Text(trimmed.to_string()),
        }
    }

    pub fn as_number(&self) -> Option<f64> {
        match self {
            CellValue::Number(number) => Some(*number),
            _ => None,
        }
    }

    #[doc = "Display form; whole numbers drop their fractional part so '1' round-trips as '1'"]
    pub fn display(&self) -> String {
        match self {
            CellValue::Number(number) => {
                if number.fract() == 0.0 && number.abs() < 1e15 {
                    format!("{}", *number as i64)
                } else {
                    format!("{}", number)
                }
            }
            CellValue::Text(text) => text.clone(),
            CellValue::Empty => String::new(),
        }
    }
}
