//! Maps the header row of a workbook to the fields the backend understands.
//!
//! Headers are free text typed by people (`Tanggal`, `Category ID`, `Harga Satuan`). Each header is
//! turned into a snake_case column name and then, where possible, resolved to a known `Field`.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::error::Error as StdError;
use std::fmt::{Display, Formatter};

#[derive(Debug, Default, Clone, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub struct MappingError(String);

impl Display for MappingError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        Display::fmt(&self.0, f)
    }
}

impl StdError for MappingError {}

/// A column the import endpoints know about.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Ord, PartialOrd, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Field {
    Name,
    Amount,
    Date,
    CategoryId,
    CompanyId,
    Medicine,
    Quantity,
    Unit,
    PricePerItem,
}

serde_plain::derive_display_from_serialize!(Field);

impl Field {
    /// Column names (after snake_case conversion) that are read as this field.
    fn aliases(&self) -> &'static [&'static str] {
        match self {
            Field::Name => &["name", "nama", "keterangan", "description"],
            Field::Amount => &["amount", "jumlah", "nominal", "total"],
            Field::Date => &["date", "tanggal", "tgl"],
            Field::CategoryId => &["category_id", "id_kategori", "kategori_id", "category"],
            Field::CompanyId => &["company_id", "id_perusahaan", "perusahaan_id", "company"],
            Field::Medicine => &["medicine", "nama_obat", "obat", "medicine_name"],
            Field::Quantity => &["quantity", "qty", "kuantitas", "jumlah_barang"],
            Field::Unit => &["unit", "satuan"],
            Field::PricePerItem => &["price_per_item", "price", "harga", "harga_satuan"],
        }
    }

    /// Fields whose cells hold money and may carry currency formatting.
    pub fn is_money(&self) -> bool {
        matches!(self, Field::Amount | Field::PricePerItem)
    }

    fn resolve(column: &Column) -> Option<Field> {
        ALL_FIELDS
            .iter()
            .copied()
            .find(|f| f.aliases().contains(&column.as_ref()))
    }

    /// The header written into templates and exports.
    pub fn header(&self) -> &'static str {
        self.aliases()[0]
    }
}

const ALL_FIELDS: [Field; 9] = [
    Field::Name,
    Field::Amount,
    Field::Date,
    Field::CategoryId,
    Field::CompanyId,
    Field::Medicine,
    Field::Quantity,
    Field::Unit,
    Field::PricePerItem,
];

#[derive(Default, Debug, Clone, Eq, PartialEq)]
pub struct Mapping {
    headers: Vec<Header>,
    columns: Vec<Column>,
    fields: HashMap<Field, usize>,
}

impl Mapping {
    /// Create a new `Mapping` from a header row. Column names are created by converting the header
    /// strings to snake_case. Blank trailing headers are dropped.
    pub fn new<S, I>(headers: I) -> Result<Self, MappingError>
    where
        S: Into<String>,
        I: IntoIterator<Item = S>,
    {
        let mut headers: Vec<Header> = headers.into_iter().map(|s| s.into().into()).collect();
        while headers.last().is_some_and(|h| h.as_ref().trim().is_empty()) {
            headers.pop();
        }
        if headers.is_empty() {
            return Err(MappingError(String::from("The header row is empty")));
        }

        let columns: Vec<Column> = headers
            .iter()
            .enumerate()
            .map(|(ix, h)| Column::from_header(h, ix))
            .collect();

        let mut fields = HashMap::new();
        for (ix, column) in columns.iter().enumerate() {
            if let Some(field) = Field::resolve(column) {
                if fields.insert(field, ix).is_some() {
                    return Err(MappingError(format!(
                        "Two headers map to the field '{field}', the second is '{}'",
                        headers[ix].as_ref()
                    )));
                }
            }
        }

        Ok(Self {
            headers,
            columns,
            fields,
        })
    }

    pub fn len(&self) -> usize {
        self.headers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.headers.is_empty()
    }

    pub fn headers(&self) -> &[Header] {
        &self.headers
    }

    pub fn columns(&self) -> &[Column] {
        &self.columns
    }

    /// The column index holding `field`, if the sheet has it.
    pub fn index_of(&self, field: Field) -> Option<usize> {
        self.fields.get(&field).copied()
    }

    /// The known field at column `ix`, if any.
    pub fn field_at(&self, ix: usize) -> Option<Field> {
        self.fields
            .iter()
            .find(|(_, &i)| i == ix)
            .map(|(f, _)| *f)
    }

    /// Returns the `required` fields this sheet does not have.
    pub fn missing(&self, required: &[Field]) -> Vec<Field> {
        required
            .iter()
            .copied()
            .filter(|f| !self.fields.contains_key(f))
            .collect()
    }
}

/// A header cell as typed in the workbook, for example, `Harga Satuan`
#[derive(Default, Debug, Clone, Eq, PartialEq, Ord, PartialOrd, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Header(String);

impl AsRef<str> for Header {
    fn as_ref(&self) -> &str {
        self.0.as_str()
    }
}

impl<S: Into<String>> From<S> for Header {
    fn from(value: S) -> Self {
        Self(value.into())
    }
}

/// A normalized column name, for example, `harga_satuan`
#[derive(Default, Debug, Clone, Eq, PartialEq, Ord, PartialOrd, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Column(String);

impl AsRef<str> for Column {
    fn as_ref(&self) -> &str {
        self.0.as_str()
    }
}

impl Display for Column {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl Column {
    /// Blank headers become `column_<n>` (1-based) so every cell still has a key.
    fn from_header(header: &Header, ix: usize) -> Self {
        let s = to_snake_case(header.as_ref());
        if s.is_empty() {
            Self(format!("column_{}", ix + 1))
        } else {
            Self(s)
        }
    }
}

fn to_snake_case(s: impl AsRef<str>) -> String {
    let lower = s.as_ref().trim().to_lowercase().replace('#', "number");
    let mut out = String::with_capacity(lower.len());
    for c in lower.chars() {
        if c.is_ascii_alphanumeric() {
            out.push(c);
        } else if (c.is_whitespace() || c == '_' || c == '-' || c == '.') && !out.ends_with('_') {
            out.push('_');
        }
    }
    let trimmed = out.trim_matches('_');
    match trimmed.chars().next() {
        Some(c) if !c.is_ascii_alphabetic() => format!("x_{trimmed}"),
        _ => trimmed.to_string(),
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_to_snake_case() {
        assert_eq!(to_snake_case("Harga Satuan"), "harga_satuan");
        assert_eq!(to_snake_case(" Category ID "), "category_id");
        assert_eq!(to_snake_case("Tgl."), "tgl");
        assert_eq!(to_snake_case("No #"), "no_number");
        assert_eq!(to_snake_case("2024"), "x_2024");
        assert_eq!(to_snake_case("  "), "");
    }

    #[test]
    fn test_mapping_resolves_aliases() {
        let mapping =
            Mapping::new(["Tanggal", "Nama", "Jumlah", "Kategori ID", "Catatan"]).unwrap();
        assert_eq!(mapping.index_of(Field::Date), Some(0));
        assert_eq!(mapping.index_of(Field::Name), Some(1));
        assert_eq!(mapping.index_of(Field::Amount), Some(2));
        assert_eq!(mapping.index_of(Field::CategoryId), Some(3));
        assert_eq!(mapping.field_at(4), None);
        assert_eq!(mapping.columns()[4].as_ref(), "catatan");
    }

    #[test]
    fn test_mapping_missing_fields() {
        let mapping = Mapping::new(["name", "amount"]).unwrap();
        assert_eq!(
            mapping.missing(&[Field::Name, Field::Date, Field::CategoryId]),
            vec![Field::Date, Field::CategoryId]
        );
    }

    #[test]
    fn test_mapping_duplicate_field() {
        assert!(Mapping::new(["amount", "Jumlah"]).is_err());
    }

    #[test]
    fn test_mapping_blank_headers() {
        let mapping = Mapping::new(["name", "", "amount", "", ""]).unwrap();
        assert_eq!(mapping.len(), 3);
        assert_eq!(mapping.columns()[1].as_ref(), "column_2");
        assert!(Mapping::new(["", ""]).is_err());
    }
}
