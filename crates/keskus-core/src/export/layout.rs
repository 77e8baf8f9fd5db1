use crate::catalog::SymbolCatalog;
use crate::model::DeviceRow;
use crate::summary::AggregatedItem;
use serde::{Deserialize, Serialize};

/// Appended to the cable-types cell of groups with more than one cable type.
pub const MISMATCH_MARKER: &str = " ⚠️ MISMATCH";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExportOptions {
    /// Add a cable-types column to both sheets.
    pub include_cable_column: bool,
    /// Split `input/output` protection values into two columns.
    pub split_protection: bool,
}

impl Default for ExportOptions {
    fn default() -> Self {
        Self {
            include_cable_column: true,
            split_protection: false,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProtectionSplit {
    pub input: String,
    pub output: String,
}

/// Split a protection value on `/` into input and output parts.
///
/// Without a `/` the whole value is the input and the output is empty.
pub fn split_protection(suoja: &str) -> ProtectionSplit {
    match suoja.split_once('/') {
        Some((input, rest)) => {
            let output = rest.split('/').next().unwrap_or("");
            ProtectionSplit {
                input: input.trim().to_string(),
                output: output.trim().to_string(),
            }
        }
        None => ProtectionSplit {
            input: suoja.to_string(),
            output: String::new(),
        },
    }
}

/// A rendered cell value.
#[derive(Debug, Clone, PartialEq)]
pub enum Cell {
    Text(String),
    Number(f64),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SummaryColumn {
    Type,
    Suoja,
    SuojaInput,
    SuojaOutput,
    CableTypes,
    Quantity,
}

impl SummaryColumn {
    pub fn header(self) -> &'static str {
        match self {
            SummaryColumn::Type => "Type",
            SummaryColumn::Suoja => "Suoja",
            SummaryColumn::SuojaInput => "Suoja Input",
            SummaryColumn::SuojaOutput => "Suoja Output",
            SummaryColumn::CableTypes => "Cable Types",
            SummaryColumn::Quantity => "Quantity",
        }
    }

    pub fn width(self) -> f64 {
        match self {
            SummaryColumn::Type => 25.0,
            SummaryColumn::Suoja | SummaryColumn::SuojaInput | SummaryColumn::SuojaOutput => 12.0,
            SummaryColumn::CableTypes => 20.0,
            SummaryColumn::Quantity => 10.0,
        }
    }

    pub fn cell(self, item: &AggregatedItem, catalog: &SymbolCatalog) -> Cell {
        match self {
            SummaryColumn::Type => Cell::Text(catalog.display_names(&item.icons)),
            SummaryColumn::Suoja => Cell::Text(item.suoja.clone()),
            SummaryColumn::SuojaInput => Cell::Text(split_protection(&item.suoja).input),
            SummaryColumn::SuojaOutput => Cell::Text(split_protection(&item.suoja).output),
            SummaryColumn::CableTypes => Cell::Text(cable_types_text(item)),
            SummaryColumn::Quantity => Cell::Number(item.count as f64),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeviceColumn {
    Page,
    Type,
    Nro,
    Kuvateksti,
    Suoja,
    SuojaInput,
    SuojaOutput,
    Kaapeli,
}

impl DeviceColumn {
    pub fn header(self) -> &'static str {
        match self {
            DeviceColumn::Page => "Page",
            DeviceColumn::Type => "Type",
            DeviceColumn::Nro => "NRo",
            DeviceColumn::Kuvateksti => "Kuvateksti",
            DeviceColumn::Suoja => "Suoja",
            DeviceColumn::SuojaInput => "Suoja Input",
            DeviceColumn::SuojaOutput => "Suoja Output",
            DeviceColumn::Kaapeli => "Kaapeli",
        }
    }

    pub fn width(self) -> f64 {
        match self {
            DeviceColumn::Page => 8.0,
            DeviceColumn::Type => 25.0,
            DeviceColumn::Nro => 12.0,
            DeviceColumn::Kuvateksti => 30.0,
            DeviceColumn::Suoja | DeviceColumn::SuojaInput | DeviceColumn::SuojaOutput => 12.0,
            DeviceColumn::Kaapeli => 20.0,
        }
    }

    pub fn cell(self, device: &DeviceRow, catalog: &SymbolCatalog) -> Cell {
        match self {
            DeviceColumn::Page => Cell::Number(device.page_number as f64),
            DeviceColumn::Type => Cell::Text(catalog.display_names(&device.icons)),
            DeviceColumn::Nro => Cell::Text(device.nro.clone()),
            DeviceColumn::Kuvateksti => Cell::Text(device.kuvateksti.clone()),
            DeviceColumn::Suoja => Cell::Text(device.suoja.clone()),
            DeviceColumn::SuojaInput => Cell::Text(split_protection(&device.suoja).input),
            DeviceColumn::SuojaOutput => Cell::Text(split_protection(&device.suoja).output),
            DeviceColumn::Kaapeli => Cell::Text(device.kaapeli.clone()),
        }
    }
}

/// Columns of the "Summary Report" sheet. Quantity is always last.
pub fn summary_columns(options: &ExportOptions) -> Vec<SummaryColumn> {
    let mut columns = vec![SummaryColumn::Type];
    if options.split_protection {
        columns.extend([SummaryColumn::SuojaInput, SummaryColumn::SuojaOutput]);
    } else {
        columns.push(SummaryColumn::Suoja);
    }
    if options.include_cable_column {
        columns.push(SummaryColumn::CableTypes);
    }
    columns.push(SummaryColumn::Quantity);
    columns
}

/// Columns of the "All Devices" sheet.
pub fn device_columns(options: &ExportOptions) -> Vec<DeviceColumn> {
    let mut columns = vec![
        DeviceColumn::Page,
        DeviceColumn::Type,
        DeviceColumn::Nro,
        DeviceColumn::Kuvateksti,
    ];
    if options.split_protection {
        columns.extend([DeviceColumn::SuojaInput, DeviceColumn::SuojaOutput]);
    } else {
        columns.push(DeviceColumn::Suoja);
    }
    if options.include_cable_column {
        columns.push(DeviceColumn::Kaapeli);
    }
    columns
}

/// Cable types joined with `", "`, plus the mismatch marker when flagged.
pub fn cable_types_text(item: &AggregatedItem) -> String {
    let mut text = item.kaapeli_types.join(", ");
    if item.has_cable_mismatch {
        text.push_str(MISMATCH_MARKER);
    }
    text
}

#[cfg(test)]
mod tests {
    use super::*;

    fn item(kaapeli_types: &[&str], mismatch: bool) -> AggregatedItem {
        AggregatedItem {
            id: "JOHDONSUOJA_1::C16".into(),
            icon_type: "JOHDONSUOJA_1".into(),
            icons: vec!["JOHDONSUOJA_1".into()],
            suoja: "C16".into(),
            count: 4,
            percentage: Default::default(),
            kaapeli_types: kaapeli_types.iter().map(|s| s.to_string()).collect(),
            has_cable_mismatch: mismatch,
            devices: vec![],
        }
    }

    #[test]
    fn test_split_protection() {
        assert_eq!(
            split_protection("C16 / 30mA"),
            ProtectionSplit {
                input: "C16".into(),
                output: "30mA".into()
            }
        );
        assert_eq!(
            split_protection("C16"),
            ProtectionSplit {
                input: "C16".into(),
                output: String::new()
            }
        );
        assert_eq!(split_protection("a/b/c").output, "b");
    }

    #[test]
    fn test_summary_columns_default_layout() {
        let columns = summary_columns(&ExportOptions::default());
        assert_eq!(
            columns,
            vec![
                SummaryColumn::Type,
                SummaryColumn::Suoja,
                SummaryColumn::CableTypes,
                SummaryColumn::Quantity
            ]
        );
    }

    #[test]
    fn test_summary_columns_split_without_cable() {
        let options = ExportOptions {
            include_cable_column: false,
            split_protection: true,
        };
        let headers: Vec<&str> = summary_columns(&options).iter().map(|c| c.header()).collect();
        assert_eq!(headers, vec!["Type", "Suoja Input", "Suoja Output", "Quantity"]);
    }

    #[test]
    fn test_device_columns_split_with_cable() {
        let options = ExportOptions {
            include_cable_column: true,
            split_protection: true,
        };
        let headers: Vec<&str> = device_columns(&options).iter().map(|c| c.header()).collect();
        assert_eq!(
            headers,
            vec!["Page", "Type", "NRo", "Kuvateksti", "Suoja Input", "Suoja Output", "Kaapeli"]
        );
    }

    #[test]
    fn test_cable_types_text_marks_mismatch() {
        assert_eq!(cable_types_text(&item(&["MMJ", "MCMK"], true)), "MMJ, MCMK ⚠️ MISMATCH");
        assert_eq!(cable_types_text(&item(&["MMJ"], false)), "MMJ");
        assert_eq!(cable_types_text(&item(&[], false)), "");
    }

    #[test]
    fn test_type_cell_uses_display_names() {
        let catalog = SymbolCatalog::builtin().unwrap();
        assert_eq!(
            SummaryColumn::Type.cell(&item(&[], false), &catalog),
            Cell::Text("JOHDONSUOJA 1-NAP".into())
        );
        assert_eq!(
            SummaryColumn::Quantity.cell(&item(&[], false), &catalog),
            Cell::Number(4.0)
        );
    }
}
