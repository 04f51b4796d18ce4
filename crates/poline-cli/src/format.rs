//! Output rendering for extracted line items.

use poline_core::models::amount::{format_amount, sum_amounts};
use poline_core::models::config;
use poline_core::{FIELDS, LineRecord};
use serde::Serialize;

#[derive(Clone, Copy, Debug, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    /// JSON array of records
    Json,
    /// CSV with a fixed header row
    Csv,
    /// XML document
    Xml,
    /// Plain text table with totals
    Text,
}

impl OutputFormat {
    /// File extension for this format.
    pub fn extension(self) -> &'static str {
        match self {
            OutputFormat::Json => "json",
            OutputFormat::Csv => "csv",
            OutputFormat::Xml => "xml",
            OutputFormat::Text => "txt",
        }
    }
}

impl From<config::OutputFormat> for OutputFormat {
    fn from(format: config::OutputFormat) -> Self {
        match format {
            config::OutputFormat::Json => OutputFormat::Json,
            config::OutputFormat::Csv => OutputFormat::Csv,
            config::OutputFormat::Xml => OutputFormat::Xml,
            config::OutputFormat::Text => OutputFormat::Text,
        }
    }
}

/// Render records in the requested format.
pub fn format_records(
    records: &[LineRecord],
    format: OutputFormat,
    pretty: bool,
) -> anyhow::Result<String> {
    match format {
        OutputFormat::Json if pretty => Ok(serde_json::to_string_pretty(records)?),
        OutputFormat::Json => Ok(serde_json::to_string(records)?),
        OutputFormat::Csv => format_csv(records),
        OutputFormat::Xml => format_xml(records),
        OutputFormat::Text => Ok(format_text(records)),
    }
}

fn format_csv(records: &[LineRecord]) -> anyhow::Result<String> {
    let mut wtr = csv::Writer::from_writer(vec![]);

    // Header is written even when there are no records
    wtr.write_record(FIELDS)?;
    for record in records {
        wtr.write_record(record.to_row())?;
    }

    let data = String::from_utf8(wtr.into_inner()?)?;
    Ok(data)
}

#[derive(Serialize)]
#[serde(rename = "records")]
struct XmlRecords<'a> {
    record: Vec<XmlRecord<'a>>,
}

#[derive(Serialize)]
#[serde(rename_all = "PascalCase")]
struct XmlRecord<'a> {
    main_line: &'a str,
    sub_line: &'a str,
    part_no: &'a str,
    description: &'a str,
    quantity: &'a str,
    unit_of_measure: &'a str,
    unit_price: &'a str,
    extended_amount: &'a str,
}

impl<'a> From<&'a LineRecord> for XmlRecord<'a> {
    fn from(record: &'a LineRecord) -> Self {
        Self {
            main_line: &record.main_line,
            sub_line: &record.sub_line,
            part_no: &record.part_no,
            description: &record.description,
            quantity: &record.quantity,
            unit_of_measure: &record.unit_of_measure,
            unit_price: &record.unit_price,
            extended_amount: &record.extended_amount,
        }
    }
}

fn format_xml(records: &[LineRecord]) -> anyhow::Result<String> {
    let document = XmlRecords {
        record: records.iter().map(XmlRecord::from).collect(),
    };

    let body = quick_xml::se::to_string(&document)?;
    Ok(format!("<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n{}\n", body))
}

fn format_text(records: &[LineRecord]) -> String {
    let rows: Vec<[&str; 8]> = records.iter().map(LineRecord::to_row).collect();

    let mut widths = FIELDS.map(|f| f.chars().count());
    for row in &rows {
        for (width, cell) in widths.iter_mut().zip(row.iter()) {
            *width = (*width).max(cell.chars().count());
        }
    }

    let mut output = String::new();
    push_row(&mut output, &FIELDS, &widths);
    let rule: Vec<String> = widths.iter().map(|w| "-".repeat(*w)).collect();
    output.push_str(rule.join("  ").trim_end());
    output.push('\n');
    for row in &rows {
        push_row(&mut output, row, &widths);
    }

    let (total, skipped) = sum_amounts(records.iter().map(|r| r.extended_amount.as_str()));
    output.push('\n');
    output.push_str(&format!("Records: {}\n", records.len()));
    output.push_str(&format!("Extended total: {}\n", format_amount(total)));
    if skipped > 0 {
        output.push_str(&format!("Unparsed amounts: {}\n", skipped));
    }

    output
}

fn push_row(output: &mut String, cells: &[&str; 8], widths: &[usize; 8]) {
    let line: Vec<String> = cells
        .iter()
        .zip(widths.iter())
        .map(|(cell, width)| format!("{:<width$}", cell, width = *width))
        .collect();
    output.push_str(line.join("  ").trim_end());
    output.push('\n');
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn records() -> Vec<LineRecord> {
        vec![
            LineRecord {
                main_line: "1".to_string(),
                sub_line: "1.1".to_string(),
                part_no: "ABC-100".to_string(),
                description: "Widget, red".to_string(),
                quantity: "10".to_string(),
                unit_of_measure: "EA".to_string(),
                unit_price: "5.00".to_string(),
                extended_amount: "50.00".to_string(),
            },
            LineRecord {
                main_line: "2".to_string(),
                sub_line: "2.1".to_string(),
                part_no: "XYZ-1".to_string(),
                description: "Gadget & bracket".to_string(),
                quantity: "5".to_string(),
                unit_of_measure: "EA".to_string(),
                unit_price: "1,000.00".to_string(),
                extended_amount: "5,000.00".to_string(),
            },
        ]
    }

    #[test]
    fn test_csv_header_and_rows() {
        let csv = format_records(&records(), OutputFormat::Csv, false).unwrap();
        let lines: Vec<&str> = csv.lines().collect();

        assert_eq!(
            lines[0],
            "Main Line,Sub Line,CPS Part No.,Part Description,Sales Qty,UoM,Unit Net Price,Extended Amount"
        );
        assert_eq!(lines[1], "1,1.1,ABC-100,\"Widget, red\",10,EA,5.00,50.00");
        assert_eq!(lines.len(), 3);
    }

    #[test]
    fn test_csv_empty_still_has_header() {
        let csv = format_records(&[], OutputFormat::Csv, false).unwrap();
        assert_eq!(csv.lines().count(), 1);
        assert!(csv.starts_with("Main Line,"));
    }

    #[test]
    fn test_json_round_trip() {
        let json = format_records(&records(), OutputFormat::Json, true).unwrap();
        let parsed: Vec<LineRecord> = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, records());
    }

    #[test]
    fn test_json_compact_is_single_line() {
        let json = format_records(&records(), OutputFormat::Json, false).unwrap();
        assert_eq!(json.lines().count(), 1);
        assert!(json.starts_with("[{\"Main Line\":\"1\""));
    }

    #[test]
    fn test_xml_elements() {
        let xml = format_records(&records(), OutputFormat::Xml, false).unwrap();

        assert!(xml.starts_with("<?xml"));
        assert!(xml.contains("<records><record><MainLine>1</MainLine><SubLine>1.1</SubLine>"));
        assert!(xml.contains("<PartNo>XYZ-1</PartNo>"));
        assert!(xml.contains("Gadget &amp; bracket"));
        assert_eq!(xml.matches("<record>").count(), 2);
    }

    #[test]
    fn test_text_table_totals() {
        let text = format_records(&records(), OutputFormat::Text, false).unwrap();

        assert!(text.starts_with("Main Line  Sub Line  CPS Part No."));
        assert!(text.contains("Records: 2\n"));
        assert!(text.contains("Extended total: 5,050.00\n"));
        assert!(!text.contains("Unparsed"));
    }

    #[test]
    fn test_extension() {
        assert_eq!(OutputFormat::Text.extension(), "txt");
        assert_eq!(OutputFormat::from(config::OutputFormat::Xml), OutputFormat::Xml);
    }
}
