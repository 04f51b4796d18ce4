//! Line-item record model.

use serde::{Deserialize, Serialize};

/// Output field names, in the fixed column order used by every serializer.
pub const FIELDS: [&str; 8] = [
    "Main Line",
    "Sub Line",
    "CPS Part No.",
    "Part Description",
    "Sales Qty",
    "UoM",
    "Unit Net Price",
    "Extended Amount",
];

/// One purchase-order line item, assembled from a description line and the
/// detail line that follows it.
///
/// Every field is kept exactly as it appeared in the source text. Numeric
/// interpretation is left to the consumer (see [`crate::models::amount`]).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct LineRecord {
    /// Top-level line number.
    #[serde(rename = "Main Line")]
    pub main_line: String,

    /// Sub-line number (e.g. "1.1").
    #[serde(rename = "Sub Line")]
    pub sub_line: String,

    /// Part identifier.
    #[serde(rename = "CPS Part No.")]
    pub part_no: String,

    /// Free-text part description from the detail line.
    #[serde(rename = "Part Description")]
    pub description: String,

    /// Ordered quantity.
    #[serde(rename = "Sales Qty")]
    pub quantity: String,

    /// Unit of measure.
    #[serde(rename = "UoM")]
    pub unit_of_measure: String,

    /// Unit price without the currency symbol.
    #[serde(rename = "Unit Net Price")]
    pub unit_price: String,

    /// Extended amount without the currency symbol.
    #[serde(rename = "Extended Amount")]
    pub extended_amount: String,
}

impl LineRecord {
    /// Field values in [`FIELDS`] order.
    pub fn to_row(&self) -> [&str; 8] {
        [
            &self.main_line,
            &self.sub_line,
            &self.part_no,
            &self.description,
            &self.quantity,
            &self.unit_of_measure,
            &self.unit_price,
            &self.extended_amount,
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn sample() -> LineRecord {
        LineRecord {
            main_line: "1".to_string(),
            sub_line: "1.1".to_string(),
            part_no: "ABC-100".to_string(),
            description: "Widget, red".to_string(),
            quantity: "10".to_string(),
            unit_of_measure: "EA".to_string(),
            unit_price: "5.00".to_string(),
            extended_amount: "50.00".to_string(),
        }
    }

    #[test]
    fn test_row_follows_field_order() {
        let record = sample();
        assert_eq!(
            record.to_row(),
            ["1", "1.1", "ABC-100", "Widget, red", "10", "EA", "5.00", "50.00"]
        );
    }

    #[test]
    fn test_json_keys_use_output_names_in_order() {
        let json = serde_json::to_string(&sample()).unwrap();

        let positions: Vec<usize> = FIELDS
            .iter()
            .map(|name| json.find(&format!("\"{}\"", name)).unwrap())
            .collect();
        let mut sorted = positions.clone();
        sorted.sort_unstable();

        assert_eq!(positions, sorted);
    }

    #[test]
    fn test_json_deserialize() {
        let json = r#"{
            "Main Line": "2",
            "Sub Line": "2.1",
            "CPS Part No.": "XYZ-1",
            "Part Description": "Gadget",
            "Sales Qty": "5",
            "UoM": "EA",
            "Unit Net Price": "1.00",
            "Extended Amount": "5.00"
        }"#;

        let record: LineRecord = serde_json::from_str(json).unwrap();
        assert_eq!(record.part_no, "XYZ-1");
        assert_eq!(record.description, "Gadget");
    }
}
