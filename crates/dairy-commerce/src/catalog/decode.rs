//! Decoders for catalog responses.
//!
//! Catalog endpoints disagree on field names: the category endpoints answer
//! with a capitalised set (`ID`, `Name`, `Rate`, `GSTPercent`) while the
//! rate-card endpoint answers in snake_case (`product_id`, `product_name`,
//! `per_item_rate`, `gst_rate`). Each shape has its own decoder; both feed
//! [`normalize_record`], which is the only place a [`ProductOption`] is built.

use crate::catalog::ProductOption;
use crate::ids::{deserialize_id_string, ProductId};
use crate::money::{Currency, Money};
use serde::{Deserialize, Deserializer};
use serde_json::Value;

/// Fields recovered from a single catalog record, whatever its shape.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RecordFields {
    pub id: Option<String>,
    pub name: Option<String>,
    pub rate: Option<f64>,
    pub gst_rate: Option<f64>,
    pub photo_url: Option<String>,
}

impl RecordFields {
    /// Fill gaps in `self` from `other`.
    ///
    /// Zero rates and blank strings count as gaps.
    pub fn or(self, other: RecordFields) -> RecordFields {
        RecordFields {
            id: non_blank(self.id).or_else(|| non_blank(other.id)),
            name: non_blank(self.name).or_else(|| non_blank(other.name)),
            rate: non_zero(self.rate).or(other.rate),
            gst_rate: non_zero(self.gst_rate).or(other.gst_rate),
            photo_url: non_blank(self.photo_url).or_else(|| non_blank(other.photo_url)),
        }
    }
}

/// Record shape used by the `byCategory` endpoints.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct CapitalizedRecord {
    #[serde(rename = "ID", deserialize_with = "lenient_id")]
    pub id: Option<String>,
    #[serde(rename = "Name")]
    pub name: Option<String>,
    #[serde(rename = "Rate", deserialize_with = "lenient_number")]
    pub rate: Option<f64>,
    #[serde(rename = "GSTPercent", deserialize_with = "lenient_number")]
    pub gst_percent: Option<f64>,
    pub photo_url: Option<String>,
}

impl From<CapitalizedRecord> for RecordFields {
    fn from(r: CapitalizedRecord) -> Self {
        RecordFields {
            id: r.id,
            name: r.name,
            rate: r.rate,
            gst_rate: r.gst_percent,
            photo_url: r.photo_url,
        }
    }
}

/// Record shape used by the `getRatesWithPhoto` endpoint.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct SnakeCaseRecord {
    #[serde(deserialize_with = "lenient_id")]
    pub product_id: Option<String>,
    pub product_name: Option<String>,
    #[serde(deserialize_with = "lenient_number")]
    pub per_item_rate: Option<f64>,
    #[serde(deserialize_with = "lenient_number")]
    pub gst_rate: Option<f64>,
    pub photo_url: Option<String>,
}

impl From<SnakeCaseRecord> for RecordFields {
    fn from(r: SnakeCaseRecord) -> Self {
        RecordFields {
            id: r.product_id,
            name: r.product_name,
            rate: r.per_item_rate,
            gst_rate: r.gst_rate,
            photo_url: r.photo_url,
        }
    }
}

/// Decode one raw record with both decoders, capitalised fields first.
pub fn decode_record(raw: &Value) -> RecordFields {
    if !raw.is_object() {
        return RecordFields::default();
    }
    let capitalized: RecordFields = CapitalizedRecord::deserialize(raw)
        .map(RecordFields::from)
        .unwrap_or_default();
    let snake: RecordFields = SnakeCaseRecord::deserialize(raw)
        .map(RecordFields::from)
        .unwrap_or_default();
    capitalized.or(snake)
}

/// Build the canonical option from decoded fields.
///
/// Returns `None` when the record has no id.
pub fn normalize_record(fields: RecordFields, currency: Currency) -> Option<ProductOption> {
    let id = non_blank(fields.id)?;
    Some(ProductOption {
        id: ProductId::new(id),
        name: fields.name.unwrap_or_default(),
        price: Money::from_decimal(fields.rate.unwrap_or(0.0), currency),
        gst_rate: fields.gst_rate.unwrap_or(0.0),
        image_url: fields.photo_url.unwrap_or_default(),
    })
}

/// Normalise a catalog response envelope (`{ "data": [...] }`).
///
/// Anything that is not an envelope with a `data` array yields an empty list.
pub fn normalize_catalog(body: &Value, currency: Currency) -> Vec<ProductOption> {
    let Some(records) = body.get("data").and_then(Value::as_array) else {
        tracing::debug!("catalog response without a data array");
        return Vec::new();
    };

    let options: Vec<ProductOption> = records
        .iter()
        .filter_map(|raw| normalize_record(decode_record(raw), currency))
        .collect();

    if options.len() < records.len() {
        tracing::debug!(
            dropped = records.len() - options.len(),
            "catalog records without an id were dropped"
        );
    }
    options
}

fn non_blank(value: Option<String>) -> Option<String> {
    value.filter(|s| !s.trim().is_empty())
}

fn non_zero(value: Option<f64>) -> Option<f64> {
    value.filter(|v| *v != 0.0)
}

fn lenient_id<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<String>, D::Error> {
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(value.and_then(|v| deserialize_id_string(v).ok()))
}

fn lenient_number<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<f64>, D::Error> {
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(match value {
        Some(Value::Number(n)) => n.as_f64(),
        Some(Value::String(s)) => s.trim().parse().ok(),
        _ => None,
    })
}
