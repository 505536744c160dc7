//! Attraction records as returned by the Taipei travel open-data API.
//!
//! The upstream `GET {base}/{lang}/Attractions/All?page={n}` endpoint answers
//! with `{"total": <n>, "data": [ ... ]}`. Each record keeps the JSON object
//! it was read from and serializes back to exactly that object. The typed
//! fields are a lenient view over it: only `id` and `name` are mandatory,
//! numbers may arrive as strings, and anything absent, `null`, or of an
//! unexpected type falls back to its default.

use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::{Map, Value};

/// Image shown on a card when an attraction carries no photos.
pub const PLACEHOLDER_IMAGE_URL: &str =
    "https://images.unsplash.com/photo-1513413173476-2aa219808396?auto=format&fit=crop&w=800&q=80";

/// Text shown on a card when an attraction has no introduction.
pub const PLACEHOLDER_INTRODUCTION: &str = "這是一個充滿故事的台北景點，等待您的親自探訪。";

/// One page of attractions.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PageResult {
    #[serde(default, deserialize_with = "lenient_total")]
    pub total: u64,
    pub data: Vec<Attraction>,
}

/// Small `{id, name}` pair used for category, target, service, and
/// friendly-facility tags.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Tag {
    pub id: i64,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AttractionImage {
    pub src: String,
    pub subject: String,
    pub ext: String,
}

/// A single tourist-site record.
#[derive(Debug, Clone, PartialEq)]
pub struct Attraction {
    pub id: i64,
    pub name: String,
    pub name_zh: Option<String>,
    pub open_status: i64,
    pub introduction: String,
    pub open_time: String,
    pub zipcode: String,
    /// District name. The upstream field is spelled `distric`.
    pub distric: String,
    pub address: String,
    pub tel: String,
    pub fax: String,
    pub email: String,
    pub months: String,
    /// Latitude.
    pub nlat: f64,
    /// Longitude.
    pub elong: f64,
    pub official_site: String,
    pub facebook: String,
    pub ticket: String,
    pub remind: String,
    pub staytime: String,
    pub modified: String,
    /// Canonical detail page on travel.taipei.
    pub url: String,
    pub category: Vec<Tag>,
    pub target: Vec<Tag>,
    pub service: Vec<Tag>,
    pub friendly: Vec<Tag>,
    pub images: Vec<AttractionImage>,
    pub links: Vec<Value>,
    raw_data: Value,
}

impl Attraction {
    /// Reads a record from its upstream JSON object.
    ///
    /// # Errors
    ///
    /// Returns a description of the problem when `value` is not an object,
    /// `id` is not an integer (or a string holding one), or `name` is not a
    /// string.
    pub fn from_value(value: Value) -> Result<Self, String> {
        let record = value
            .as_object()
            .ok_or_else(|| format!("expected an object, found {}", kind(&value)))?;

        let id = record
            .get("id")
            .and_then(value_as_i64)
            .ok_or_else(|| "`id` is missing or not an integer".to_owned())?;
        let name = record
            .get("name")
            .and_then(Value::as_str)
            .map(str::to_string)
            .ok_or_else(|| format!("record {id}: `name` is missing or not a string"))?;

        Ok(Self {
            id,
            name,
            name_zh: record
                .get("name_zh")
                .and_then(Value::as_str)
                .map(str::to_string),
            open_status: record.get("open_status").and_then(value_as_i64).unwrap_or(0),
            introduction: text(record, "introduction"),
            open_time: text(record, "open_time"),
            zipcode: text(record, "zipcode"),
            distric: text(record, "distric"),
            address: text(record, "address"),
            tel: text(record, "tel"),
            fax: text(record, "fax"),
            email: text(record, "email"),
            months: text(record, "months"),
            nlat: record.get("nlat").and_then(value_as_f64).unwrap_or(0.0),
            elong: record.get("elong").and_then(value_as_f64).unwrap_or(0.0),
            official_site: text(record, "official_site"),
            facebook: text(record, "facebook"),
            ticket: text(record, "ticket"),
            remind: text(record, "remind"),
            staytime: text(record, "staytime"),
            modified: text(record, "modified"),
            url: text(record, "url"),
            category: tags(record, "category"),
            target: tags(record, "target"),
            service: tags(record, "service"),
            friendly: tags(record, "friendly"),
            images: items(record, "images")
                .map(|image| AttractionImage {
                    src: text(image, "src"),
                    subject: text(image, "subject"),
                    ext: text(image, "ext"),
                })
                .collect(),
            links: record
                .get("links")
                .and_then(Value::as_array)
                .cloned()
                .unwrap_or_default(),
            raw_data: value,
        })
    }

    /// The upstream object this record was read from, unmodified.
    #[must_use]
    pub fn raw_data(&self) -> &Value {
        &self.raw_data
    }

    /// Returns `true` when `keyword` occurs in the name or introduction,
    /// ignoring case. An empty or whitespace-only keyword matches everything.
    #[must_use]
    pub fn matches_keyword(&self, keyword: &str) -> bool {
        if keyword.trim().is_empty() {
            return true;
        }
        let needle = keyword.to_lowercase();
        self.name.to_lowercase().contains(&needle)
            || self.introduction.to_lowercase().contains(&needle)
    }

    /// First image URL, or [`PLACEHOLDER_IMAGE_URL`] when there are none.
    #[must_use]
    pub fn cover_image(&self) -> &str {
        self.images
            .first()
            .map(|img| img.src.as_str())
            .filter(|src| !src.is_empty())
            .unwrap_or(PLACEHOLDER_IMAGE_URL)
    }

    #[must_use]
    pub fn primary_category(&self) -> Option<&str> {
        self.category.first().map(|tag| tag.name.as_str())
    }

    #[must_use]
    pub fn introduction_or_placeholder(&self) -> &str {
        if self.introduction.trim().is_empty() {
            PLACEHOLDER_INTRODUCTION
        } else {
            &self.introduction
        }
    }
}

impl<'de> Deserialize<'de> for Attraction {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value = Value::deserialize(deserializer)?;
        Self::from_value(value).map_err(D::Error::custom)
    }
}

impl Serialize for Attraction {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.raw_data.serialize(serializer)
    }
}

/// String field as text. Numbers and booleans are rendered; anything else
/// is empty.
fn text(record: &Map<String, Value>, key: &str) -> String {
    match record.get(key) {
        Some(Value::String(s)) => s.clone(),
        Some(Value::Number(n)) => n.to_string(),
        Some(Value::Bool(b)) => b.to_string(),
        _ => String::new(),
    }
}

/// Objects in the array under `key`; non-object entries are skipped.
fn items<'a>(
    record: &'a Map<String, Value>,
    key: &str,
) -> impl Iterator<Item = &'a Map<String, Value>> {
    record
        .get(key)
        .and_then(Value::as_array)
        .into_iter()
        .flatten()
        .filter_map(Value::as_object)
}

/// Tags under `key`. Entries without a usable `id` are skipped.
fn tags(record: &Map<String, Value>, key: &str) -> Vec<Tag> {
    items(record, key)
        .filter_map(|tag| {
            Some(Tag {
                id: tag.get("id").and_then(value_as_i64)?,
                name: text(tag, "name"),
            })
        })
        .collect()
}

fn value_as_i64(value: &Value) -> Option<i64> {
    value
        .as_i64()
        .or_else(|| value.as_str().and_then(|v| v.trim().parse::<i64>().ok()))
}

fn value_as_f64(value: &Value) -> Option<f64> {
    value
        .as_f64()
        .or_else(|| value.as_str().and_then(|v| v.trim().parse::<f64>().ok()))
}

fn kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

/// `total` as reported upstream; unreadable values count as zero.
fn lenient_total<'de, D: Deserializer<'de>>(deserializer: D) -> Result<u64, D::Error> {
    let value = Value::deserialize(deserializer)?;
    Ok(value
        .as_u64()
        .or_else(|| value.as_str().and_then(|v| v.trim().parse::<u64>().ok()))
        .unwrap_or(0))
}
