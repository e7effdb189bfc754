//! Type-specific block payloads
//!
//! The geometry core never looks inside these; they exist so renderers and
//! type-specific editors get typed fields. In the JSON document the payload
//! sits under `data` and its shape is selected by the sibling `type` tag.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TextAlign {
    Left,
    Center,
    Right,
    Justify,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct TextData {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub align: Option<TextAlign>,
    #[serde(
        skip_serializing_if = "Option::is_none",
        serialize_with = "super::number::serialize_option"
    )]
    pub font_size: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bold: Option<bool>,
    /// Payload keys without a typed field, kept as-is
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ServiceItemsData {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub show_times: Option<bool>,
    /// Payload keys without a typed field, kept as-is
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct GivingData {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub show_qr: Option<bool>,
    /// Payload keys without a typed field, kept as-is
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct AnnouncementsData {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_items: Option<u32>,
    /// Payload keys without a typed field, kept as-is
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct EventsData {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_items: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub days_ahead: Option<u32>,
    /// Payload keys without a typed field, kept as-is
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ContactInfoData {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub church_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub website: Option<String>,
    /// Payload keys without a typed field, kept as-is
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct QrData {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub caption: Option<String>,
    /// Payload keys without a typed field, kept as-is
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ImageFit {
    Contain,
    Cover,
    Fill,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ImageData {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub src: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub alt: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fit: Option<ImageFit>,
    /// Payload keys without a typed field, kept as-is
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// A block payload, tagged by the block's `type`
#[derive(Debug, Clone, PartialEq)]
pub enum BlockData {
    Text(TextData),
    ServiceItems(ServiceItemsData),
    Giving(GivingData),
    Announcements(AnnouncementsData),
    Events(EventsData),
    ContactInfo(ContactInfoData),
    Qr(QrData),
    Image(ImageData),
    /// Payload kept verbatim: a type with no typed payload, or a block
    /// that carries no `data` at all (`Value::Null`)
    Custom { type_name: String, data: Value },
}

impl BlockData {
    /// The `type` tag written to the layout document
    pub fn type_name(&self) -> &str {
        match self {
            BlockData::Text(_) => "text",
            BlockData::ServiceItems(_) => "serviceItems",
            BlockData::Giving(_) => "giving",
            BlockData::Announcements(_) => "announcements",
            BlockData::Events(_) => "events",
            BlockData::ContactInfo(_) => "contactInfo",
            BlockData::Qr(_) => "qr",
            BlockData::Image(_) => "image",
            BlockData::Custom { type_name, .. } => type_name,
        }
    }

    /// Build a payload from its `type` tag and raw `data` value.
    ///
    /// Known types get their typed payload. A block without a payload
    /// (`null`) stays untyped so it is written back without one.
    pub fn from_parts(type_name: &str, data: Value) -> Result<Self, serde_json::Error> {
        if data.is_null() {
            return Ok(BlockData::Custom {
                type_name: type_name.to_string(),
                data,
            });
        }

        Ok(match type_name {
            "text" => BlockData::Text(serde_json::from_value(data)?),
            "serviceItems" => BlockData::ServiceItems(serde_json::from_value(data)?),
            "giving" => BlockData::Giving(serde_json::from_value(data)?),
            "announcements" => BlockData::Announcements(serde_json::from_value(data)?),
            "events" => BlockData::Events(serde_json::from_value(data)?),
            "contactInfo" => BlockData::ContactInfo(serde_json::from_value(data)?),
            "qr" => BlockData::Qr(serde_json::from_value(data)?),
            "image" => BlockData::Image(serde_json::from_value(data)?),
            other => BlockData::Custom {
                type_name: other.to_string(),
                data,
            },
        })
    }

    /// Split into the `type` tag and the raw `data` value
    pub fn into_parts(self) -> Result<(String, Value), serde_json::Error> {
        let type_name = self.type_name().to_string();
        let value = match self {
            BlockData::Text(d) => serde_json::to_value(d)?,
            BlockData::ServiceItems(d) => serde_json::to_value(d)?,
            BlockData::Giving(d) => serde_json::to_value(d)?,
            BlockData::Announcements(d) => serde_json::to_value(d)?,
            BlockData::Events(d) => serde_json::to_value(d)?,
            BlockData::ContactInfo(d) => serde_json::to_value(d)?,
            BlockData::Qr(d) => serde_json::to_value(d)?,
            BlockData::Image(d) => serde_json::to_value(d)?,
            BlockData::Custom { data, .. } => data,
        };
        Ok((type_name, value))
    }

    /// Short human-readable caption used by previews
    pub fn caption(&self) -> String {
        let titled = |title: &Option<String>, fallback: &str| {
            title.clone().unwrap_or_else(|| fallback.to_string())
        };
        match self {
            BlockData::Text(d) => d.content.clone().unwrap_or_default(),
            BlockData::ServiceItems(d) => titled(&d.title, "Order of Service"),
            BlockData::Giving(d) => titled(&d.title, "Giving"),
            BlockData::Announcements(d) => titled(&d.title, "Announcements"),
            BlockData::Events(d) => titled(&d.title, "Events"),
            BlockData::ContactInfo(d) => titled(&d.church_name, "Contact"),
            BlockData::Qr(d) => titled(&d.caption.clone().or_else(|| d.url.clone()), "QR code"),
            BlockData::Image(d) => titled(&d.alt.clone().or_else(|| d.src.clone()), "Image"),
            BlockData::Custom { type_name, .. } => type_name.clone(),
        }
    }
}
