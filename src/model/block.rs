//! Positioned blocks on a bulletin page

use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::geometry::{normalize_degrees, BoundingBox, Point, RotationTransform};

use super::data::BlockData;
use super::number;

/// Opaque block identifier, stable for the block's lifetime
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct BlockId(pub String);

impl BlockId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// A fresh random (v4 UUID) identifier
    pub fn generate() -> Self {
        Self(uuid::Uuid::new_v4().to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for BlockId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for BlockId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl From<String> for BlockId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

/// The geometric fields of a block: pre-rotation rectangle plus rotation
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BlockGeometry {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
    /// Degrees clockwise about the rectangle's center
    pub rotation: f64,
}

impl BlockGeometry {
    pub fn new(x: f64, y: f64, width: f64, height: f64, rotation: f64) -> Self {
        Self {
            x,
            y,
            width,
            height,
            rotation,
        }
    }

    /// The unrotated rectangle
    pub fn rect(&self) -> BoundingBox {
        BoundingBox::new(self.x, self.y, self.width, self.height)
    }

    pub fn center(&self) -> Point {
        self.rect().center()
    }

    /// Rotation about this geometry's own center
    pub fn transform(&self) -> RotationTransform {
        RotationTransform::about_center_of(&self.rect(), self.rotation)
    }

    /// Screen position of the point at fractional position `(fx, fy)` of the
    /// unrotated rectangle, after rotation about the center
    pub fn screen_point(&self, fx: f64, fy: f64) -> Point {
        self.transform().transform_point(self.rect().point_at(fx, fy))
    }

    /// Axis-aligned box of the rotated rectangle
    pub fn screen_bounds(&self) -> BoundingBox {
        self.transform().transform_bounds(&self.rect())
    }
}

/// A positioned rectangle on a page.
///
/// Serialized as a flat JSON object:
/// `{"id", "type", "x", "y", "width", "height", "rotation"?, "zIndex", "data"}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawBlock", into = "RawBlock")]
pub struct Block {
    pub id: BlockId,
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
    /// Degrees clockwise about the center; absent means 0
    pub rotation: Option<f64>,
    /// Paint order among siblings; ties resolve by insertion order
    pub z_index: i32,
    pub data: BlockData,
}

impl Block {
    /// Create an unrotated block with a fresh id
    pub fn new(data: BlockData, x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            id: BlockId::generate(),
            x,
            y,
            width,
            height,
            rotation: None,
            z_index: 0,
            data,
        }
    }

    pub fn with_id(mut self, id: impl Into<BlockId>) -> Self {
        self.id = id.into();
        self
    }

    /// Set the rotation, normalized into `[0, 360)`
    pub fn with_rotation(mut self, degrees: f64) -> Self {
        self.rotation = Some(normalize_degrees(degrees));
        self
    }

    pub fn with_z_index(mut self, z_index: i32) -> Self {
        self.z_index = z_index;
        self
    }

    /// The `type` tag of this block
    pub fn type_name(&self) -> &str {
        self.data.type_name()
    }

    /// Effective rotation in degrees
    pub fn rotation(&self) -> f64 {
        self.rotation.unwrap_or(0.0)
    }

    pub fn geometry(&self) -> BlockGeometry {
        BlockGeometry::new(self.x, self.y, self.width, self.height, self.rotation())
    }

    /// Overwrite position and size. Rotation is left alone when it matches,
    /// so an absent rotation stays absent.
    pub fn set_geometry(&mut self, geometry: BlockGeometry) {
        self.x = geometry.x;
        self.y = geometry.y;
        self.width = geometry.width;
        self.height = geometry.height;
        if geometry.rotation != self.rotation() {
            self.rotation = Some(normalize_degrees(geometry.rotation));
        }
    }

    /// The unrotated rectangle
    pub fn rect(&self) -> BoundingBox {
        BoundingBox::new(self.x, self.y, self.width, self.height)
    }
}

/// Wire form of a block
#[derive(Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawBlock {
    id: BlockId,
    #[serde(rename = "type")]
    kind: String,
    #[serde(serialize_with = "number::serialize")]
    x: f64,
    #[serde(serialize_with = "number::serialize")]
    y: f64,
    #[serde(serialize_with = "number::serialize")]
    width: f64,
    #[serde(serialize_with = "number::serialize")]
    height: f64,
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        serialize_with = "number::serialize_option"
    )]
    rotation: Option<f64>,
    #[serde(default)]
    z_index: i32,
    #[serde(default, skip_serializing_if = "Value::is_null")]
    data: Value,
}

impl TryFrom<RawBlock> for Block {
    type Error = serde_json::Error;

    fn try_from(raw: RawBlock) -> Result<Self, Self::Error> {
        Ok(Block {
            data: BlockData::from_parts(&raw.kind, raw.data)?,
            id: raw.id,
            x: raw.x,
            y: raw.y,
            width: raw.width,
            height: raw.height,
            rotation: raw.rotation,
            z_index: raw.z_index,
        })
    }
}

impl From<Block> for RawBlock {
    fn from(block: Block) -> Self {
        let type_name = block.type_name().to_string();
        // Typed payloads are plain structs; converting them to a Value cannot fail
        let data = block
            .data
            .into_parts()
            .map(|(_, value)| value)
            .unwrap_or(Value::Null);
        RawBlock {
            id: block.id,
            kind: type_name,
            x: block.x,
            y: block.y,
            width: block.width,
            height: block.height,
            rotation: block.rotation,
            z_index: block.z_index,
            data,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::data::{QrData, TextData};
    use serde_json::json;

    fn text(content: &str) -> BlockData {
        BlockData::Text(TextData {
            content: Some(content.to_string()),
            ..Default::default()
        })
    }

    #[test]
    fn test_block_id_conversions() {
        assert_eq!(BlockId::from("a"), BlockId::from(String::from("a")));
        assert_eq!(BlockId::from("a").as_str(), "a");
    }

    #[test]
    fn test_generated_ids_are_unique() {
        let a = Block::new(text("a"), 0.0, 0.0, 10.0, 10.0);
        let b = Block::new(text("b"), 0.0, 0.0, 10.0, 10.0);
        assert_ne!(a.id, b.id);
    }

    #[test]
    fn test_rotation_defaults_to_zero() {
        let block = Block::new(text("a"), 0.0, 0.0, 10.0, 10.0);
        assert_eq!(block.rotation, None);
        assert_eq!(block.rotation(), 0.0);
        assert_eq!(block.with_rotation(-45.0).rotation, Some(315.0));
    }

    #[test]
    fn test_serialized_shape() {
        let block = Block::new(
            BlockData::Qr(QrData {
                url: Some("https://give.example.org".into()),
                ..Default::default()
            }),
            10.0,
            20.0,
            120.0,
            120.0,
        )
        .with_id("qr-1")
        .with_z_index(3);

        let value = serde_json::to_value(&block).unwrap();
        assert_eq!(
            value,
            json!({
                "id": "qr-1",
                "type": "qr",
                "x": 10,
                "y": 20,
                "width": 120,
                "height": 120,
                "zIndex": 3,
                "data": {"url": "https://give.example.org"}
            })
        );
    }

    #[test]
    fn test_deserialize_with_rotation_and_missing_data() {
        let block: Block = serde_json::from_value(json!({
            "id": "b1",
            "type": "announcements",
            "x": 1, "y": 2, "width": 3, "height": 4,
            "rotation": 15
        }))
        .unwrap();
        assert_eq!(block.rotation, Some(15.0));
        assert_eq!(block.z_index, 0);
        assert_eq!(block.type_name(), "announcements");

        let written = serde_json::to_value(&block).unwrap();
        assert!(written.get("data").is_none());
        assert_eq!(written["rotation"], json!(15));
    }

    #[test]
    fn test_set_geometry_keeps_absent_rotation() {
        let mut block = Block::new(text("a"), 0.0, 0.0, 10.0, 10.0);
        block.set_geometry(BlockGeometry::new(5.0, 6.0, 30.0, 40.0, 0.0));
        assert_eq!(block.rotation, None);
        assert_eq!(block.rect(), BoundingBox::new(5.0, 6.0, 30.0, 40.0));
    }

    #[test]
    fn test_screen_point_of_rotated_geometry() {
        let g = BlockGeometry::new(0.0, 0.0, 100.0, 100.0, 90.0);
        // After 90° clockwise the top-left corner lands at the top-right
        let p = g.screen_point(0.0, 0.0);
        assert!((p.x - 100.0).abs() < 1e-9, "x {}", p.x);
        assert!(p.y.abs() < 1e-9, "y {}", p.y);
    }
}
