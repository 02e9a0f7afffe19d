use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Abstract column types understood by the type mapper.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AttrType {
    Binary,
    String,
    Array,
    Json,
    Text,
    Boolean,
    Integer,
    Float,
    Date,
    Time,
    DateTime,
}

impl FromStr for AttrType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "binary" => Ok(AttrType::Binary),
            "string" => Ok(AttrType::String),
            "array" => Ok(AttrType::Array),
            "json" => Ok(AttrType::Json),
            "text" => Ok(AttrType::Text),
            "boolean" => Ok(AttrType::Boolean),
            "int" | "integer" => Ok(AttrType::Integer),
            "float" | "double" => Ok(AttrType::Float),
            "date" => Ok(AttrType::Date),
            "time" => Ok(AttrType::Time),
            "datetime" => Ok(AttrType::DateTime),
            _ => Err(s.to_string()),
        }
    }
}

/// Definition of one attribute (column).
///
/// Deserializes from either a full object or a bare type string
/// (`"age": "integer"`).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", from = "AttributeSpec")]
pub struct AttributeDef {
    #[serde(rename = "type")]
    pub attr_type: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub size: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub primary_key: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub unique: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub auto_increment: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub nullable: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub indexed: Option<bool>,
}

impl AttributeDef {
    pub fn new(attr_type: impl Into<String>) -> Self {
        Self {
            attr_type: attr_type.into(),
            ..Default::default()
        }
    }

    pub fn size(mut self, size: u32) -> Self {
        self.size = Some(size);
        self
    }

    pub fn primary_key(mut self) -> Self {
        self.primary_key = Some(true);
        self
    }

    pub fn unique(mut self) -> Self {
        self.unique = Some(true);
        self
    }

    pub fn not_null(mut self) -> Self {
        self.nullable = Some(false);
        self
    }

    pub fn is_primary_key(&self) -> bool {
        self.primary_key.unwrap_or(false)
    }

    pub fn is_unique(&self) -> bool {
        self.unique.unwrap_or(false)
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum AttributeSpec {
    Type(String),
    Full(AttributeFields),
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct AttributeFields {
    #[serde(rename = "type", default)]
    attr_type: String,
    #[serde(default)]
    size: Option<u32>,
    #[serde(default)]
    primary_key: Option<bool>,
    #[serde(default)]
    unique: Option<bool>,
    #[serde(default)]
    auto_increment: Option<bool>,
    #[serde(default)]
    nullable: Option<bool>,
    #[serde(default)]
    indexed: Option<bool>,
}

impl From<AttributeSpec> for AttributeDef {
    fn from(spec: AttributeSpec) -> Self {
        match spec {
            AttributeSpec::Type(attr_type) => AttributeDef::new(attr_type),
            AttributeSpec::Full(f) => AttributeDef {
                attr_type: f.attr_type,
                size: f.size,
                primary_key: f.primary_key,
                unique: f.unique,
                auto_increment: f.auto_increment,
                nullable: f.nullable,
                indexed: f.indexed,
            },
        }
    }
}

/// Ordered attribute-name to definition mapping.
pub type Attributes = Vec<(String, AttributeDef)>;

/// One row of column metadata as returned by schema introspection.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct ColumnMetadata {
    pub column_name: String,
    pub type_name: String,
    #[serde(default)]
    pub auto_increment: Option<bool>,
    #[serde(default)]
    pub primary_key: Option<bool>,
    #[serde(default)]
    pub unique: Option<bool>,
    #[serde(default)]
    pub indexed: Option<bool>,
    #[serde(default)]
    pub nullable: Option<bool>,
}
