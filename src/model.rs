//! In-memory representation of metaModel.json.
//!
//! The shapes here mirror the meta-model schema one to one: five ordered
//! top-level sequences plus the polymorphic [`Type`] node. Everything is
//! decoded in a single pass; the only custom deserialization is `Type`,
//! whose `value` field changes shape with `kind` (a map's value type, a
//! literal body, or a primitive constant all arrive under the same key).

use serde::de::DeserializeOwned;
use serde::Deserialize;

use crate::error::Error;

// ------------------------------ Document ---------------------------------- //

/// The top-level structure of metaModel.json.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Model {
    pub meta_data: MetaData,
    #[serde(default)]
    pub requests: Vec<Request>,
    #[serde(default)]
    pub notifications: Vec<Notification>,
    #[serde(default)]
    pub structures: Vec<Structure>,
    #[serde(default)]
    pub enumerations: Vec<Enumeration>,
    #[serde(default)]
    pub type_aliases: Vec<TypeAlias>,
}

/// LSP version information.
#[derive(Debug, Clone, Deserialize)]
pub struct MetaData {
    pub version: String,
}

/// An LSP request (expects a response).
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Request {
    #[serde(default)]
    pub documentation: String,
    #[serde(default)]
    pub error_data: Option<Type>,
    pub message_direction: MessageDirection,
    pub method: String,
    #[serde(default)]
    pub params: Option<Type>,
    #[serde(default)]
    pub partial_result: Option<Type>,
    #[serde(default)]
    pub proposed: bool,
    #[serde(default)]
    pub registration_method: String,
    #[serde(default)]
    pub registration_options: Option<Type>,
    #[serde(default)]
    pub result: Option<Type>,
    #[serde(default)]
    pub since: String,
}

/// An LSP notification (no response expected).
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Notification {
    #[serde(default)]
    pub documentation: String,
    pub message_direction: MessageDirection,
    pub method: String,
    #[serde(default)]
    pub params: Option<Type>,
    #[serde(default)]
    pub proposed: bool,
    #[serde(default)]
    pub since: String,
}

/// Which way a message travels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum MessageDirection {
    ClientToServer,
    ServerToClient,
    Both,
}

impl MessageDirection {
    /// True for messages the server receives (client→server or both).
    pub fn targets_server(self) -> bool {
        matches!(self, Self::ClientToServer | Self::Both)
    }

    /// True for messages the client receives (server→client or both).
    pub fn targets_client(self) -> bool {
        matches!(self, Self::ServerToClient | Self::Both)
    }
}

/// A named LSP aggregate type.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Structure {
    #[serde(default)]
    pub documentation: String,
    #[serde(default)]
    pub extends: Vec<Type>,
    #[serde(default)]
    pub mixins: Vec<Type>,
    pub name: String,
    #[serde(default)]
    pub properties: Vec<Property>,
    #[serde(default)]
    pub proposed: bool,
    #[serde(default)]
    pub since: String,
}

/// A named LSP enumeration.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Enumeration {
    #[serde(default)]
    pub documentation: String,
    pub name: String,
    #[serde(default)]
    pub since: String,
    #[serde(default)]
    pub proposed: bool,
    #[serde(default)]
    pub supports_custom_values: bool,
    #[serde(rename = "type")]
    pub base: EnumBaseType,
    #[serde(default)]
    pub values: Vec<EnumerationValue>,
}

/// The underlying type of an enumeration (`string`, `integer` or `uinteger`).
#[derive(Debug, Clone, Deserialize)]
pub struct EnumBaseType {
    pub kind: String,
    pub name: String,
}

/// A single member of an enumeration. `value` is a string or a number.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EnumerationValue {
    #[serde(default)]
    pub documentation: String,
    pub name: String,
    #[serde(default)]
    pub proposed: bool,
    #[serde(default)]
    pub since: String,
    pub value: serde_json::Value,
}

/// A named alias for an arbitrary type expression.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TypeAlias {
    #[serde(default)]
    pub documentation: String,
    pub name: String,
    #[serde(default)]
    pub proposed: bool,
    #[serde(default)]
    pub since: String,
    #[serde(rename = "type")]
    pub ty: Type,
}

/// A single property of a [`Structure`] or [`LiteralType`].
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Property {
    #[serde(default)]
    pub documentation: String,
    pub name: String,
    #[serde(default)]
    pub optional: bool,
    #[serde(default)]
    pub proposed: bool,
    #[serde(default)]
    pub since: String,
    #[serde(rename = "type")]
    pub ty: Type,
}

/// The body of a `literal` kind [`Type`]: an anonymous struct.
#[derive(Debug, Clone, Deserialize)]
pub struct LiteralType {
    #[serde(default)]
    pub properties: Vec<Property>,
}

// ------------------------------- Type node -------------------------------- //

/// An LSP type expression, discriminated by the meta-model `kind` string.
///
/// Kinds this generator does not know are kept as [`Type::Unknown`] and
/// resolve to `any` instead of failing the load. Payload fields are
/// tolerated absent, matching a plain field-by-field decode: the resolver
/// treats a missing element, key, value or literal body as `any`, and the
/// primitive literal kinds default to their zero constant.
#[derive(Debug, Clone)]
pub enum Type {
    /// A base-type name (`string`, `integer`, `DocumentUri`, ...).
    Base { name: String },
    /// A reference to a structure, enumeration or type alias by name.
    Reference { name: String },
    Array { element: Option<Box<Type>> },
    Map {
        key: Option<Box<Type>>,
        value: Option<Box<Type>>,
    },
    /// Union of the listed types.
    Or { items: Vec<Type> },
    /// Intersection of the listed types.
    And { items: Vec<Type> },
    Tuple { items: Vec<Type> },
    /// Anonymous struct appearing inline in a property type.
    Literal(Option<LiteralType>),
    StringLiteral(String),
    IntegerLiteral(i64),
    BooleanLiteral(bool),
    /// Unrecognized `kind`, accepted and treated as opaque.
    Unknown { kind: String },
}

impl Type {
    /// True for the `null` base type.
    pub fn is_null(&self) -> bool {
        matches!(self, Type::Base { name } if name == "null")
    }

    /// The referenced name, when this is a `reference` kind.
    pub fn reference_name(&self) -> Option<&str> {
        match self {
            Type::Reference { name } => Some(name),
            _ => None,
        }
    }
}

/// Helper mirroring the raw JSON shape of a `Type` node. The polymorphic
/// `value` field is captured opaquely and decoded once `kind` is known.
#[derive(Deserialize)]
struct RawType {
    kind: String,
    #[serde(default)]
    name: Option<String>,
    #[serde(default)]
    element: Option<Box<Type>>,
    #[serde(default)]
    key: Option<Box<Type>>,
    #[serde(default)]
    items: Option<Vec<Type>>,
    #[serde(default)]
    value: Option<serde_json::Value>,
}

impl<'de> Deserialize<'de> for Type {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let raw = RawType::deserialize(deserializer)?;

        let ty = match raw.kind.as_str() {
            "base" => Type::Base {
                name: raw.name.unwrap_or_default(),
            },
            "reference" => Type::Reference {
                name: raw.name.unwrap_or_default(),
            },
            "array" => Type::Array {
                element: raw.element,
            },
            "map" => Type::Map {
                key: raw.key,
                // The map's value *type* arrives under the same `value` key the
                // literal kinds use for their constants; `kind` disambiguates.
                value: decode_value::<Type, D::Error>(raw.value)?.map(Box::new),
            },
            "or" => Type::Or {
                items: raw.items.unwrap_or_default(),
            },
            "and" => Type::And {
                items: raw.items.unwrap_or_default(),
            },
            "tuple" => Type::Tuple {
                items: raw.items.unwrap_or_default(),
            },
            "literal" => Type::Literal(decode_value::<LiteralType, D::Error>(raw.value)?),
            "stringLiteral" => {
                Type::StringLiteral(decode_value::<String, D::Error>(raw.value)?.unwrap_or_default())
            }
            "integerLiteral" => {
                Type::IntegerLiteral(decode_value::<i64, D::Error>(raw.value)?.unwrap_or_default())
            }
            "booleanLiteral" => {
                Type::BooleanLiteral(decode_value::<bool, D::Error>(raw.value)?.unwrap_or_default())
            }
            _ => Type::Unknown { kind: raw.kind },
        };

        Ok(ty)
    }
}

/// Decode the captured `value` payload into the kind-appropriate shape.
/// An absent payload is not an error; a present but malformed one is.
fn decode_value<T, E>(value: Option<serde_json::Value>) -> Result<Option<T>, E>
where
    T: DeserializeOwned,
    E: serde::de::Error,
{
    match value {
        None => Ok(None),
        Some(value) => serde_json::from_value(value).map(Some).map_err(E::custom),
    }
}

// -------------------------------- Loading --------------------------------- //

impl Model {
    /// Deserialize a meta-model document from raw bytes.
    pub fn from_slice(bytes: &[u8]) -> Result<Self, Error> {
        let de = &mut serde_json::Deserializer::from_slice(bytes);
        deserialize_with_path(de)
    }
}

/// Deserialize a meta-model document from a JSON string.
impl std::str::FromStr for Model {
    type Err = Error;

    fn from_str(src: &str) -> Result<Self, Error> {
        let de = &mut serde_json::Deserializer::from_str(src);
        deserialize_with_path(de)
    }
}

/// Deserialize with JSON-path context in error messages.
fn deserialize_with_path<'de, D, T>(de: D) -> Result<T, Error>
where
    D: serde::Deserializer<'de, Error = serde_json::Error>,
    T: DeserializeOwned,
{
    serde_path_to_error::deserialize::<_, T>(de).map_err(|err| Error::Load {
        path: err.path().to_string(),
        source: err.into_inner(),
    })
}

// --------------------------------- Tests ---------------------------------- //
