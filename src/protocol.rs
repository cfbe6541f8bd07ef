use nom::Finish;

use crate::{
    definition::Calculator,
    error::{Error, Result},
    parser::type_string,
};

/// Storage width in bits of a MAVLink base type
///
/// | Bits | Types                          |
/// |------|--------------------------------|
/// | 8    | `int8_t`, `uint8_t`, `char`    |
/// | 16   | `int16_t`, `uint16_t`          |
/// | 32   | `int32_t`, `uint32_t`, `float` |
/// | 64   | `int64_t`, `uint64_t`, `double`|
pub fn bit_width(base_type: &str) -> Result<u8> {
    match base_type {
        "int8_t" | "uint8_t" | "char" => Ok(8),
        "int16_t" | "uint16_t" => Ok(16),
        "int32_t" | "uint32_t" | "float" => Ok(32),
        "int64_t" | "uint64_t" | "double" => Ok(64),
        _ => Err(Error::UnknownBaseType {
            base_type: base_type.to_owned(),
        }),
    }
}

/// Storage width in bytes of a MAVLink base type, see [`bit_width`]
pub fn byte_size(base_type: &str) -> Result<u8> {
    bit_width(base_type).map(|bits| bits / 8)
}

/// What to do with a base type missing from the size table
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum UnknownTypePolicy {
    /// Fail with [`Error::UnknownBaseType`]
    #[default]
    Reject,
    /// Treat the type as 8 bits wide, as older generators silently did
    AssumeByte,
}

impl UnknownTypePolicy {
    /// [`bit_width`] with this policy applied on a miss
    pub fn bit_width(self, base_type: &str) -> Result<u8> {
        match (bit_width(base_type), self) {
            (Err(Error::UnknownBaseType { .. }), Self::AssumeByte) => {
                log::warn!("unknown base type `{base_type}`, assuming 8 bits");
                Ok(8)
            }
            (result, _) => result,
        }
    }

    /// [`byte_size`] with this policy applied on a miss
    pub fn byte_size(self, base_type: &str) -> Result<u8> {
        self.bit_width(base_type).map(|bits| bits / 8)
    }
}

/// A field type string split into its base type and array multiplicity
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TypeDescriptor {
    /// Type without array notation, aliases resolved
    pub base_type: String,
    /// Number of elements, 1 for scalars
    pub array_length: u8,
}

impl TypeDescriptor {
    /// Resolve a declared type such as `uint32_t`, `float[4]` or `uint8_t_mavlink_version`
    ///
    /// # Errors
    ///
    /// [`Error::MalformedType`] when the array notation can not be parsed,
    /// [`Error::InvalidArrayLength`] when the length is not in `1..=255`.
    pub fn resolve(type_str: &str) -> Result<Self> {
        let (_, (base_type, length)) =
            type_string(type_str)
                .finish()
                .map_err(|_| Error::MalformedType {
                    type_string: type_str.to_owned(),
                })?;

        let array_length = match length {
            None => 1,
            Some(length) => u8::try_from(length)
                .ok()
                .filter(|&length| length > 0)
                .ok_or_else(|| Error::InvalidArrayLength {
                    type_string: type_str.to_owned(),
                    length,
                })?,
        };

        Ok(Self {
            base_type: base_type.to_owned(),
            array_length,
        })
    }

    /// Only arrays of more than one element add their length to the checksum
    pub fn is_array(&self) -> bool {
        self.array_length > 1
    }
}

impl TryFrom<&str> for TypeDescriptor {
    type Error = Error;

    fn try_from(value: &str) -> Result<Self> {
        Self::resolve(value)
    }
}

/// A message field as declared in the dialect definition
///
/// Only `name`, `type_string` and `is_extension` affect the checksum and layout, the
/// documentation attributes are carried through to [`ResolvedField`] untouched.
#[derive(Debug, Default, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct FieldDescriptor {
    pub name: String,
    /// Declared type, e.g. `uint16_t` or `char[16]`
    #[cfg_attr(feature = "serde", serde(rename = "type"))]
    pub type_string: String,
    /// Declared after the `<extensions/>` marker
    #[cfg_attr(feature = "serde", serde(default, rename = "extension"))]
    pub is_extension: bool,
    #[cfg_attr(feature = "serde", serde(default))]
    pub description: String,
    #[cfg_attr(feature = "serde", serde(default))]
    pub units: Option<String>,
    /// Enum the field values are taken from
    #[cfg_attr(feature = "serde", serde(default, rename = "enum"))]
    pub enum_name: Option<String>,
    /// Value meaning "not available"
    #[cfg_attr(feature = "serde", serde(default))]
    pub invalid: Option<String>,
    /// Display hint, e.g. `bitmask`
    #[cfg_attr(feature = "serde", serde(default))]
    pub display: Option<String>,
}

impl FieldDescriptor {
    pub fn new(name: impl Into<String>, type_string: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            type_string: type_string.into(),
            ..Self::default()
        }
    }

    /// Creates a field that is declared as an extension
    pub fn extension(name: impl Into<String>, type_string: impl Into<String>) -> Self {
        Self {
            is_extension: true,
            ..Self::new(name, type_string)
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn with_units(mut self, units: impl Into<String>) -> Self {
        self.units = Some(units.into());
        self
    }

    pub fn with_enum(mut self, enum_name: impl Into<String>) -> Self {
        self.enum_name = Some(enum_name.into());
        self
    }

    pub fn with_invalid(mut self, invalid: impl Into<String>) -> Self {
        self.invalid = Some(invalid.into());
        self
    }

    pub fn with_display(mut self, display: impl Into<String>) -> Self {
        self.display = Some(display.into());
        self
    }

    pub fn resolve_type(&self) -> Result<TypeDescriptor> {
        TypeDescriptor::resolve(&self.type_string)
    }
}

/// A message and its fields in declaration order
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MessageDefinition {
    pub id: u32,
    pub name: String,
    #[cfg_attr(feature = "serde", serde(default))]
    pub description: String,
    pub fields: Vec<FieldDescriptor>,
}

impl MessageDefinition {
    pub fn new(id: u32, name: impl Into<String>, fields: Vec<FieldDescriptor>) -> Self {
        Self {
            id,
            name: name.into(),
            description: String::new(),
            fields,
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// CRC extra of this message using the default [`Calculator`]
    pub fn crc_extra(&self) -> Result<u8> {
        Calculator::new().crc_extra(&self.name, &self.fields)
    }

    /// Wire layout of this message using the default [`Calculator`]
    pub fn layout(&self) -> Result<Vec<ResolvedField>> {
        Calculator::new().layout(&self.fields)
    }

    pub fn metadata(&self) -> Result<MessageMetadata> {
        Calculator::new().metadata(self)
    }
}

/// A field placed in the encoded payload
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ResolvedField {
    pub name: String,
    /// Type as declared
    #[cfg_attr(feature = "serde", serde(rename = "type"))]
    pub type_string: String,
    #[cfg_attr(feature = "serde", serde(rename = "extension"))]
    pub is_extension: bool,
    pub base_type: String,
    pub array_length: u8,
    /// Size of a single element in bytes
    #[cfg_attr(feature = "serde", serde(rename = "size"))]
    pub byte_size: u8,
    /// Byte position inside the payload
    pub offset: usize,
    pub description: String,
    pub units: Option<String>,
    #[cfg_attr(feature = "serde", serde(rename = "enum"))]
    pub enum_name: Option<String>,
    pub invalid: Option<String>,
    pub display: Option<String>,
}

impl ResolvedField {
    pub fn new(field: &FieldDescriptor, ty: TypeDescriptor, byte_size: u8, offset: usize) -> Self {
        Self {
            name: field.name.clone(),
            type_string: field.type_string.clone(),
            is_extension: field.is_extension,
            base_type: ty.base_type,
            array_length: ty.array_length,
            byte_size,
            offset,
            description: field.description.clone(),
            units: field.units.clone(),
            enum_name: field.enum_name.clone(),
            invalid: field.invalid.clone(),
            display: field.display.clone(),
        }
    }

    /// Bytes taken by the whole field, every element included
    pub fn encoded_size(&self) -> usize {
        self.byte_size as usize * self.array_length as usize
    }

    /// First byte after this field
    pub fn end(&self) -> usize {
        self.offset + self.encoded_size()
    }
}

/// Everything a dialect consumer needs to encode and verify a message
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MessageMetadata {
    pub id: u32,
    pub name: String,
    pub description: String,
    pub crc_extra: u8,
    /// Payload length with every extension field present
    pub encoded_length: usize,
    /// Fields in wire order
    pub fields: Vec<ResolvedField>,
}
