//! The material attribute record.
//!
//! [`MaterialAttributeData`] packs a name together with a typed value into a
//! fixed-capacity record so a whole material is one flat array of
//! equally-sized entries. The name occupies the front of the payload, an
//! inline value the tail; string values too long for the payload can instead
//! borrow caller-owned storage.

use std::fmt;
use std::str;

use static_assertions::const_assert;

use crate::error::MaterialError;

use super::types::{AttributeValue, MaterialAttribute, MaterialAttributeType, TextureSwizzle};

/// Conceptual size of one record, name and value included.
pub const RECORD_SIZE: usize = 64;

/// Payload capacity after the type tag and the name length byte.
const PAYLOAD_SIZE: usize = RECORD_SIZE - 2;

const_assert!(PAYLOAD_SIZE == 62);

#[derive(Clone, Copy, PartialEq)]
enum Storage<'a> {
    /// Value packed at the payload tail, `value_len` bytes.
    Inline { value_len: u8 },
    /// String value borrowed from caller-owned storage.
    StringRef(&'a str),
}

/// One name/value pair of a material.
///
/// Records are ordered by name; [`MaterialData`](super::MaterialData) keeps
/// its records sorted so lookups can binary-search.
#[derive(Clone, Copy, PartialEq)]
pub struct MaterialAttributeData<'a> {
    ty: MaterialAttributeType,
    name_len: u8,
    data: [u8; PAYLOAD_SIZE],
    storage: Storage<'a>,
}

impl<'a> MaterialAttributeData<'a> {
    /// Create a record from a name and a typed value.
    ///
    /// The name must be non-empty, free of NUL bytes and, when it is a known
    /// name, bound to `T`'s type. Name and value together must fit the
    /// payload capacity of [`RECORD_SIZE`] minus bookkeeping.
    pub fn new<T: AttributeValue>(name: &str, value: &T) -> Result<Self, MaterialError> {
        let value_len = T::TYPE.size().unwrap_or(0);
        let mut record = Self::with_name(name, T::TYPE, value_len)?;
        let tail = PAYLOAD_SIZE - value_len;
        value.write(&mut record.data[tail..]);
        Ok(record)
    }

    /// [`new`](Self::new) with a known name, spelled as the enum.
    pub fn known<T: AttributeValue>(
        attribute: MaterialAttribute,
        value: &T,
    ) -> Result<Self, MaterialError> {
        Self::new(attribute.name(), value)
    }

    /// Create a string-valued record with the value copied inline.
    pub fn string(name: &str, value: &str) -> Result<Self, MaterialError> {
        let mut record = Self::with_name(name, MaterialAttributeType::String, value.len())?;
        let tail = PAYLOAD_SIZE - value.len();
        record.data[tail..].copy_from_slice(value.as_bytes());
        Ok(record)
    }

    /// Create a string-valued record borrowing the value.
    ///
    /// Unlike [`string`](Self::string) the value is not copied and its
    /// length does not count against the record capacity, so it can be
    /// arbitrarily long. The record must not outlive the borrow.
    pub fn string_ref(name: &str, value: &'a str) -> Result<Self, MaterialError> {
        let mut record = Self::with_name(name, MaterialAttributeType::String, 0)?;
        record.storage = Storage::StringRef(value);
        Ok(record)
    }

    /// Create a record from a type tag and raw value bytes.
    ///
    /// The byte length must match the tag's size; string values must be
    /// valid UTF-8.
    pub fn from_erased(
        name: &str,
        ty: MaterialAttributeType,
        value: &[u8],
    ) -> Result<Self, MaterialError> {
        match ty.size() {
            Some(expected) => {
                if value.len() != expected {
                    return Err(MaterialError::InvalidValueSize {
                        ty,
                        expected,
                        got: value.len(),
                    });
                }
                if ty == MaterialAttributeType::TextureSwizzle {
                    let raw = bytemuck::pod_read_unaligned::<u32>(value);
                    if TextureSwizzle::from_raw(raw).is_none() {
                        return Err(MaterialError::UnknownSwizzle { raw });
                    }
                }
                let mut record = Self::with_name(name, ty, expected)?;
                let tail = PAYLOAD_SIZE - expected;
                record.data[tail..].copy_from_slice(value);
                Ok(record)
            }
            None => {
                let value = str::from_utf8(value).map_err(|_| MaterialError::NotAString {
                    name: name.to_string(),
                    ty,
                })?;
                Self::string(name, value)
            }
        }
    }

    fn with_name(
        name: &str,
        ty: MaterialAttributeType,
        value_len: usize,
    ) -> Result<Self, MaterialError> {
        if name.is_empty() {
            return Err(MaterialError::EmptyAttribute);
        }
        if name.contains('\0') {
            return Err(MaterialError::InvalidName {
                name: name.to_string(),
            });
        }
        if let Some(known) = MaterialAttribute::from_name(name) {
            if known.expected_type() != ty {
                return Err(MaterialError::UnexpectedType {
                    attribute: known,
                    expected: known.expected_type(),
                    got: ty,
                });
            }
        }
        if name.len() + value_len > PAYLOAD_SIZE {
            return Err(MaterialError::TooLarge {
                name: name.to_string(),
                required: name.len() + value_len + 2,
                capacity: RECORD_SIZE,
            });
        }
        let mut data = [0u8; PAYLOAD_SIZE];
        data[..name.len()].copy_from_slice(name.as_bytes());
        Ok(Self {
            ty,
            name_len: name.len() as u8,
            data,
            storage: Storage::Inline {
                value_len: value_len as u8,
            },
        })
    }

    /// The attribute name.
    pub fn name(&self) -> &str {
        str::from_utf8(&self.data[..self.name_len as usize]).unwrap_or_default()
    }

    /// The known name this record carries, if its name is one.
    pub fn known_name(&self) -> Option<MaterialAttribute> {
        MaterialAttribute::from_name(self.name())
    }

    /// The value type tag.
    pub fn ty(&self) -> MaterialAttributeType {
        self.ty
    }

    /// The typed value.
    ///
    /// The requested type must equal the stored tag, with one relaxation: a
    /// [`MaterialAttributeType::MutablePointer`] may also be read as a
    /// `*const ()`. Strings go through
    /// [`string_value`](Self::string_value) instead.
    pub fn value<T: AttributeValue>(&self) -> Result<T, MaterialError> {
        let compatible = self.ty == T::TYPE
            || (T::TYPE == MaterialAttributeType::Pointer
                && self.ty == MaterialAttributeType::MutablePointer);
        if !compatible {
            return Err(MaterialError::TypeMismatch {
                name: self.name().to_string(),
                expected: self.ty,
                got: T::TYPE,
            });
        }
        Ok(T::read(self.value_bytes()))
    }

    /// The string value.
    pub fn string_value(&self) -> Result<&str, MaterialError> {
        if self.ty != MaterialAttributeType::String {
            return Err(MaterialError::NotAString {
                name: self.name().to_string(),
                ty: self.ty,
            });
        }
        match self.storage {
            Storage::Inline { .. } => Ok(str::from_utf8(self.value_bytes()).unwrap_or_default()),
            Storage::StringRef(value) => Ok(value),
        }
    }

    /// The raw value bytes, regardless of type.
    pub fn value_bytes(&self) -> &[u8] {
        match self.storage {
            Storage::Inline { value_len } => &self.data[PAYLOAD_SIZE - value_len as usize..],
            Storage::StringRef(value) => value.as_bytes(),
        }
    }
}

impl fmt::Debug for MaterialAttributeData<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MaterialAttributeData")
            .field("name", &self.name())
            .field("ty", &self.ty)
            .finish()
    }
}
