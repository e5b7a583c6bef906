use std::convert::TryFrom;

use super::Identifier;

/// Number of bytes a reference parameter occupies in an argument area: one
/// machine word holding the address of the referent.
pub const REFERENCE_BYTE_SIZE: i32 = 4;

/**
The types which a value can have in SPL.  This covers the two primitive types
along with the aggregate types (the array and the record).

Records compare structurally: two records are the same type when their field
lists are pairwise equal (same name and same type, in declaration order),
regardless of which type declaration produced them.
 */
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Type {
    Primitive(PrimitiveType),
    Array(ArrayType),
    Record(RecordType),
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PrimitiveType {
    Int,
    Bool,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ArrayType {
    pub base: Box<Type>,
    pub length: u32,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RecordField {
    pub name: Identifier,
    pub ty: Type,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RecordType {
    fields: Vec<RecordField>,
}

impl Type {
    pub const INT: Type = Type::Primitive(PrimitiveType::Int);
    pub const BOOL: Type = Type::Primitive(PrimitiveType::Bool);

    pub fn array(base: Type, length: u32) -> Type {
        Type::Array(ArrayType {
            base: Box::new(base),
            length,
        })
    }

    pub fn record(fields: Vec<RecordField>) -> Type {
        Type::Record(RecordType::new(fields))
    }

    /// Number of bytes a value of this type occupies when stored inline.
    pub fn byte_size(&self) -> i32 {
        match self {
            Type::Primitive(p) => p.byte_size(),
            Type::Array(a) => a.byte_size(),
            Type::Record(r) => r.byte_size(),
        }
    }

    /// Like [`Type::byte_size`], but `None` when the size does not fit in
    /// an `i32`.  Every type entered by the table builder passes this check,
    /// so `byte_size` is safe to use afterwards.
    pub fn checked_byte_size(&self) -> Option<i32> {
        match self {
            Type::Primitive(p) => Some(p.byte_size()),
            Type::Array(a) => {
                i32::try_from(a.length).ok()?.checked_mul(a.base.checked_byte_size()?)
            }
            Type::Record(r) => r
                .fields
                .iter()
                .try_fold(0i32, |size, f| size.checked_add(f.ty.checked_byte_size()?)),
        }
    }

    pub fn is_int(&self) -> bool {
        *self == Type::INT
    }

    pub fn is_bool(&self) -> bool {
        *self == Type::BOOL
    }

    pub fn is_aggregate(&self) -> bool {
        matches!(self, Type::Array(_) | Type::Record(_))
    }

    pub fn as_array(&self) -> Option<&ArrayType> {
        match self {
            Type::Array(a) => Some(a),
            _ => None,
        }
    }

    pub fn as_record(&self) -> Option<&RecordType> {
        match self {
            Type::Record(r) => Some(r),
            _ => None,
        }
    }
}

impl PrimitiveType {
    pub fn byte_size(&self) -> i32 {
        match self {
            PrimitiveType::Int => 4,
            PrimitiveType::Bool => 4,
        }
    }
}

impl ArrayType {
    pub fn byte_size(&self) -> i32 {
        self.length as i32 * self.base.byte_size()
    }
}

impl RecordField {
    pub fn new(name: Identifier, ty: Type) -> RecordField {
        RecordField { name, ty }
    }
}

impl RecordType {
    pub fn new(fields: Vec<RecordField>) -> RecordType {
        RecordType { fields }
    }

    pub fn fields(&self) -> &[RecordField] {
        &self.fields
    }

    /// Sum of the field sizes; fields are laid out back to back.
    pub fn byte_size(&self) -> i32 {
        self.fields.iter().map(|f| f.ty.byte_size()).sum()
    }

    /// Returns the first field with the given name.
    pub fn field(&self, name: &Identifier) -> Option<&RecordField> {
        self.fields.iter().find(|f| f.name == *name)
    }

    /// Byte offset of `name` from the start of the record: the sum of the
    /// sizes of every field declared before it.
    pub fn field_offset(&self, name: &Identifier) -> Option<i32> {
        let mut offset = 0;
        for f in &self.fields {
            if f.name == *name {
                return Some(offset);
            }
            offset += f.ty.byte_size();
        }
        None
    }
}

impl std::fmt::Display for PrimitiveType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PrimitiveType::Int => f.write_str("int"),
            PrimitiveType::Bool => f.write_str("bool"),
        }
    }
}

impl std::fmt::Display for Type {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Type::Primitive(p) => std::fmt::Display::fmt(p, f),
            Type::Array(a) => f.write_fmt(format_args!("array [{}] of {}", a.length, a.base)),
            Type::Record(r) => {
                f.write_str("record { ")?;
                for (i, field) in r.fields.iter().enumerate() {
                    if i > 0 {
                        f.write_str("; ")?;
                    }
                    f.write_fmt(format_args!("{}: {}", field.name, field.ty))?;
                }
                f.write_str(" }")
            }
        }
    }
}
