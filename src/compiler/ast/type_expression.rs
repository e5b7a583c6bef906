use serde::{Deserialize, Serialize};

use crate::compiler::Position;

use super::{Identifier, Type, TypeSlot, VariableDeclaration};

/// The syntactic form of a type, as written in a declaration.  The table
/// builder resolves each one to a [`Type`] and stores it in the node's slot.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum TypeExpression {
    Named(NamedTypeExpression),
    Array(ArrayTypeExpression),
    Record(RecordTypeExpression),
}

impl TypeExpression {
    pub fn position(&self) -> Position {
        match self {
            TypeExpression::Named(t) => t.position,
            TypeExpression::Array(t) => t.position,
            TypeExpression::Record(t) => t.position,
        }
    }

    pub fn slot(&self) -> &TypeSlot {
        match self {
            TypeExpression::Named(t) => &t.ty,
            TypeExpression::Array(t) => &t.ty,
            TypeExpression::Record(t) => &t.ty,
        }
    }

    pub fn ty(&self) -> &Type {
        self.slot().expect("TypeExpression")
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct NamedTypeExpression {
    #[serde(default)]
    pub position: Position,
    pub name: Identifier,
    #[serde(skip)]
    pub ty: TypeSlot,
}

/// `array [size] of base`
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ArrayTypeExpression {
    #[serde(default)]
    pub position: Position,
    pub size: u32,
    pub base: Box<TypeExpression>,
    #[serde(skip)]
    pub ty: TypeSlot,
}

/// `record { field: type; ... }`
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct RecordTypeExpression {
    #[serde(default)]
    pub position: Position,
    pub fields: Vec<VariableDeclaration>,
    #[serde(skip)]
    pub ty: TypeSlot,
}
