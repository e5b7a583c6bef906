use serde::{Deserialize, Serialize};

use crate::compiler::Position;

use super::{Identifier, Statement, TypeExpression};

/// The root of a syntax tree: every global declaration in source order.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Program {
    #[serde(default)]
    pub position: Position,
    pub declarations: Vec<GlobalDeclaration>,
}

impl Program {
    pub fn new(position: Position, declarations: Vec<GlobalDeclaration>) -> Program {
        Program {
            position,
            declarations,
        }
    }

    pub fn procedures(&self) -> impl Iterator<Item = &ProcedureDeclaration> {
        self.declarations.iter().filter_map(|d| match d {
            GlobalDeclaration::Procedure(p) => Some(p),
            GlobalDeclaration::Type(_) => None,
        })
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum GlobalDeclaration {
    Type(TypeDeclaration),
    Procedure(ProcedureDeclaration),
}

impl GlobalDeclaration {
    pub fn name(&self) -> &Identifier {
        match self {
            GlobalDeclaration::Type(t) => &t.name,
            GlobalDeclaration::Procedure(p) => &p.name,
        }
    }

    pub fn position(&self) -> Position {
        match self {
            GlobalDeclaration::Type(t) => t.position,
            GlobalDeclaration::Procedure(p) => p.position,
        }
    }
}

/// `type name = <type expression>;`
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct TypeDeclaration {
    #[serde(default)]
    pub position: Position,
    pub name: Identifier,
    pub type_expression: TypeExpression,
}

/// `proc name(<parameters>) { <variables> <body> }`
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ProcedureDeclaration {
    #[serde(default)]
    pub position: Position,
    pub name: Identifier,
    #[serde(default)]
    pub parameters: Vec<ParameterDeclaration>,
    #[serde(default)]
    pub variables: Vec<VariableDeclaration>,
    #[serde(default)]
    pub body: Vec<Statement>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ParameterDeclaration {
    #[serde(default)]
    pub position: Position,
    pub name: Identifier,
    pub type_expression: TypeExpression,
    #[serde(default)]
    pub is_reference: bool,
}

/// A local variable of a procedure, or a field of a record type expression.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct VariableDeclaration {
    #[serde(default)]
    pub position: Position,
    pub name: Identifier,
    pub type_expression: TypeExpression,
}
