use serde::{Deserialize, Serialize};

use crate::compiler::Position;

use super::{Identifier, Type, TypeSlot};

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum Expression {
    Binary(BinaryExpression),
    Unary(UnaryExpression),
    IntLiteral(IntLiteral),
    Variable(VariableExpression),
}

impl Expression {
    pub fn position(&self) -> Position {
        match self {
            Expression::Binary(e) => e.position,
            Expression::Unary(e) => e.position,
            Expression::IntLiteral(e) => e.position,
            Expression::Variable(e) => e.position,
        }
    }

    pub fn slot(&self) -> &TypeSlot {
        match self {
            Expression::Binary(e) => &e.ty,
            Expression::Unary(e) => &e.ty,
            Expression::IntLiteral(e) => &e.ty,
            Expression::Variable(e) => &e.ty,
        }
    }

    /// The type computed for this expression by the procedure checker.
    pub fn ty(&self) -> &Type {
        self.slot().expect(self.kind())
    }

    pub fn kind(&self) -> &'static str {
        match self {
            Expression::Binary(_) => "BinaryExpression",
            Expression::Unary(_) => "UnaryExpression",
            Expression::IntLiteral(_) => "IntLiteral",
            Expression::Variable(_) => "VariableExpression",
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct BinaryExpression {
    #[serde(default)]
    pub position: Position,
    pub operator: BinaryOperator,
    pub left: Box<Expression>,
    pub right: Box<Expression>,
    #[serde(skip)]
    pub ty: TypeSlot,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct UnaryExpression {
    #[serde(default)]
    pub position: Position,
    pub operator: UnaryOperator,
    pub operand: Box<Expression>,
    #[serde(skip)]
    pub ty: TypeSlot,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct IntLiteral {
    #[serde(default)]
    pub position: Position,
    pub value: i32,
    #[serde(skip)]
    pub ty: TypeSlot,
}

/// A variable designator used as an expression.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct VariableExpression {
    #[serde(default)]
    pub position: Position,
    pub variable: Variable,
    #[serde(skip)]
    pub ty: TypeSlot,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum BinaryOperator {
    Add,
    Sub,
    Mul,
    Div,
    Equ,
    Neq,
    Lst,
    Lse,
    Grt,
    Gre,
}

impl BinaryOperator {
    pub fn is_arithmetic(&self) -> bool {
        matches!(
            self,
            BinaryOperator::Add | BinaryOperator::Sub | BinaryOperator::Mul | BinaryOperator::Div
        )
    }

    pub fn is_comparison(&self) -> bool {
        !self.is_arithmetic()
    }

    /// The comparison which holds exactly when this one does not.  Used to
    /// branch past a block when its condition is false.
    ///
    /// Arithmetic operators have no negation and are returned unchanged.
    pub fn negate(&self) -> BinaryOperator {
        use BinaryOperator::*;
        match self {
            Equ => Neq,
            Neq => Equ,
            Lst => Gre,
            Lse => Grt,
            Grt => Lse,
            Gre => Lst,
            Add | Sub | Mul | Div => *self,
        }
    }
}

impl std::fmt::Display for BinaryOperator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        use BinaryOperator::*;
        match self {
            Add => f.write_str("+"),
            Sub => f.write_str("-"),
            Mul => f.write_str("*"),
            Div => f.write_str("/"),
            Equ => f.write_str("="),
            Neq => f.write_str("#"),
            Lst => f.write_str("<"),
            Lse => f.write_str("<="),
            Grt => f.write_str(">"),
            Gre => f.write_str(">="),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum UnaryOperator {
    Minus,
}

impl std::fmt::Display for UnaryOperator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            UnaryOperator::Minus => f.write_str("-"),
        }
    }
}

/// A variable designator: something which denotes a storage location.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum Variable {
    Named(NamedVariable),
    ArrayAccess(ArrayAccess),
    FieldAccess(FieldAccess),
}

impl Variable {
    pub fn position(&self) -> Position {
        match self {
            Variable::Named(v) => v.position,
            Variable::ArrayAccess(v) => v.position,
            Variable::FieldAccess(v) => v.position,
        }
    }

    pub fn slot(&self) -> &TypeSlot {
        match self {
            Variable::Named(v) => &v.ty,
            Variable::ArrayAccess(v) => &v.ty,
            Variable::FieldAccess(v) => &v.ty,
        }
    }

    pub fn ty(&self) -> &Type {
        self.slot().expect(self.kind())
    }

    pub fn kind(&self) -> &'static str {
        match self {
            Variable::Named(_) => "NamedVariable",
            Variable::ArrayAccess(_) => "ArrayAccess",
            Variable::FieldAccess(_) => "FieldAccess",
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct NamedVariable {
    #[serde(default)]
    pub position: Position,
    pub name: Identifier,
    #[serde(skip)]
    pub ty: TypeSlot,
}

/// `array[index]`
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ArrayAccess {
    #[serde(default)]
    pub position: Position,
    pub array: Box<Variable>,
    pub index: Box<Expression>,
    #[serde(skip)]
    pub ty: TypeSlot,
}

/// `record.field`
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct FieldAccess {
    #[serde(default)]
    pub position: Position,
    pub record: Box<Variable>,
    pub field: Identifier,
    #[serde(skip)]
    pub ty: TypeSlot,
}
