use serde::{Deserialize, Serialize};

use crate::compiler::Position;

use super::{Expression, Identifier, Variable};

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum Statement {
    Assign(AssignStatement),
    If(IfStatement),
    While(WhileStatement),
    Call(CallStatement),
    Compound(CompoundStatement),
    Empty(Position),
}

impl Statement {
    pub fn position(&self) -> Position {
        match self {
            Statement::Assign(s) => s.position,
            Statement::If(s) => s.position,
            Statement::While(s) => s.position,
            Statement::Call(s) => s.position,
            Statement::Compound(s) => s.position,
            Statement::Empty(position) => *position,
        }
    }

    pub fn is_empty(&self) -> bool {
        matches!(self, Statement::Empty(_))
    }

    /// Visits every call statement nested anywhere within this statement,
    /// in source order.
    pub fn for_each_call<F: FnMut(&CallStatement)>(&self, f: &mut F) {
        match self {
            Statement::Call(call) => f(call),
            Statement::If(s) => {
                s.then_part.for_each_call(f);
                s.else_part.for_each_call(f);
            }
            Statement::While(s) => s.body.for_each_call(f),
            Statement::Compound(s) => {
                for stmt in &s.statements {
                    stmt.for_each_call(f);
                }
            }
            Statement::Assign(_) | Statement::Empty(_) => (),
        }
    }
}

/// `target := value;`
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct AssignStatement {
    #[serde(default)]
    pub position: Position,
    pub target: Variable,
    pub value: Expression,
}

/// `if (condition) then_part else else_part`.  A missing else branch is an
/// [`Statement::Empty`].
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct IfStatement {
    #[serde(default)]
    pub position: Position,
    pub condition: Expression,
    pub then_part: Box<Statement>,
    pub else_part: Box<Statement>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct WhileStatement {
    #[serde(default)]
    pub position: Position,
    pub condition: Expression,
    pub body: Box<Statement>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct CallStatement {
    #[serde(default)]
    pub position: Position,
    pub procedure: Identifier,
    #[serde(default)]
    pub arguments: Vec<Expression>,
}

/// `{ statements }`
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct CompoundStatement {
    #[serde(default)]
    pub position: Position,
    pub statements: Vec<Statement>,
}
