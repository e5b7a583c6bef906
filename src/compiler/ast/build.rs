//! Shorthand constructors for assembling syntax trees by hand.  Nodes built
//! here carry the default position unless a `*_at` variant is used.

use crate::compiler::Position;

use super::*;

pub fn program(declarations: Vec<GlobalDeclaration>) -> Program {
    Program::new(Position::default(), declarations)
}

pub fn type_decl(name: &str, type_expression: TypeExpression) -> GlobalDeclaration {
    type_decl_at(Position::default(), name, type_expression)
}

pub fn type_decl_at(
    position: Position,
    name: &str,
    type_expression: TypeExpression,
) -> GlobalDeclaration {
    GlobalDeclaration::Type(TypeDeclaration {
        position,
        name: name.into(),
        type_expression,
    })
}

pub fn proc_decl(
    name: &str,
    parameters: Vec<ParameterDeclaration>,
    variables: Vec<VariableDeclaration>,
    body: Vec<Statement>,
) -> GlobalDeclaration {
    proc_decl_at(Position::default(), name, parameters, variables, body)
}

pub fn proc_decl_at(
    position: Position,
    name: &str,
    parameters: Vec<ParameterDeclaration>,
    variables: Vec<VariableDeclaration>,
    body: Vec<Statement>,
) -> GlobalDeclaration {
    GlobalDeclaration::Procedure(ProcedureDeclaration {
        position,
        name: name.into(),
        parameters,
        variables,
        body,
    })
}

pub fn param(name: &str, type_expression: TypeExpression) -> ParameterDeclaration {
    ParameterDeclaration {
        position: Position::default(),
        name: name.into(),
        type_expression,
        is_reference: false,
    }
}

pub fn ref_param(name: &str, type_expression: TypeExpression) -> ParameterDeclaration {
    ParameterDeclaration {
        is_reference: true,
        ..param(name, type_expression)
    }
}

pub fn var_decl(name: &str, type_expression: TypeExpression) -> VariableDeclaration {
    var_decl_at(Position::default(), name, type_expression)
}

pub fn var_decl_at(
    position: Position,
    name: &str,
    type_expression: TypeExpression,
) -> VariableDeclaration {
    VariableDeclaration {
        position,
        name: name.into(),
        type_expression,
    }
}

pub fn named_type(name: &str) -> TypeExpression {
    TypeExpression::Named(NamedTypeExpression {
        position: Position::default(),
        name: name.into(),
        ty: TypeSlot::new(),
    })
}

pub fn int_type() -> TypeExpression {
    named_type("int")
}

pub fn array_type(size: u32, base: TypeExpression) -> TypeExpression {
    TypeExpression::Array(ArrayTypeExpression {
        position: Position::default(),
        size,
        base: Box::new(base),
        ty: TypeSlot::new(),
    })
}

pub fn record_type(fields: Vec<VariableDeclaration>) -> TypeExpression {
    TypeExpression::Record(RecordTypeExpression {
        position: Position::default(),
        fields,
        ty: TypeSlot::new(),
    })
}

pub fn assign(target: Variable, value: Expression) -> Statement {
    assign_at(Position::default(), target, value)
}

pub fn assign_at(position: Position, target: Variable, value: Expression) -> Statement {
    Statement::Assign(AssignStatement {
        position,
        target,
        value,
    })
}

pub fn if_then(condition: Expression, then_part: Statement) -> Statement {
    if_else(condition, then_part, empty())
}

pub fn if_else(condition: Expression, then_part: Statement, else_part: Statement) -> Statement {
    Statement::If(IfStatement {
        position: Position::default(),
        condition,
        then_part: Box::new(then_part),
        else_part: Box::new(else_part),
    })
}

pub fn while_do(condition: Expression, body: Statement) -> Statement {
    Statement::While(WhileStatement {
        position: Position::default(),
        condition,
        body: Box::new(body),
    })
}

pub fn call(procedure: &str, arguments: Vec<Expression>) -> Statement {
    call_at(Position::default(), procedure, arguments)
}

pub fn call_at(position: Position, procedure: &str, arguments: Vec<Expression>) -> Statement {
    Statement::Call(CallStatement {
        position,
        procedure: procedure.into(),
        arguments,
    })
}

pub fn compound(statements: Vec<Statement>) -> Statement {
    Statement::Compound(CompoundStatement {
        position: Position::default(),
        statements,
    })
}

pub fn empty() -> Statement {
    Statement::Empty(Position::default())
}

pub fn int(value: i32) -> Expression {
    Expression::IntLiteral(IntLiteral {
        position: Position::default(),
        value,
        ty: TypeSlot::new(),
    })
}

pub fn binary(operator: BinaryOperator, left: Expression, right: Expression) -> Expression {
    binary_at(Position::default(), operator, left, right)
}

pub fn binary_at(
    position: Position,
    operator: BinaryOperator,
    left: Expression,
    right: Expression,
) -> Expression {
    Expression::Binary(BinaryExpression {
        position,
        operator,
        left: Box::new(left),
        right: Box::new(right),
        ty: TypeSlot::new(),
    })
}

pub fn neg(operand: Expression) -> Expression {
    Expression::Unary(UnaryExpression {
        position: Position::default(),
        operator: UnaryOperator::Minus,
        operand: Box::new(operand),
        ty: TypeSlot::new(),
    })
}

/// Uses a variable designator as an expression.
pub fn var(variable: Variable) -> Expression {
    Expression::Variable(VariableExpression {
        position: variable.position(),
        variable,
        ty: TypeSlot::new(),
    })
}

pub fn named(name: &str) -> Variable {
    Variable::Named(NamedVariable {
        position: Position::default(),
        name: name.into(),
        ty: TypeSlot::new(),
    })
}

pub fn index(array: Variable, index: Expression) -> Variable {
    Variable::ArrayAccess(ArrayAccess {
        position: Position::default(),
        array: Box::new(array),
        index: Box::new(index),
        ty: TypeSlot::new(),
    })
}

pub fn field(record: Variable, field: &str) -> Variable {
    Variable::FieldAccess(FieldAccess {
        position: Position::default(),
        record: Box::new(record),
        field: field.into(),
        ty: TypeSlot::new(),
    })
}
