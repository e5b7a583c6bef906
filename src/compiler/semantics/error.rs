use crate::compiler::{
    ast::{BinaryOperator, Identifier, Type, UnaryOperator},
    AtPosition,
};

/// Errors generated while building the symbol table or checking procedure
/// bodies.  The first one found aborts compilation.
#[derive(Clone, Debug, PartialEq)]
pub enum SemanticError {
    RedeclarationAsType(Identifier),
    RedeclarationAsProcedure(Identifier),
    RedeclarationAsVariable(Identifier),
    RedeclarationAsParameter(Identifier),
    FieldAlreadyExists(Identifier),
    TypeTooLarge(Type),
    LocalVariablesTooLarge(Identifier),
    UndefinedType(Identifier),
    NotAType(Identifier),
    UndefinedVariable(Identifier),
    NotAVariable(Identifier),
    UndefinedProcedure(Identifier),
    CallOfNonProcedure(Identifier),
    NotARecord(Identifier),
    NotAField(Identifier),
    MustBeAReferenceParameter(Identifier),
    MainIsMissing(Identifier),
    MainIsNotAProcedure(Identifier),
    MainMustNotHaveParameters(Identifier),
    NoSuchOperator(BinaryOperator, Type, Type),
    NoSuchUnaryOperator(UnaryOperator, Type),
    IllegalAssignment(Type, Type),
    IllegalAssignmentToArray,
    IfConditionMustBeBoolean(Type),
    WhileConditionMustBeBoolean(Type),
    IndexingWithNonInteger(Type),
    IndexingNonArray(Type),
    TooManyArguments(Identifier),
    TooFewArguments(Identifier),
    ArgumentTypeMismatch(Identifier, usize, Type, Type),
    ArgumentMustBeAVariable(Identifier, usize),
}

impl AtPosition for SemanticError {}

impl std::fmt::Display for SemanticError {
    /// Turn a SemanticError into a human readable message.
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        use SemanticError::*;
        match self {
            RedeclarationAsType(name) => {
                f.write_fmt(format_args!("redeclaration of '{}' as type", name))
            }
            RedeclarationAsProcedure(name) => {
                f.write_fmt(format_args!("redeclaration of '{}' as procedure", name))
            }
            RedeclarationAsVariable(name) => {
                f.write_fmt(format_args!("redeclaration of '{}' as variable", name))
            }
            RedeclarationAsParameter(name) => {
                f.write_fmt(format_args!("redeclaration of '{}' as parameter", name))
            }
            FieldAlreadyExists(name) => {
                f.write_fmt(format_args!("record field '{}' already exists", name))
            }
            TypeTooLarge(ty) => f.write_fmt(format_args!("type {} is too large", ty)),
            LocalVariablesTooLarge(name) => f.write_fmt(format_args!(
                "local variables of procedure '{}' are too large",
                name
            )),
            UndefinedType(name) => f.write_fmt(format_args!("undefined type '{}'", name)),
            NotAType(name) => f.write_fmt(format_args!("'{}' is not a type", name)),
            UndefinedVariable(name) => f.write_fmt(format_args!("undefined variable '{}'", name)),
            NotAVariable(name) => f.write_fmt(format_args!("'{}' is not a variable", name)),
            UndefinedProcedure(name) => {
                f.write_fmt(format_args!("undefined procedure '{}'", name))
            }
            CallOfNonProcedure(name) => {
                f.write_fmt(format_args!("call of non-procedure '{}'", name))
            }
            NotARecord(field) => f.write_fmt(format_args!(
                "access of field '{}' on a value that is not a record",
                field
            )),
            NotAField(field) => f.write_fmt(format_args!("'{}' is not a field of the record", field)),
            MustBeAReferenceParameter(name) => f.write_fmt(format_args!(
                "parameter '{}' must be a reference parameter",
                name
            )),
            MainIsMissing(entry) => {
                f.write_fmt(format_args!("procedure '{}' is missing", entry))
            }
            MainIsNotAProcedure(entry) => {
                f.write_fmt(format_args!("'{}' is not a procedure", entry))
            }
            MainMustNotHaveParameters(entry) => f.write_fmt(format_args!(
                "procedure '{}' must not have any parameters",
                entry
            )),
            NoSuchOperator(op, l, r) => f.write_fmt(format_args!(
                "operator '{}' is not defined for {} and {}",
                op, l, r
            )),
            NoSuchUnaryOperator(op, ty) => {
                f.write_fmt(format_args!("operator '{}' is not defined for {}", op, ty))
            }
            IllegalAssignment(target, value) => f.write_fmt(format_args!(
                "illegal assignment of {} to a variable of type {}",
                value, target
            )),
            IllegalAssignmentToArray => f.write_str("illegal assignment to an array"),
            IfConditionMustBeBoolean(ty) => f.write_fmt(format_args!(
                "'if' condition must be of type bool but is {}",
                ty
            )),
            WhileConditionMustBeBoolean(ty) => f.write_fmt(format_args!(
                "'while' condition must be of type bool but is {}",
                ty
            )),
            IndexingWithNonInteger(ty) => f.write_fmt(format_args!(
                "array index must be of type int but is {}",
                ty
            )),
            IndexingNonArray(ty) => {
                f.write_fmt(format_args!("indexing a value of non-array type {}", ty))
            }
            TooManyArguments(name) => f.write_fmt(format_args!(
                "too many arguments in call of procedure '{}'",
                name
            )),
            TooFewArguments(name) => f.write_fmt(format_args!(
                "too few arguments in call of procedure '{}'",
                name
            )),
            ArgumentTypeMismatch(name, position, expected, actual) => f.write_fmt(format_args!(
                "argument {} of procedure '{}' expects {} but got {}",
                position, name, expected, actual
            )),
            ArgumentMustBeAVariable(name, position) => f.write_fmt(format_args!(
                "argument {} of procedure '{}' must be a variable",
                position, name
            )),
        }
    }
}
