use log::{debug, trace};

use crate::compiler::{ast::*, AtPosition};

use super::{
    error::SemanticError,
    symbol_table::{Entry, ScopeId, SymbolTable},
    SemanticResult,
};

/// Type checks the body of every procedure in `program` and fills in the
/// computed type of every expression and variable designator.
///
/// The table must come from a successful run of the table builder over the
/// same program.
pub fn check_procedures(program: &Program, table: &mut SymbolTable) -> SemanticResult<()> {
    debug!("Start checking procedure bodies");
    let mut checker = ProcedureChecker { table };
    for p in program.procedures() {
        checker.procedure(p)?;
    }
    debug!("Finished checking procedure bodies");
    Ok(())
}

struct ProcedureChecker<'a> {
    table: &'a mut SymbolTable,
}

impl<'a> ProcedureChecker<'a> {
    fn procedure(&mut self, decl: &ProcedureDeclaration) -> SemanticResult<()> {
        trace!("Checking procedure {}", decl.name);
        let scope = match self.table.procedure(&decl.name) {
            Some(p) => p.local_scope,
            None => panic!("Procedure {} was not entered by the table builder", decl.name),
        };
        for s in &decl.body {
            self.statement(scope, s)?;
        }
        Ok(())
    }

    fn statement(&mut self, scope: ScopeId, stm: &Statement) -> SemanticResult<()> {
        match stm {
            Statement::Assign(a) => self.assign(scope, a),
            Statement::If(i) => {
                let cond = self.expression(scope, &i.condition)?;
                if !cond.is_bool() {
                    return Err(SemanticError::IfConditionMustBeBoolean(cond.clone()).at(i.position));
                }
                self.statement(scope, &i.then_part)?;
                self.statement(scope, &i.else_part)
            }
            Statement::While(w) => {
                let cond = self.expression(scope, &w.condition)?;
                if !cond.is_bool() {
                    return Err(
                        SemanticError::WhileConditionMustBeBoolean(cond.clone()).at(w.position)
                    );
                }
                self.statement(scope, &w.body)
            }
            Statement::Call(c) => self.call(scope, c),
            Statement::Compound(c) => {
                let inner = self.table.new_scope(scope);
                for s in &c.statements {
                    self.statement(inner, s)?;
                }
                Ok(())
            }
            Statement::Empty(_) => Ok(()),
        }
    }

    fn assign(&mut self, scope: ScopeId, a: &AssignStatement) -> SemanticResult<()> {
        let target = self.variable(scope, &a.target)?;
        let value = self.expression(scope, &a.value)?;
        match target {
            Type::Record(_) => {
                Err(SemanticError::IllegalAssignment(target.clone(), value.clone()).at(a.position))
            }
            Type::Array(_) => Err(SemanticError::IllegalAssignmentToArray.at(a.position)),
            _ if target != value => {
                Err(SemanticError::IllegalAssignment(target.clone(), value.clone()).at(a.position))
            }
            _ => Ok(()),
        }
    }

    fn call(&mut self, scope: ScopeId, c: &CallStatement) -> SemanticResult<()> {
        let parameters = match self.table.find(scope, &c.procedure) {
            None => {
                return Err(SemanticError::UndefinedProcedure(c.procedure.clone()).at(c.position))
            }
            Some(Entry::Procedure(p)) => p.parameter_types.clone(),
            Some(_) => {
                return Err(SemanticError::CallOfNonProcedure(c.procedure.clone()).at(c.position))
            }
        };

        // Every argument is typed before the call itself is checked.
        let mut argument_types = Vec::with_capacity(c.arguments.len());
        for arg in &c.arguments {
            argument_types.push(self.expression(scope, arg)?);
        }

        if c.arguments.len() > parameters.len() {
            return Err(SemanticError::TooManyArguments(c.procedure.clone()).at(c.position));
        }
        if c.arguments.len() < parameters.len() {
            return Err(SemanticError::TooFewArguments(c.procedure.clone()).at(c.position));
        }

        for (idx, ((arg, ty), param)) in c
            .arguments
            .iter()
            .zip(argument_types)
            .zip(parameters.iter())
            .enumerate()
        {
            if *ty != param.ty {
                return Err(SemanticError::ArgumentTypeMismatch(
                    c.procedure.clone(),
                    idx + 1,
                    param.ty.clone(),
                    ty.clone(),
                )
                .at(arg.position()));
            }
            if param.is_reference && !matches!(arg, Expression::Variable(_)) {
                return Err(
                    SemanticError::ArgumentMustBeAVariable(c.procedure.clone(), idx + 1)
                        .at(arg.position()),
                );
            }
        }
        Ok(())
    }

    fn expression<'e>(&mut self, scope: ScopeId, exp: &'e Expression) -> SemanticResult<&'e Type> {
        let ty = match exp {
            Expression::IntLiteral(_) => Type::INT,
            Expression::Variable(v) => self.variable(scope, &v.variable)?.clone(),
            Expression::Unary(u) => {
                let operand = self.expression(scope, &u.operand)?;
                if operand.is_bool() {
                    return Err(
                        SemanticError::NoSuchUnaryOperator(u.operator, operand.clone())
                            .at(u.position),
                    );
                }
                operand.clone()
            }
            Expression::Binary(b) => {
                let left = self.expression(scope, &b.left)?;
                let right = self.expression(scope, &b.right)?;
                if left != right {
                    return Err(SemanticError::NoSuchOperator(
                        b.operator,
                        left.clone(),
                        right.clone(),
                    )
                    .at(b.position));
                }
                if b.operator.is_arithmetic() {
                    Type::INT
                } else {
                    Type::BOOL
                }
            }
        };
        Ok(exp.slot().set(ty))
    }

    fn variable<'v>(&mut self, scope: ScopeId, var: &'v Variable) -> SemanticResult<&'v Type> {
        let ty = match var {
            Variable::Named(n) => {
                let entry = self.table.lookup(scope, &n.name, || {
                    SemanticError::UndefinedVariable(n.name.clone()).at(n.position)
                })?;
                match entry {
                    Entry::Variable(v) => v.ty.clone(),
                    _ => return Err(SemanticError::NotAVariable(n.name.clone()).at(n.position)),
                }
            }
            Variable::ArrayAccess(a) => {
                let index = self.expression(scope, &a.index)?;
                if !index.is_int() {
                    return Err(SemanticError::IndexingWithNonInteger(index.clone()).at(a.position));
                }
                let array = self.variable(scope, &a.array)?;
                match array.as_array() {
                    Some(at) => (*at.base).clone(),
                    None => return Err(SemanticError::IndexingNonArray(array.clone()).at(a.position)),
                }
            }
            Variable::FieldAccess(f) => {
                let record = self.variable(scope, &f.record)?;
                let rt = record
                    .as_record()
                    .ok_or_else(|| SemanticError::NotARecord(f.field.clone()).at(f.position))?;
                match rt.field(&f.field) {
                    Some(field) => field.ty.clone(),
                    None => return Err(SemanticError::NotAField(f.field.clone()).at(f.position)),
                }
            }
        };
        Ok(var.slot().set(ty))
    }
}
