use log::{debug, trace};

use crate::compiler::{
    arch::registers::{Reg, RegisterStack},
    ast::*,
    eco32::assembly::{Cond, Inst, Line, Operand},
    semantics::{
        symbol_table::{Entry, ProcedureEntry, ScopeId, SymbolTable},
        BUILTIN_PROCEDURES, INDEX_ERROR_ROUTINE,
    },
    AtPosition, Position,
};

use super::{CodeGenError, CodeGenResult};

/// Generates the assembly module for `program`.  The table must have been
/// built, checked and allocated over the same program.
pub fn generate_code(program: &Program, table: &SymbolTable) -> CodeGenResult<Vec<Line>> {
    let mut gen = CodeGenerator::new(table);
    gen.module(program)?;
    Ok(gen.into_lines())
}

/// Where the variables of the procedure being generated live.
struct Frame {
    scope: ScopeId,
    /// Register that variable offsets are relative to.
    base: Reg,
    /// Added to every variable offset: zero when addressing from the frame
    /// pointer, the frame size when a leaf procedure addresses from the
    /// stack pointer.
    bias: i32,
}

pub struct CodeGenerator<'a> {
    table: &'a SymbolTable,
    registers: RegisterStack,
    next_label: u32,
    lines: Vec<Line>,
}

impl<'a> CodeGenerator<'a> {
    pub fn new(table: &'a SymbolTable) -> CodeGenerator<'a> {
        CodeGenerator {
            table,
            registers: RegisterStack::new(),
            next_label: 0,
            lines: vec![],
        }
    }

    pub fn into_lines(self) -> Vec<Line> {
        self.lines
    }

    pub fn module(&mut self, program: &Program) -> CodeGenResult<()> {
        debug!("Start code generation");
        self.prolog();
        for p in program.procedures() {
            self.procedure(p)?;
        }
        debug!("Finished code generation: {} lines", self.lines.len());
        Ok(())
    }

    fn emit(&mut self, inst: Inst) {
        trace!("{}", inst);
        self.lines.push(Line::new(inst));
    }

    fn emit_commented(&mut self, inst: Inst, comment: &str) {
        trace!("{}", inst);
        self.lines.push(Line::with_comment(inst, comment));
    }

    fn new_label(&mut self) -> String {
        let label = format!("L{}", self.next_label);
        self.next_label += 1;
        label
    }

    fn push(&mut self, position: Position) -> CodeGenResult<Reg> {
        self.registers
            .push()
            .map_err(|_| CodeGenError::RegisterOverflow.at(position))
    }

    fn pop(&mut self) -> Reg {
        self.registers.pop()
    }

    /// Imports the runtime library and opens the code segment.
    fn prolog(&mut self) {
        for (name, _) in BUILTIN_PROCEDURES {
            self.emit(Inst::Import((*name).into()));
        }
        self.emit(Inst::Import(INDEX_ERROR_ROUTINE.into()));
        self.emit(Inst::Blank);
        self.emit(Inst::Code);
        self.emit(Inst::Align(4));
    }

    fn procedure_entry(&self, name: &Identifier) -> &'a ProcedureEntry {
        self.table
            .procedure(name)
            .unwrap_or_else(|| panic!("Procedure {} is not in the symbol table", name))
    }

    fn procedure(&mut self, decl: &ProcedureDeclaration) -> CodeGenResult<()> {
        debug!("Generating procedure {}", decl.name);
        let entry = self.procedure_entry(&decl.name);
        let layout = &entry.stack_layout;
        let frame_size = layout
            .frame_size()
            .ok_or_else(|| CodeGenError::UnallocatedFrame(decl.name.clone()).at(decl.position))?;

        self.emit(Inst::Blank);
        self.emit(Inst::Export(decl.name.to_string()));
        self.emit(Inst::Label(decl.name.to_string()));

        let frame = if layout.is_optimized_leaf_procedure {
            self.emit_commented(Inst::Sub(Reg::SP, Reg::SP, frame_size.into()), "allocate frame");
            Frame {
                scope: entry.local_scope,
                base: Reg::SP,
                bias: frame_size,
            }
        } else {
            let (old_fp, old_ra) = linkage_offsets(layout.old_frame_pointer_offset(), layout.old_return_address_offset());
            self.emit_commented(Inst::Sub(Reg::SP, Reg::SP, frame_size.into()), "allocate frame");
            self.emit_commented(Inst::Stw(Reg::FP, Reg::SP, old_fp), "save old frame pointer");
            self.emit_commented(Inst::Add(Reg::FP, Reg::SP, frame_size.into()), "setup new frame pointer");
            self.emit_commented(Inst::Stw(Reg::RA, Reg::FP, old_ra), "save return register");
            Frame {
                scope: entry.local_scope,
                base: Reg::FP,
                bias: 0,
            }
        };

        for s in &decl.body {
            self.statement(&frame, s)?;
        }

        if layout.is_optimized_leaf_procedure {
            self.emit_commented(Inst::Add(Reg::SP, Reg::SP, frame_size.into()), "release frame");
        } else {
            let (old_fp, old_ra) = linkage_offsets(layout.old_frame_pointer_offset(), layout.old_return_address_offset());
            self.emit_commented(Inst::Ldw(Reg::RA, Reg::FP, old_ra), "restore return register");
            self.emit_commented(Inst::Ldw(Reg::FP, Reg::SP, old_fp), "restore old frame pointer");
            self.emit_commented(Inst::Add(Reg::SP, Reg::SP, frame_size.into()), "release frame");
        }
        self.emit_commented(Inst::Jr(Reg::RA), "return");
        Ok(())
    }

    fn statement(&mut self, frame: &Frame, stm: &Statement) -> CodeGenResult<()> {
        match stm {
            Statement::Assign(a) => {
                let target = self.registers.current();
                self.address(frame, &a.target)?;
                let value = self.push(a.position)?;
                self.value(frame, &a.value)?;
                self.emit(Inst::Stw(value, target, 0));
                self.pop();
            }
            Statement::If(i) => {
                if i.else_part.is_empty() {
                    let end = self.new_label();
                    self.condition(frame, &i.condition, &end)?;
                    self.statement(frame, &i.then_part)?;
                    self.emit(Inst::Label(end));
                } else {
                    let otherwise = self.new_label();
                    self.condition(frame, &i.condition, &otherwise)?;
                    self.statement(frame, &i.then_part)?;
                    let end = self.new_label();
                    self.emit(Inst::J(end.clone()));
                    self.emit(Inst::Label(otherwise));
                    self.statement(frame, &i.else_part)?;
                    self.emit(Inst::Label(end));
                }
            }
            Statement::While(w) => {
                let start = self.new_label();
                let end = self.new_label();
                self.emit(Inst::Label(start.clone()));
                self.condition(frame, &w.condition, &end)?;
                self.statement(frame, &w.body)?;
                self.emit(Inst::J(start));
                self.emit(Inst::Label(end));
            }
            Statement::Call(c) => self.call(frame, c)?,
            Statement::Compound(c) => {
                for s in &c.statements {
                    self.statement(frame, s)?;
                }
            }
            Statement::Empty(_) => (),
        }
        Ok(())
    }

    fn call(&mut self, frame: &Frame, c: &CallStatement) -> CodeGenResult<()> {
        let callee = self.procedure_entry(&c.procedure);
        for (idx, (arg, param)) in c.arguments.iter().zip(callee.parameter_types.iter()).enumerate() {
            if param.is_reference {
                match arg {
                    Expression::Variable(v) => self.address(frame, &v.variable)?,
                    _ => panic!("Reference argument {} of {} is not a variable", idx + 1, c.procedure),
                }
            } else {
                self.value(frame, arg)?;
            }
            let offset = param
                .offset
                .unwrap_or_else(|| panic!("Parameter {} of {} has no offset", idx + 1, c.procedure));
            let r = self.registers.current();
            self.emit_commented(
                Inst::Stw(r, Reg::SP, offset),
                &format!("store argument #{}", idx),
            );
        }
        self.emit(Inst::Jal(c.procedure.to_string()));
        Ok(())
    }

    /// Evaluates a boolean expression and branches to `false_label` when it
    /// is false.  Falls through when it is true.
    fn condition(&mut self, frame: &Frame, exp: &Expression, false_label: &str) -> CodeGenResult<()> {
        match exp {
            Expression::Binary(b) if b.operator.is_comparison() => {
                let left = self.registers.current();
                self.value(frame, &b.left)?;
                let right = self.push(b.position)?;
                self.value(frame, &b.right)?;
                self.pop();
                self.emit(Inst::Branch(
                    branch_condition(b.operator.negate()),
                    left,
                    right,
                    false_label.into(),
                ));
            }
            _ => {
                let r = self.registers.current();
                self.value(frame, exp)?;
                self.emit(Inst::Branch(Cond::Eq, r, Reg::ZERO, false_label.into()));
            }
        }
        Ok(())
    }

    /// Evaluates `exp` into the current register.
    fn value(&mut self, frame: &Frame, exp: &Expression) -> CodeGenResult<()> {
        let r = self.registers.current();
        match exp {
            Expression::IntLiteral(i) => self.emit(Inst::Add(r, Reg::ZERO, i.value.into())),
            Expression::Unary(u) => {
                self.value(frame, &u.operand)?;
                match u.operator {
                    UnaryOperator::Minus => self.emit(Inst::Sub(r, Reg::ZERO, r.into())),
                }
            }
            Expression::Binary(b) if b.operator.is_comparison() => {
                // Comparisons used as values are materialized as 0 or 1.
                let otherwise = self.new_label();
                let end = self.new_label();
                self.condition(frame, exp, &otherwise)?;
                self.emit(Inst::Add(r, Reg::ZERO, 1.into()));
                self.emit(Inst::J(end.clone()));
                self.emit(Inst::Label(otherwise));
                self.emit(Inst::Add(r, Reg::ZERO, 0.into()));
                self.emit(Inst::Label(end));
            }
            Expression::Binary(b) => {
                self.value(frame, &b.left)?;
                let right = self.push(b.position)?;
                self.value(frame, &b.right)?;
                self.pop();
                let op = Operand::Register(right);
                self.emit(match b.operator {
                    BinaryOperator::Add => Inst::Add(r, r, op),
                    BinaryOperator::Sub => Inst::Sub(r, r, op),
                    BinaryOperator::Mul => Inst::Mul(r, r, op),
                    BinaryOperator::Div => Inst::Div(r, r, op),
                    cmp => panic!("Comparison {} reached arithmetic code generation", cmp),
                });
            }
            Expression::Variable(v) => {
                self.address(frame, &v.variable)?;
                self.emit(Inst::Ldw(r, r, 0));
            }
        }
        Ok(())
    }

    /// Computes the address of `var` into the current register.
    fn address(&mut self, frame: &Frame, var: &Variable) -> CodeGenResult<()> {
        let r = self.registers.current();
        match var {
            Variable::Named(n) => {
                let entry = match self.table.find(frame.scope, &n.name) {
                    Some(Entry::Variable(v)) => v,
                    _ => panic!("Variable {} is not in the symbol table", n.name),
                };
                let offset = entry
                    .offset
                    .unwrap_or_else(|| panic!("Variable {} has no offset", n.name));
                self.emit(Inst::Add(r, frame.base, (frame.bias + offset).into()));
                if entry.is_reference {
                    self.emit(Inst::Ldw(r, r, 0));
                }
            }
            Variable::ArrayAccess(a) => {
                let array = match a.array.ty() {
                    Type::Array(at) => at,
                    ty => panic!("Indexing into non-array type {}", ty),
                };
                self.address(frame, &a.array)?;
                let index = self.push(a.position)?;
                self.value(frame, &a.index)?;
                let bound = self.push(a.position)?;
                self.emit(Inst::Add(bound, Reg::ZERO, (array.length as i32).into()));
                self.emit(Inst::Branch(Cond::Geu, index, bound, INDEX_ERROR_ROUTINE.into()));
                self.pop();
                self.emit(Inst::Mul(index, index, array.base.byte_size().into()));
                self.pop();
                self.emit(Inst::Add(r, r, index.into()));
            }
            Variable::FieldAccess(f) => {
                let offset = f
                    .record
                    .ty()
                    .as_record()
                    .and_then(|rt| rt.field_offset(&f.field))
                    .unwrap_or_else(|| panic!("Field {} is not in the record", f.field));
                self.address(frame, &f.record)?;
                if offset != 0 {
                    self.emit(Inst::Add(r, r, offset.into()));
                }
            }
        }
        Ok(())
    }
}

fn linkage_offsets(old_fp: Option<i32>, old_ra: Option<i32>) -> (i32, i32) {
    match (old_fp, old_ra) {
        (Some(fp), Some(ra)) => (fp, ra),
        _ => panic!("Linkage offsets requested for an unallocated frame"),
    }
}

/// The branch taken when `op` holds between the left and right operands.
fn branch_condition(op: BinaryOperator) -> Cond {
    match op {
        BinaryOperator::Equ => Cond::Eq,
        BinaryOperator::Neq => Cond::Ne,
        BinaryOperator::Lst => Cond::Lt,
        BinaryOperator::Lse => Cond::Le,
        BinaryOperator::Grt => Cond::Gt,
        BinaryOperator::Gre => Cond::Ge,
        arith => panic!("Arithmetic operator {} used as a branch condition", arith),
    }
}
