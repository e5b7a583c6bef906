use log::debug;

use crate::compiler::{
    ast::*,
    memory::{StackLayout, LINKAGE_WORD_SIZE},
    AtPosition, CompilerOptions,
};

use super::{
    error::SemanticError,
    symbol_table::{Entry, ParameterType, ProcedureEntry, ScopeId, SymbolTable, TypeEntry, VariableEntry},
    SemanticResult,
};

/// Builds the global symbol table for `program`: every type and procedure
/// declaration, one local scope per procedure and the resolved type of every
/// type expression in the tree.
pub fn build_symbol_table(
    program: &Program,
    options: &CompilerOptions,
) -> SemanticResult<SymbolTable> {
    TableBuilder::new(&options.entry_point).build(program)
}

pub struct TableBuilder<'a> {
    table: SymbolTable,
    entry_point: &'a Identifier,
}

impl<'a> TableBuilder<'a> {
    pub fn new(entry_point: &'a Identifier) -> TableBuilder<'a> {
        TableBuilder {
            table: SymbolTable::with_builtins(),
            entry_point,
        }
    }

    pub fn build(mut self, program: &Program) -> SemanticResult<SymbolTable> {
        debug!("Start building the symbol table");
        for decl in &program.declarations {
            match decl {
                GlobalDeclaration::Type(t) => self.type_declaration(t)?,
                GlobalDeclaration::Procedure(p) => self.procedure_declaration(p)?,
            }
        }
        self.check_entry_point(program)?;
        debug!("Finished building the symbol table");
        Ok(self.table)
    }

    fn type_declaration(&mut self, decl: &TypeDeclaration) -> SemanticResult<()> {
        let global = self.table.global();
        if self.table.find(global, &decl.name).is_some() {
            return Err(SemanticError::RedeclarationAsType(decl.name.clone()).at(decl.position));
        }

        let ty = self.resolve(global, &decl.type_expression)?.clone();
        debug!("Type {} = {}", decl.name, ty);
        self.table.enter(
            global,
            decl.name.clone(),
            Entry::Type(TypeEntry { ty }),
            SemanticError::RedeclarationAsType(decl.name.clone()).at(decl.position),
        )
    }

    fn procedure_declaration(&mut self, decl: &ProcedureDeclaration) -> SemanticResult<()> {
        debug!("Procedure {}", decl.name);
        let global = self.table.global();
        let local = self.table.new_scope(global);

        let mut parameter_types = vec![];
        for p in &decl.parameters {
            let ty = self.resolve(local, &p.type_expression)?.clone();
            if ty.is_aggregate() && !p.is_reference {
                return Err(SemanticError::MustBeAReferenceParameter(p.name.clone()).at(p.position));
            }
            self.table.enter(
                local,
                p.name.clone(),
                Entry::Variable(VariableEntry::new(ty.clone(), p.is_reference)),
                SemanticError::RedeclarationAsParameter(p.name.clone()).at(p.position),
            )?;
            parameter_types.push(ParameterType::new(ty, p.is_reference));
        }

        let mut local_var_area_size: i32 = 0;
        for v in &decl.variables {
            let ty = self.resolve(local, &v.type_expression)?.clone();
            let size = ty.byte_size();
            self.table.enter(
                local,
                v.name.clone(),
                Entry::Variable(VariableEntry::new(ty, false)),
                SemanticError::RedeclarationAsVariable(v.name.clone()).at(v.position),
            )?;
            // The linkage words must still fit next to the locals.
            local_var_area_size = local_var_area_size
                .checked_add(size)
                .and_then(|total| total.checked_add(2 * LINKAGE_WORD_SIZE).map(|_| total))
                .ok_or_else(|| {
                    SemanticError::LocalVariablesTooLarge(decl.name.clone()).at(v.position)
                })?;
        }

        let entry = ProcedureEntry {
            local_scope: local,
            parameter_types,
            stack_layout: StackLayout::new(),
            is_builtin: false,
        };
        self.table.enter(
            global,
            decl.name.clone(),
            Entry::Procedure(entry),
            SemanticError::RedeclarationAsProcedure(decl.name.clone()).at(decl.position),
        )
    }

    /// Resolves a type expression in `scope` and records the result in the
    /// expression's slot.
    fn resolve<'t>(&self, scope: ScopeId, texp: &'t TypeExpression) -> SemanticResult<&'t Type> {
        let ty = match texp {
            TypeExpression::Named(n) => {
                let entry = self.table.lookup(scope, &n.name, || {
                    SemanticError::UndefinedType(n.name.clone()).at(n.position)
                })?;
                match entry {
                    Entry::Type(t) => t.ty.clone(),
                    _ => return Err(SemanticError::NotAType(n.name.clone()).at(n.position)),
                }
            }
            TypeExpression::Array(a) => {
                let base = self.resolve(scope, &a.base)?;
                let ty = Type::array(base.clone(), a.size);
                if ty.checked_byte_size().is_none() {
                    return Err(SemanticError::TypeTooLarge(ty).at(a.position));
                }
                ty
            }
            TypeExpression::Record(r) => {
                for (idx, field) in r.fields.iter().enumerate() {
                    if r.fields[..idx].iter().any(|f| f.name == field.name) {
                        return Err(
                            SemanticError::FieldAlreadyExists(field.name.clone()).at(field.position)
                        );
                    }
                }
                let mut fields = vec![];
                for field in &r.fields {
                    let ty = self.resolve(scope, &field.type_expression)?;
                    fields.push(RecordField::new(field.name.clone(), ty.clone()));
                }
                let ty = Type::record(fields);
                if ty.checked_byte_size().is_none() {
                    return Err(SemanticError::TypeTooLarge(ty).at(r.position));
                }
                ty
            }
        };
        Ok(texp.slot().set(ty))
    }

    /// The entry procedure must be declared at the top level, must be a
    /// procedure and must take no parameters.
    fn check_entry_point(&self, program: &Program) -> SemanticResult<()> {
        let entry = self.entry_point;
        let decl = program
            .declarations
            .iter()
            .find(|d| d.name() == entry)
            .ok_or_else(|| SemanticError::MainIsMissing(entry.clone()).at(program.position))?;

        match decl {
            GlobalDeclaration::Procedure(p) if p.parameters.is_empty() => Ok(()),
            GlobalDeclaration::Procedure(p) => {
                Err(SemanticError::MainMustNotHaveParameters(entry.clone()).at(p.position))
            }
            GlobalDeclaration::Type(t) => {
                Err(SemanticError::MainIsNotAProcedure(entry.clone()).at(t.position))
            }
        }
    }
}

/// Renders the local symbol table of every procedure in `program`, in
/// declaration order.
pub fn symbol_table_dump(program: &Program, table: &SymbolTable) -> String {
    let mut out = String::new();
    for p in program.procedures() {
        if let Some(entry) = table.procedure(&p.name) {
            out.push_str(&format!(
                "Symbol table at end of procedure '{}':\n{}\n",
                p.name,
                table.display_scope(entry.local_scope)
            ));
        }
    }
    out
}
