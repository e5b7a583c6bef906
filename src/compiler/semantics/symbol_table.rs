use log::trace;

use crate::compiler::{
    ast::{Identifier, Type, REFERENCE_BYTE_SIZE},
    memory::StackLayout,
};

/// Handle to one scope stored in a [`SymbolTable`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct ScopeId(usize);

impl ScopeId {
    pub fn index(&self) -> usize {
        self.0
    }
}

#[derive(Clone, Debug, PartialEq)]
pub enum Entry {
    Type(TypeEntry),
    Variable(VariableEntry),
    Procedure(ProcedureEntry),
}

#[derive(Clone, Debug, PartialEq)]
pub struct TypeEntry {
    pub ty: Type,
}

/// A parameter or local variable as seen from inside its procedure.  The
/// offset is relative to the frame pointer and is assigned by the variable
/// allocator.
#[derive(Clone, Debug, PartialEq)]
pub struct VariableEntry {
    pub ty: Type,
    pub is_reference: bool,
    pub offset: Option<i32>,
}

/// A parameter as seen by callers.  After allocation its offset equals the
/// offset of the matching [`VariableEntry`] in the callee's local scope.
#[derive(Clone, Debug, PartialEq)]
pub struct ParameterType {
    pub ty: Type,
    pub is_reference: bool,
    pub offset: Option<i32>,
}

#[derive(Clone, Debug, PartialEq)]
pub struct ProcedureEntry {
    pub local_scope: ScopeId,
    pub parameter_types: Vec<ParameterType>,
    pub stack_layout: StackLayout,
    pub is_builtin: bool,
}

impl Entry {
    pub fn kind(&self) -> &'static str {
        match self {
            Entry::Type(_) => "type",
            Entry::Variable(_) => "var",
            Entry::Procedure(_) => "proc",
        }
    }
}

impl VariableEntry {
    pub fn new(ty: Type, is_reference: bool) -> VariableEntry {
        VariableEntry {
            ty,
            is_reference,
            offset: None,
        }
    }
}

impl ParameterType {
    pub fn new(ty: Type, is_reference: bool) -> ParameterType {
        ParameterType {
            ty,
            is_reference,
            offset: None,
        }
    }

    /// Bytes this parameter occupies in an argument area: one word for a
    /// reference, the full value otherwise.
    pub fn footprint(&self) -> i32 {
        if self.is_reference {
            REFERENCE_BYTE_SIZE
        } else {
            self.ty.byte_size()
        }
    }
}

impl ProcedureEntry {
    /// Total bytes a caller must reserve in its outgoing area to call this
    /// procedure.
    pub fn argument_footprint(&self) -> i32 {
        self.parameter_types.iter().map(|p| p.footprint()).sum()
    }
}

/// One lexical scope: its entries in insertion order and the scope that
/// encloses it.
#[derive(Clone, Debug, PartialEq)]
pub struct Scope {
    parent: Option<ScopeId>,
    entries: Vec<(Identifier, Entry)>,
}

impl Scope {
    fn new(parent: Option<ScopeId>) -> Scope {
        Scope {
            parent,
            entries: vec![],
        }
    }

    pub fn parent(&self) -> Option<ScopeId> {
        self.parent
    }

    pub fn entries(&self) -> impl Iterator<Item = (&Identifier, &Entry)> {
        self.entries.iter().map(|(n, e)| (n, e))
    }

    pub fn get(&self, name: &Identifier) -> Option<&Entry> {
        self.entries.iter().find(|(n, _)| n == name).map(|(_, e)| e)
    }

    fn position(&self, name: &Identifier) -> Option<usize> {
        self.entries.iter().position(|(n, _)| n == name)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/**
 `SymbolTable` owns every scope created while compiling a program.  Scopes
 refer to their enclosing scope by [`ScopeId`], so a procedure's local scope
 is just a handle stored in its [`ProcedureEntry`] and lives as long as the
 table does.

 The first scope is the global scope.  Name resolution starts at a given
 scope and walks outward through the parents until the name is found.
*/
#[derive(Clone, Debug, PartialEq)]
pub struct SymbolTable {
    scopes: Vec<Scope>,
}

impl Default for SymbolTable {
    fn default() -> Self {
        SymbolTable::new()
    }
}

impl SymbolTable {
    /// Creates a table holding a single empty global scope.
    pub fn new() -> SymbolTable {
        SymbolTable {
            scopes: vec![Scope::new(None)],
        }
    }

    pub fn global(&self) -> ScopeId {
        ScopeId(0)
    }

    /// Creates a new, empty scope enclosed by `parent`.
    pub fn new_scope(&mut self, parent: ScopeId) -> ScopeId {
        let id = ScopeId(self.scopes.len());
        self.scopes.push(Scope::new(Some(parent)));
        trace!("Created scope {} with parent {}", id.0, parent.0);
        id
    }

    pub fn scope(&self, id: ScopeId) -> &Scope {
        &self.scopes[id.0]
    }

    /// Adds `entry` to `scope`.  Fails with `on_duplicate` if the name is
    /// already declared in that same scope; enclosing scopes are not checked.
    pub fn enter<E>(
        &mut self,
        scope: ScopeId,
        name: Identifier,
        entry: Entry,
        on_duplicate: E,
    ) -> Result<(), E> {
        let s = &mut self.scopes[scope.0];
        if s.position(&name).is_some() {
            return Err(on_duplicate);
        }
        trace!("Enter {} '{}' into scope {}", entry.kind(), name, scope.0);
        s.entries.push((name, entry));
        Ok(())
    }

    /// Searches `scope` and then each enclosing scope for `name`.
    pub fn find(&self, scope: ScopeId, name: &Identifier) -> Option<&Entry> {
        self.resolve(scope, name)
            .map(|(id, idx)| &self.scopes[id.0].entries[idx].1)
    }

    pub fn find_mut(&mut self, scope: ScopeId, name: &Identifier) -> Option<&mut Entry> {
        match self.resolve(scope, name) {
            Some((id, idx)) => Some(&mut self.scopes[id.0].entries[idx].1),
            None => None,
        }
    }

    /// Like [`SymbolTable::find`], but fails with the error produced by
    /// `on_missing` when the name is not declared in any enclosing scope.
    pub fn lookup<E, F: FnOnce() -> E>(
        &self,
        scope: ScopeId,
        name: &Identifier,
        on_missing: F,
    ) -> Result<&Entry, E> {
        self.find(scope, name).ok_or_else(on_missing)
    }

    /// Returns the procedure declared in the global scope under `name`.
    pub fn procedure(&self, name: &Identifier) -> Option<&ProcedureEntry> {
        match self.scope(self.global()).get(name) {
            Some(Entry::Procedure(p)) => Some(p),
            _ => None,
        }
    }

    pub fn procedure_mut(&mut self, name: &Identifier) -> Option<&mut ProcedureEntry> {
        let global = self.global();
        match self.find_mut(global, name) {
            Some(Entry::Procedure(p)) => Some(p),
            _ => None,
        }
    }

    /// Returns the variable `name` declared directly in `scope`.
    pub fn local_variable_mut(
        &mut self,
        scope: ScopeId,
        name: &Identifier,
    ) -> Option<&mut VariableEntry> {
        let s = &mut self.scopes[scope.0];
        match s.position(name) {
            Some(idx) => match &mut s.entries[idx].1 {
                Entry::Variable(v) => Some(v),
                _ => None,
            },
            None => None,
        }
    }

    fn resolve(&self, scope: ScopeId, name: &Identifier) -> Option<(ScopeId, usize)> {
        let mut current = Some(scope);
        while let Some(id) = current {
            let s = &self.scopes[id.0];
            if let Some(idx) = s.position(name) {
                return Some((id, idx));
            }
            current = s.parent;
        }
        None
    }

    /// Renders the entries of a single scope, one per line.
    pub fn display_scope(&self, scope: ScopeId) -> ScopeDisplay<'_> {
        ScopeDisplay { table: self, scope }
    }
}

pub struct ScopeDisplay<'a> {
    table: &'a SymbolTable,
    scope: ScopeId,
}

impl std::fmt::Display for ScopeDisplay<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let scope = self.table.scope(self.scope);
        match scope.parent {
            Some(p) => f.write_fmt(format_args!(
                "scope {} (enclosed by scope {})\n",
                self.scope.0, p.0
            ))?,
            None => f.write_str("global scope\n")?,
        }
        if scope.is_empty() {
            return f.write_str("\t<empty>\n");
        }
        f.write_str("\tName | Kind | Type | Offset\n")?;
        for (name, entry) in scope.entries() {
            f.write_fmt(format_args!("\t{} | {}\n", name, entry))?;
        }
        Ok(())
    }
}

fn write_offset(f: &mut std::fmt::Formatter<'_>, offset: Option<i32>) -> std::fmt::Result {
    match offset {
        Some(o) => f.write_fmt(format_args!("{}", o)),
        None => f.write_str("NULL"),
    }
}

impl std::fmt::Display for Entry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Entry::Type(t) => f.write_fmt(format_args!("type | {} | -", t.ty)),
            Entry::Variable(v) => {
                let kind = if v.is_reference { "var ref" } else { "var" };
                f.write_fmt(format_args!("{} | {} | ", kind, v.ty))?;
                write_offset(f, v.offset)
            }
            Entry::Procedure(p) => {
                f.write_str(if p.is_builtin { "builtin proc | (" } else { "proc | (" })?;
                for (i, param) in p.parameter_types.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    if param.is_reference {
                        f.write_str("ref ")?;
                    }
                    f.write_fmt(format_args!("{}", param.ty))?;
                }
                f.write_str(") | -")
            }
        }
    }
}
