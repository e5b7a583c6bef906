use std::cell::OnceCell;

use super::Type;

/// The computed type of a syntax-tree node.
///
/// A slot starts empty when the tree is built and is filled exactly once by
/// the pass that owns it.  Later passes only read it.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct TypeSlot(OnceCell<Type>);

impl TypeSlot {
    pub fn new() -> TypeSlot {
        TypeSlot(OnceCell::new())
    }

    pub fn get(&self) -> Option<&Type> {
        self.0.get()
    }

    /// Stores the computed type and returns a reference to it.  Storing the
    /// same type a second time is allowed; storing a different one is a bug
    /// in the compiler.
    pub fn set(&self, ty: Type) -> &Type {
        if let Some(existing) = self.0.get() {
            if *existing != ty {
                panic!("Computed type rewritten from {} to {}", existing, ty);
            }
            return existing;
        }
        self.0.get_or_init(|| ty)
    }

    /// Reads a slot that an earlier pass must already have filled.
    pub fn expect(&self, node: &str) -> &Type {
        match self.0.get() {
            Some(ty) => ty,
            None => panic!("{} has no computed type", node),
        }
    }
}
