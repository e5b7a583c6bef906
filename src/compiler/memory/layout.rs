/// Bytes used by each of the two linkage words saved in a non-leaf frame:
/// the caller's frame pointer and the return address.
pub const LINKAGE_WORD_SIZE: i32 = 4;

/**
 Describes the stack frame of one procedure.

 ```text
        caller's outgoing area  = this procedure's argument area
 FP ->  +----------------------+
        | local variables      |  localVarAreaSize
        +----------------------+
        | old frame pointer    |
        | old return address   |
        +----------------------+
        | outgoing area        |  outgoingAreaSize
 SP ->  +----------------------+
 ```

 All sizes are unset until the variable allocator has run over the
 procedure; the accessors below return `None` until then.
*/
#[derive(Clone, Debug, Default, PartialEq)]
pub struct StackLayout {
    pub argument_area_size: Option<i32>,
    pub local_var_area_size: Option<i32>,
    pub outgoing_area_size: Option<i32>,
    pub is_optimized_leaf_procedure: bool,
}

impl StackLayout {
    pub fn new() -> StackLayout {
        StackLayout::default()
    }

    pub fn is_allocated(&self) -> bool {
        self.argument_area_size.is_some()
            && self.local_var_area_size.is_some()
            && self.outgoing_area_size.is_some()
    }

    /// The total size of the stack frame.  A leaf-optimized frame holds only
    /// the local variables.
    pub fn frame_size(&self) -> Option<i32> {
        let locals = self.local_var_area_size?;
        if self.is_optimized_leaf_procedure {
            return Some(locals);
        }
        let outgoing = self.outgoing_area_size?;
        Some(locals + outgoing + 2 * LINKAGE_WORD_SIZE)
    }

    /// Offset from the new stack pointer at which the caller's frame pointer
    /// is saved.  Leaf-optimized frames do not save it.
    pub fn old_frame_pointer_offset(&self) -> Option<i32> {
        if self.is_optimized_leaf_procedure {
            return None;
        }
        Some(self.outgoing_area_size? + LINKAGE_WORD_SIZE)
    }

    /// Offset from the new frame pointer at which the return address is
    /// saved.  Leaf-optimized frames do not save it.
    pub fn old_return_address_offset(&self) -> Option<i32> {
        if self.is_optimized_leaf_procedure {
            return None;
        }
        Some(-(self.local_var_area_size? + 2 * LINKAGE_WORD_SIZE))
    }
}
