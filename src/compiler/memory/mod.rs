/**
 * Stack frame layout.
 *
 * The following tasks are performed by this submodule
 * 1. Compute the size of the argument, local variable and outgoing areas of
 * every procedure's stack frame.
 * 2. Assign a frame offset to every parameter and local variable.
 * 3. Render the computed layout for the `--vars` dump.
 */
mod allocator;
mod diagram;
mod layout;

pub use allocator::allocate_variables;
pub use diagram::stack_layout_dump;
pub use layout::{StackLayout, LINKAGE_WORD_SIZE};
