/**
 * Reg is a general purpose register of the target machine, identified by its
 * number.  A handful of register numbers have a fixed role in the calling
 * convention; the rest form the bank used to evaluate expressions.
 */
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Reg(u8);

impl Reg {
    /// Always reads as zero; writes are discarded.
    pub const ZERO: Reg = Reg(0);
    /// Frame pointer.
    pub const FP: Reg = Reg(25);
    /// Stack pointer.
    pub const SP: Reg = Reg(29);
    /// Return address, written by `jal`.
    pub const RA: Reg = Reg(31);

    /// First and last register available to the expression bank.
    pub const FIRST_FREE: Reg = Reg(8);
    pub const LAST_FREE: Reg = Reg(23);

    pub fn new(n: u8) -> Reg {
        Reg(n)
    }

    pub fn number(&self) -> u8 {
        self.0
    }

    pub fn is_free_use(&self) -> bool {
        Reg::FIRST_FREE <= *self && *self <= Reg::LAST_FREE
    }
}

impl std::fmt::Display for Reg {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::result::Result<(), std::fmt::Error> {
        f.write_fmt(format_args!("${}", self.0))
    }
}

/// Raised when an expression needs more registers than the bank holds.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RegisterOverflow;

/**
 * A logical stack of registers over the free bank.  The top of the stack is
 * the register that the expression currently being generated writes its
 * result into.  Sub-expressions push a fresh register, compute into it, and
 * pop back once the parent has consumed the result.
 */
#[derive(Debug)]
pub struct RegisterStack {
    top: u8,
}

impl Default for RegisterStack {
    fn default() -> Self {
        RegisterStack::new()
    }
}

impl RegisterStack {
    pub fn new() -> RegisterStack {
        RegisterStack {
            top: Reg::FIRST_FREE.0,
        }
    }

    /// The register currently on top of the stack.
    pub fn current(&self) -> Reg {
        Reg(self.top)
    }

    /// Moves to the next register of the bank and returns it.
    pub fn push(&mut self) -> Result<Reg, RegisterOverflow> {
        let next = Reg(self.top + 1);
        if !next.is_free_use() {
            return Err(RegisterOverflow);
        }
        self.top = next.0;
        Ok(next)
    }

    /// Releases the top register and returns the one below it.
    pub fn pop(&mut self) -> Reg {
        if self.top == Reg::FIRST_FREE.0 {
            panic!("Popped the last register off of the register stack");
        }
        self.top -= 1;
        Reg(self.top)
    }

    /// Number of registers in use, including the current one.
    pub fn depth(&self) -> usize {
        (self.top - Reg::FIRST_FREE.0) as usize + 1
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display() {
        assert_eq!(Reg::ZERO.to_string(), "$0");
        assert_eq!(Reg::FP.to_string(), "$25");
        assert_eq!(Reg::SP.to_string(), "$29");
        assert_eq!(Reg::RA.to_string(), "$31");
    }

    #[test]
    fn test_reserved_registers_are_not_free() {
        for r in [Reg::ZERO, Reg::FP, Reg::SP, Reg::RA].iter() {
            assert!(!r.is_free_use());
        }
        assert!(Reg::new(8).is_free_use());
        assert!(Reg::new(23).is_free_use());
        assert!(!Reg::new(24).is_free_use());
    }

    #[test]
    fn test_push_pop() {
        let mut stack = RegisterStack::new();
        assert_eq!(stack.current(), Reg::new(8));
        assert_eq!(stack.push(), Ok(Reg::new(9)));
        assert_eq!(stack.push(), Ok(Reg::new(10)));
        assert_eq!(stack.depth(), 3);
        assert_eq!(stack.pop(), Reg::new(9));
        assert_eq!(stack.current(), Reg::new(9));
    }

    #[test]
    fn test_overflow() {
        let mut stack = RegisterStack::new();
        for _ in 9..=23 {
            stack.push().unwrap();
        }
        assert_eq!(stack.current(), Reg::LAST_FREE);
        assert_eq!(stack.push(), Err(RegisterOverflow));
        assert_eq!(stack.current(), Reg::LAST_FREE);
    }

    #[test]
    #[should_panic]
    fn test_pop_past_bottom() {
        let mut stack = RegisterStack::new();
        stack.pop();
    }
}
