use std::fmt::*;

use crate::compiler::arch::registers::Reg;

/*
Assembly DSL for the ECO32 target.

Every instruction takes registers first and a register, an immediate or a
label last:
```
    add     $8,$25,-4
    ldw     $8,$8,0
    bgeu    $9,$10,_indexError
    jal     printi
```

Three operand arithmetic accepts either a register or an immediate as its
last operand and the assembler picks the encoding.
*/

/// Last operand of an arithmetic instruction.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Operand {
    Register(Reg),
    Immediate(i32),
}

impl From<Reg> for Operand {
    fn from(r: Reg) -> Self {
        Operand::Register(r)
    }
}

impl From<i32> for Operand {
    fn from(i: i32) -> Self {
        Operand::Immediate(i)
    }
}

impl Display for Operand {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result {
        match self {
            Operand::Register(r) => f.write_fmt(format_args!("{}", r)),
            Operand::Immediate(i) => f.write_fmt(format_args!("{}", i)),
        }
    }
}

/// Conditions of the compare-and-branch instructions.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Cond {
    Eq,
    Ne,
    Lt,
    Le,
    Gt,
    Ge,
    /// Unsigned greater or equal.
    Geu,
}

impl Cond {
    fn mnemonic(&self) -> &'static str {
        match self {
            Cond::Eq => "beq",
            Cond::Ne => "bne",
            Cond::Lt => "blt",
            Cond::Le => "ble",
            Cond::Gt => "bgt",
            Cond::Ge => "bge",
            Cond::Geu => "bgeu",
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub enum Inst {
    Import(String),
    Export(String),
    Code,
    Align(u32),
    Label(String),
    Blank,

    Add(Reg, Reg, Operand),
    Sub(Reg, Reg, Operand),
    Mul(Reg, Reg, Operand),
    Div(Reg, Reg, Operand),

    Ldw(Reg, Reg, i32),
    Stw(Reg, Reg, i32),

    Branch(Cond, Reg, Reg, String),
    J(String),
    Jr(Reg),
    Jal(String),
}

impl Inst {
    /// Directives and labels are written flush left; everything else is
    /// an instruction.
    fn is_instruction(&self) -> bool {
        !matches!(
            self,
            Inst::Import(_) | Inst::Export(_) | Inst::Code | Inst::Align(_) | Inst::Label(_) | Inst::Blank
        )
    }
}

impl Display for Inst {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result {
        use Inst::*;
        match self {
            Import(name) => f.write_fmt(format_args!("\t.import\t{}", name)),
            Export(name) => f.write_fmt(format_args!("\t.export\t{}", name)),
            Code => f.write_str("\t.code"),
            Align(n) => f.write_fmt(format_args!("\t.align\t{}", n)),
            Label(lbl) => f.write_fmt(format_args!("{}:", lbl)),
            Blank => Ok(()),

            Add(d, s, o) => f.write_fmt(format_args!("\tadd\t{},{},{}", d, s, o)),
            Sub(d, s, o) => f.write_fmt(format_args!("\tsub\t{},{},{}", d, s, o)),
            Mul(d, s, o) => f.write_fmt(format_args!("\tmul\t{},{},{}", d, s, o)),
            Div(d, s, o) => f.write_fmt(format_args!("\tdiv\t{},{},{}", d, s, o)),

            Ldw(d, base, off) => f.write_fmt(format_args!("\tldw\t{},{},{}", d, base, off)),
            Stw(s, base, off) => f.write_fmt(format_args!("\tstw\t{},{},{}", s, base, off)),

            Branch(c, a, b, lbl) => {
                f.write_fmt(format_args!("\t{}\t{},{},{}", c.mnemonic(), a, b, lbl))
            }
            J(lbl) => f.write_fmt(format_args!("\tj\t{}", lbl)),
            Jr(r) => f.write_fmt(format_args!("\tjr\t{}", r)),
            Jal(lbl) => f.write_fmt(format_args!("\tjal\t{}", lbl)),
        }
    }
}

/// One line of the output file: an instruction or directive with an
/// optional trailing comment.
#[derive(Clone, Debug, PartialEq)]
pub struct Line {
    pub inst: Inst,
    pub comment: Option<String>,
}

impl Line {
    pub fn new(inst: Inst) -> Line {
        Line {
            inst,
            comment: None,
        }
    }

    pub fn with_comment(inst: Inst, comment: &str) -> Line {
        Line {
            inst,
            comment: Some(comment.into()),
        }
    }
}

impl From<Inst> for Line {
    fn from(inst: Inst) -> Self {
        Line::new(inst)
    }
}

impl Display for Line {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result {
        f.write_fmt(format_args!("{}", self.inst))?;
        match &self.comment {
            Some(c) if self.inst.is_instruction() => f.write_fmt(format_args!("\t\t; {}", c)),
            Some(c) => f.write_fmt(format_args!("\t; {}", c)),
            None => Ok(()),
        }
    }
}

/// Writes `lines` one per line to `out`.
pub fn write_lines<W: std::io::Write>(out: &mut W, lines: &[Line]) -> std::io::Result<()> {
    for l in lines {
        std::io::Write::write_fmt(out, format_args!("{}\n", l))?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_instruction_text() {
        let r8 = Reg::new(8);
        let r9 = Reg::new(9);
        for (inst, expected) in vec![
            (Inst::Add(r8, Reg::FP, (-4).into()), "\tadd\t$8,$25,-4"),
            (Inst::Sub(r8, Reg::ZERO, r8.into()), "\tsub\t$8,$0,$8"),
            (Inst::Mul(r9, r9, 4.into()), "\tmul\t$9,$9,4"),
            (Inst::Div(r8, r8, r9.into()), "\tdiv\t$8,$8,$9"),
            (Inst::Ldw(r8, r8, 0), "\tldw\t$8,$8,0"),
            (Inst::Stw(Reg::RA, Reg::FP, -12), "\tstw\t$31,$25,-12"),
            (
                Inst::Branch(Cond::Geu, r9, Reg::new(10), "_indexError".into()),
                "\tbgeu\t$9,$10,_indexError",
            ),
            (Inst::Branch(Cond::Le, r8, r9, "L3".into()), "\tble\t$8,$9,L3"),
            (Inst::J("L0".into()), "\tj\tL0"),
            (Inst::Jr(Reg::RA), "\tjr\t$31"),
            (Inst::Jal("printi".into()), "\tjal\tprinti"),
            (Inst::Label("L1".into()), "L1:"),
            (Inst::Import("printi".into()), "\t.import\tprinti"),
            (Inst::Export("main".into()), "\t.export\tmain"),
            (Inst::Code, "\t.code"),
            (Inst::Align(4), "\t.align\t4"),
            (Inst::Blank, ""),
        ] {
            assert_eq!(inst.to_string(), expected);
        }
    }

    #[test]
    fn test_comment() {
        let line = Line::with_comment(Inst::Jr(Reg::RA), "return");
        assert_eq!(line.to_string(), "\tjr\t$31\t\t; return");
        assert_eq!(Line::new(Inst::Code).to_string(), "\t.code");
    }

    #[test]
    fn test_write_lines() {
        let mut buf = vec![];
        write_lines(
            &mut buf,
            &[Inst::Label("main".into()).into(), Inst::Jr(Reg::RA).into()],
        )
        .unwrap();
        assert_eq!(String::from_utf8(buf).unwrap(), "main:\n\tjr\t$31\n");
    }
}
