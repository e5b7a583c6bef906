/*!
 # eco32
 ## About
 This module models the assembly language of the ECO32 machine that SPL
 programs are compiled to: its instructions, the assembler directives used
 by the generated module and the textual form the assembler reads.

 Registers are shared with the architecture independent `arch` module.
 */

pub mod assembly;
