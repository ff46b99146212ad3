//! One-line disassembly for trace logs and debugging.

use crate::cpu::table::OPCODES;
use crate::memory::Memory;

/// Disassemble the instruction at `addr`.
///
/// Returns the assembler text with operands filled in and the instruction
/// length in bytes. Operand bytes past 0xFFFF wrap to the bottom of memory.
pub fn disassemble(memory: &Memory, addr: u16) -> (String, u8) {
    let instr = &OPCODES[memory.read(addr) as usize];
    let lo = memory.read(addr.wrapping_add(1));
    let hi = memory.read(addr.wrapping_add(2));

    let text = match instr.length {
        3 => {
            let word = format!("${:04X}", u16::from_le_bytes([lo, hi]));
            instr.mnemonic.replace("d16", &word).replace("a16", &word)
        }
        2 => instr.mnemonic.replace("d8", &format!("${:02X}", lo)),
        _ => instr.mnemonic.to_string(),
    };

    (text, instr.length)
}
