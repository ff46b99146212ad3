//! The 256-entry instruction descriptor table.
//!
//! Each opcode maps to its length, cycle cost, category and handler. The
//! table is built once from the opcode bit patterns and shared read-only;
//! the `describe` match is exhaustive over `u8`, so every byte value has a
//! handler. Undocumented opcodes alias their documented equivalents.

use lazy_static::lazy_static;

use super::{Cpu8080, IoPorts};

/// Instruction groups as listed in the 8080 programmer's manual.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Category {
    DataTransfer,
    Arithmetic,
    Logical,
    Rotate,
    Branch,
    Stack,
    Io,
    Control,
}

/// An instruction as fetched by the dispatcher.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Decoded {
    pub opcode: u8,
    /// The two bytes following the opcode, whether or not the instruction
    /// uses them.
    pub operands: [u8; 2],
    /// Address of the following instruction (PC + length).
    pub next_pc: u16,
}

impl Decoded {
    #[inline]
    pub fn d8(&self) -> u8 {
        self.operands[0]
    }

    /// Little-endian 16-bit immediate.
    #[inline]
    pub fn d16(&self) -> u16 {
        u16::from_le_bytes(self.operands)
    }
}

/// What the dispatcher does after a handler returns.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Flow {
    /// Advance PC past the instruction.
    Next,
    /// The handler loaded PC itself; leave it alone.
    Jump,
    /// HLT: advance PC and stop.
    Halt,
}

pub type Handler = fn(&mut Cpu8080, &mut dyn IoPorts, &Decoded) -> Flow;

/// Static description of one opcode.
#[derive(Clone, Copy)]
pub struct Instruction {
    /// Assembler syntax with `d8`, `d16` and `a16` operand placeholders.
    /// Undocumented aliases are prefixed with `*`.
    pub mnemonic: &'static str,
    pub category: Category,
    /// Length in bytes including the opcode.
    pub length: u8,
    /// Cycles when the instruction falls through (or is unconditional).
    pub cycles: u8,
    /// Cycles when a branch, call or return transfers control.
    pub cycles_taken: u8,
    pub handler: Handler,
}

impl std::fmt::Debug for Instruction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Instruction")
            .field("mnemonic", &self.mnemonic)
            .field("category", &self.category)
            .field("length", &self.length)
            .field("cycles", &self.cycles)
            .field("cycles_taken", &self.cycles_taken)
            .finish()
    }
}

lazy_static! {
    pub static ref OPCODES: [Instruction; 256] =
        std::array::from_fn(|opcode| describe(opcode as u8));
}

#[rustfmt::skip]
const MNEMONICS: [&str; 256] = [
    // 00
    "NOP", "LXI B,d16", "STAX B", "INX B", "INR B", "DCR B", "MVI B,d8", "RLC",
    // 08
    "*NOP", "DAD B", "LDAX B", "DCX B", "INR C", "DCR C", "MVI C,d8", "RRC",
    // 10
    "*NOP", "LXI D,d16", "STAX D", "INX D", "INR D", "DCR D", "MVI D,d8", "RAL",
    // 18
    "*NOP", "DAD D", "LDAX D", "DCX D", "INR E", "DCR E", "MVI E,d8", "RAR",
    // 20
    "*NOP", "LXI H,d16", "SHLD a16", "INX H", "INR H", "DCR H", "MVI H,d8", "DAA",
    // 28
    "*NOP", "DAD H", "LHLD a16", "DCX H", "INR L", "DCR L", "MVI L,d8", "CMA",
    // 30
    "*NOP", "LXI SP,d16", "STA a16", "INX SP", "INR M", "DCR M", "MVI M,d8", "STC",
    // 38
    "*NOP", "DAD SP", "LDA a16", "DCX SP", "INR A", "DCR A", "MVI A,d8", "CMC",
    // 40
    "MOV B,B", "MOV B,C", "MOV B,D", "MOV B,E", "MOV B,H", "MOV B,L", "MOV B,M", "MOV B,A",
    // 48
    "MOV C,B", "MOV C,C", "MOV C,D", "MOV C,E", "MOV C,H", "MOV C,L", "MOV C,M", "MOV C,A",
    // 50
    "MOV D,B", "MOV D,C", "MOV D,D", "MOV D,E", "MOV D,H", "MOV D,L", "MOV D,M", "MOV D,A",
    // 58
    "MOV E,B", "MOV E,C", "MOV E,D", "MOV E,E", "MOV E,H", "MOV E,L", "MOV E,M", "MOV E,A",
    // 60
    "MOV H,B", "MOV H,C", "MOV H,D", "MOV H,E", "MOV H,H", "MOV H,L", "MOV H,M", "MOV H,A",
    // 68
    "MOV L,B", "MOV L,C", "MOV L,D", "MOV L,E", "MOV L,H", "MOV L,L", "MOV L,M", "MOV L,A",
    // 70
    "MOV M,B", "MOV M,C", "MOV M,D", "MOV M,E", "MOV M,H", "MOV M,L", "HLT", "MOV M,A",
    // 78
    "MOV A,B", "MOV A,C", "MOV A,D", "MOV A,E", "MOV A,H", "MOV A,L", "MOV A,M", "MOV A,A",
    // 80
    "ADD B", "ADD C", "ADD D", "ADD E", "ADD H", "ADD L", "ADD M", "ADD A",
    // 88
    "ADC B", "ADC C", "ADC D", "ADC E", "ADC H", "ADC L", "ADC M", "ADC A",
    // 90
    "SUB B", "SUB C", "SUB D", "SUB E", "SUB H", "SUB L", "SUB M", "SUB A",
    // 98
    "SBB B", "SBB C", "SBB D", "SBB E", "SBB H", "SBB L", "SBB M", "SBB A",
    // A0
    "ANA B", "ANA C", "ANA D", "ANA E", "ANA H", "ANA L", "ANA M", "ANA A",
    // A8
    "XRA B", "XRA C", "XRA D", "XRA E", "XRA H", "XRA L", "XRA M", "XRA A",
    // B0
    "ORA B", "ORA C", "ORA D", "ORA E", "ORA H", "ORA L", "ORA M", "ORA A",
    // B8
    "CMP B", "CMP C", "CMP D", "CMP E", "CMP H", "CMP L", "CMP M", "CMP A",
    // C0
    "RNZ", "POP B", "JNZ a16", "JMP a16", "CNZ a16", "PUSH B", "ADI d8", "RST 0",
    // C8
    "RZ", "RET", "JZ a16", "*JMP a16", "CZ a16", "CALL a16", "ACI d8", "RST 1",
    // D0
    "RNC", "POP D", "JNC a16", "OUT d8", "CNC a16", "PUSH D", "SUI d8", "RST 2",
    // D8
    "RC", "*RET", "JC a16", "IN d8", "CC a16", "*CALL a16", "SBI d8", "RST 3",
    // E0
    "RPO", "POP H", "JPO a16", "XTHL", "CPO a16", "PUSH H", "ANI d8", "RST 4",
    // E8
    "RPE", "PCHL", "JPE a16", "XCHG", "CPE a16", "*CALL a16", "XRI d8", "RST 5",
    // F0
    "RP", "POP PSW", "JP a16", "DI", "CP a16", "PUSH PSW", "ORI d8", "RST 6",
    // F8
    "RM", "SPHL", "JM a16", "EI", "CM a16", "*CALL a16", "CPI d8", "RST 7",
];

fn describe(opcode: u8) -> Instruction {
    use Category::*;

    // Register/memory forms that touch (HL) cost extra.
    let m_source = opcode & 0x07 == 6;
    let m_operand = m_source || (opcode >> 3) & 0x07 == 6;

    let (category, length, cycles, cycles_taken, handler): (Category, u8, u8, u8, Handler) =
        match opcode {
            0x00 | 0x08 | 0x10 | 0x18 | 0x20 | 0x28 | 0x30 | 0x38 => {
                (Control, 1, 4, 4, Cpu8080::exec_nop)
            }

            // Data transfer.
            0x01 | 0x11 | 0x21 | 0x31 => (DataTransfer, 3, 10, 10, Cpu8080::exec_lxi),
            0x02 | 0x12 => (DataTransfer, 1, 7, 7, Cpu8080::exec_stax),
            0x0A | 0x1A => (DataTransfer, 1, 7, 7, Cpu8080::exec_ldax),
            0x22 => (DataTransfer, 3, 16, 16, Cpu8080::exec_shld),
            0x2A => (DataTransfer, 3, 16, 16, Cpu8080::exec_lhld),
            0x32 => (DataTransfer, 3, 13, 13, Cpu8080::exec_sta),
            0x3A => (DataTransfer, 3, 13, 13, Cpu8080::exec_lda),
            0x36 => (DataTransfer, 2, 10, 10, Cpu8080::exec_mvi),
            0x06 | 0x0E | 0x16 | 0x1E | 0x26 | 0x2E | 0x3E => {
                (DataTransfer, 2, 7, 7, Cpu8080::exec_mvi)
            }
            0x76 => (Control, 1, 7, 7, Cpu8080::exec_hlt),
            0x40..=0x7F if m_operand => (DataTransfer, 1, 7, 7, Cpu8080::exec_mov),
            0x40..=0x7F => (DataTransfer, 1, 5, 5, Cpu8080::exec_mov),
            0xEB => (DataTransfer, 1, 5, 5, Cpu8080::exec_xchg),

            // Arithmetic.
            0x03 | 0x13 | 0x23 | 0x33 => (Arithmetic, 1, 5, 5, Cpu8080::exec_inx),
            0x0B | 0x1B | 0x2B | 0x3B => (Arithmetic, 1, 5, 5, Cpu8080::exec_dcx),
            0x34 => (Arithmetic, 1, 10, 10, Cpu8080::exec_inr),
            0x04 | 0x0C | 0x14 | 0x1C | 0x24 | 0x2C | 0x3C => {
                (Arithmetic, 1, 5, 5, Cpu8080::exec_inr)
            }
            0x35 => (Arithmetic, 1, 10, 10, Cpu8080::exec_dcr),
            0x05 | 0x0D | 0x15 | 0x1D | 0x25 | 0x2D | 0x3D => {
                (Arithmetic, 1, 5, 5, Cpu8080::exec_dcr)
            }
            0x09 | 0x19 | 0x29 | 0x39 => (Arithmetic, 1, 10, 10, Cpu8080::exec_dad),
            0x27 => (Arithmetic, 1, 4, 4, Cpu8080::exec_daa),
            0x80..=0x9F if m_source => (Arithmetic, 1, 7, 7, Cpu8080::exec_alu_reg),
            0x80..=0x9F => (Arithmetic, 1, 4, 4, Cpu8080::exec_alu_reg),
            0xC6 | 0xCE | 0xD6 | 0xDE => (Arithmetic, 2, 7, 7, Cpu8080::exec_alu_imm),

            // Logical.
            0xA0..=0xBF if m_source => (Logical, 1, 7, 7, Cpu8080::exec_alu_reg),
            0xA0..=0xBF => (Logical, 1, 4, 4, Cpu8080::exec_alu_reg),
            0xE6 | 0xEE | 0xF6 | 0xFE => (Logical, 2, 7, 7, Cpu8080::exec_alu_imm),
            0x2F => (Logical, 1, 4, 4, Cpu8080::exec_cma),
            0x37 => (Logical, 1, 4, 4, Cpu8080::exec_stc),
            0x3F => (Logical, 1, 4, 4, Cpu8080::exec_cmc),

            // Rotate.
            0x07 | 0x0F | 0x17 | 0x1F => (Rotate, 1, 4, 4, Cpu8080::exec_rotate),

            // Branch.
            0xC3 | 0xCB => (Branch, 3, 10, 10, Cpu8080::exec_jmp),
            0xC2 | 0xCA | 0xD2 | 0xDA | 0xE2 | 0xEA | 0xF2 | 0xFA => {
                (Branch, 3, 10, 10, Cpu8080::exec_jmp_cond)
            }
            0xCD | 0xDD | 0xED | 0xFD => (Branch, 3, 17, 17, Cpu8080::exec_call),
            0xC4 | 0xCC | 0xD4 | 0xDC | 0xE4 | 0xEC | 0xF4 | 0xFC => {
                (Branch, 3, 11, 17, Cpu8080::exec_call_cond)
            }
            0xC9 | 0xD9 => (Branch, 1, 10, 10, Cpu8080::exec_ret),
            0xC0 | 0xC8 | 0xD0 | 0xD8 | 0xE0 | 0xE8 | 0xF0 | 0xF8 => {
                (Branch, 1, 5, 11, Cpu8080::exec_ret_cond)
            }
            0xC7 | 0xCF | 0xD7 | 0xDF | 0xE7 | 0xEF | 0xF7 | 0xFF => {
                (Branch, 1, 11, 11, Cpu8080::exec_rst)
            }
            0xE9 => (Branch, 1, 5, 5, Cpu8080::exec_pchl),

            // Stack.
            0xC5 | 0xD5 | 0xE5 | 0xF5 => (Stack, 1, 11, 11, Cpu8080::exec_push),
            0xC1 | 0xD1 | 0xE1 | 0xF1 => (Stack, 1, 10, 10, Cpu8080::exec_pop),
            0xE3 => (Stack, 1, 18, 18, Cpu8080::exec_xthl),
            0xF9 => (Stack, 1, 5, 5, Cpu8080::exec_sphl),

            // I/O and machine control.
            0xDB => (Io, 2, 10, 10, Cpu8080::exec_in),
            0xD3 => (Io, 2, 10, 10, Cpu8080::exec_out),
            0xFB => (Control, 1, 4, 4, Cpu8080::exec_ei),
            0xF3 => (Control, 1, 4, 4, Cpu8080::exec_di),
        };

    Instruction {
        mnemonic: MNEMONICS[opcode as usize],
        category,
        length,
        cycles,
        cycles_taken,
        handler,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lengths_follow_operand_placeholders() {
        for (opcode, instr) in OPCODES.iter().enumerate() {
            let expected = if instr.mnemonic.contains("d16") || instr.mnemonic.contains("a16") {
                3
            } else if instr.mnemonic.contains("d8") {
                2
            } else {
                1
            };
            assert_eq!(
                instr.length, expected,
                "length of {opcode:02X} {}",
                instr.mnemonic
            );
        }
    }

    #[test]
    fn undocumented_opcodes_alias_documented_ones() {
        let aliases = [
            (0x08, 0x00),
            (0x10, 0x00),
            (0x18, 0x00),
            (0x20, 0x00),
            (0x28, 0x00),
            (0x30, 0x00),
            (0x38, 0x00),
            (0xCB, 0xC3),
            (0xD9, 0xC9),
            (0xDD, 0xCD),
            (0xED, 0xCD),
            (0xFD, 0xCD),
        ];
        for (alias, documented) in aliases {
            let a = &OPCODES[alias];
            let d = &OPCODES[documented];
            assert!(a.mnemonic.starts_with('*'), "{alias:02X} not marked");
            assert_eq!(&a.mnemonic[1..], d.mnemonic);
            assert_eq!(a.length, d.length);
            assert_eq!(a.cycles, d.cycles);
            assert_eq!(a.category, d.category);
        }
    }

    #[test]
    fn only_aliases_are_starred() {
        let starred = OPCODES.iter().filter(|i| i.mnemonic.starts_with('*')).count();
        assert_eq!(starred, 12);
    }

    #[test]
    fn memory_operand_costs() {
        assert_eq!(OPCODES[0x41].cycles, 5); // MOV B,C
        assert_eq!(OPCODES[0x46].cycles, 7); // MOV B,M
        assert_eq!(OPCODES[0x70].cycles, 7); // MOV M,B
        assert_eq!(OPCODES[0x80].cycles, 4); // ADD B
        assert_eq!(OPCODES[0x86].cycles, 7); // ADD M
        assert_eq!(OPCODES[0xB0].cycles, 4); // ORA B
        assert_eq!(OPCODES[0xBE].cycles, 7); // CMP M
        assert_eq!(OPCODES[0x34].cycles, 10); // INR M
        assert_eq!(OPCODES[0x3C].cycles, 5); // INR A
    }

    #[test]
    fn conditional_costs() {
        assert_eq!((OPCODES[0xC4].cycles, OPCODES[0xC4].cycles_taken), (11, 17));
        assert_eq!((OPCODES[0xC0].cycles, OPCODES[0xC0].cycles_taken), (5, 11));
        assert_eq!((OPCODES[0xC2].cycles, OPCODES[0xC2].cycles_taken), (10, 10));
    }

    #[test]
    fn categories() {
        assert_eq!(OPCODES[0x76].category, Category::Control);
        assert_eq!(OPCODES[0xDB].category, Category::Io);
        assert_eq!(OPCODES[0xF5].category, Category::Stack);
        assert_eq!(OPCODES[0x1F].category, Category::Rotate);
        assert_eq!(OPCODES[0xA8].category, Category::Logical);
        assert_eq!(OPCODES[0x98].category, Category::Arithmetic);
        assert_eq!(OPCODES[0xFF].category, Category::Branch);
    }

    #[test]
    fn decoded_operands_are_little_endian() {
        let d = Decoded {
            opcode: 0xC3,
            operands: [0x34, 0x12],
            next_pc: 3,
        };
        assert_eq!(d.d8(), 0x34);
        assert_eq!(d.d16(), 0x1234);
    }
}
