use std::fmt;

use super::flags::Flags;

/// Register file for the Intel 8080.
///
/// B/C, D/E and H/L pair up as 16-bit operands; A and the packed flag byte
/// form the PSW used by `PUSH PSW`/`POP PSW`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Registers {
    pub a: u8,
    pub b: u8,
    pub c: u8,
    pub d: u8,
    pub e: u8,
    pub h: u8,
    pub l: u8,
    pub sp: u16,
    pub pc: u16,
    pub flags: Flags,
}

impl Registers {
    #[inline]
    pub fn bc(&self) -> u16 {
        u16::from_be_bytes([self.b, self.c])
    }

    #[inline]
    pub fn set_bc(&mut self, value: u16) {
        let [b, c] = value.to_be_bytes();
        self.b = b;
        self.c = c;
    }

    #[inline]
    pub fn de(&self) -> u16 {
        u16::from_be_bytes([self.d, self.e])
    }

    #[inline]
    pub fn set_de(&mut self, value: u16) {
        let [d, e] = value.to_be_bytes();
        self.d = d;
        self.e = e;
    }

    #[inline]
    pub fn hl(&self) -> u16 {
        u16::from_be_bytes([self.h, self.l])
    }

    #[inline]
    pub fn set_hl(&mut self, value: u16) {
        let [h, l] = value.to_be_bytes();
        self.h = h;
        self.l = l;
    }

    #[inline]
    pub fn psw(&self) -> u16 {
        u16::from_be_bytes([self.a, self.flags.to_psw()])
    }

    #[inline]
    pub fn set_psw(&mut self, value: u16) {
        let [a, f] = value.to_be_bytes();
        self.a = a;
        self.flags = Flags::from_psw(f);
    }

    pub fn pair(&self, pair: RegPair) -> u16 {
        match pair {
            RegPair::BC => self.bc(),
            RegPair::DE => self.de(),
            RegPair::HL => self.hl(),
            RegPair::SP => self.sp,
        }
    }

    pub fn set_pair(&mut self, pair: RegPair, value: u16) {
        match pair {
            RegPair::BC => self.set_bc(value),
            RegPair::DE => self.set_de(value),
            RegPair::HL => self.set_hl(value),
            RegPair::SP => self.sp = value,
        }
    }
}

impl fmt::Display for Registers {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let flag = |set: bool, c: char| if set { c } else { '-' };
        write!(
            f,
            "A={:02X} BC={:04X} DE={:04X} HL={:04X} SP={:04X} PC={:04X} F={}{}{}{}{}",
            self.a,
            self.bc(),
            self.de(),
            self.hl(),
            self.sp,
            self.pc,
            flag(self.flags.sign(), 'S'),
            flag(self.flags.zero(), 'Z'),
            flag(self.flags.aux_carry(), 'A'),
            flag(self.flags.parity(), 'P'),
            flag(self.flags.carry(), 'C'),
        )
    }
}

/// 8-bit operand selector as encoded in opcode bits.
///
/// `M` is the memory cell addressed by HL.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Reg {
    B,
    C,
    D,
    E,
    H,
    L,
    M,
    A,
}

impl Reg {
    /// Decode the low three bits of `bits` (0=B ... 6=M, 7=A).
    pub fn from_bits(bits: u8) -> Reg {
        match bits & 0x07 {
            0 => Reg::B,
            1 => Reg::C,
            2 => Reg::D,
            3 => Reg::E,
            4 => Reg::H,
            5 => Reg::L,
            6 => Reg::M,
            _ => Reg::A,
        }
    }

    /// Source operand of a MOV/ALU opcode (bits 0-2).
    #[inline]
    pub fn source(opcode: u8) -> Reg {
        Reg::from_bits(opcode)
    }

    /// Destination operand of a MOV/MVI/INR/DCR opcode (bits 3-5).
    #[inline]
    pub fn destination(opcode: u8) -> Reg {
        Reg::from_bits(opcode >> 3)
    }
}

/// 16-bit register pair selected by opcode bits 4-5.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RegPair {
    BC,
    DE,
    HL,
    SP,
}

impl RegPair {
    pub fn from_opcode(opcode: u8) -> RegPair {
        match (opcode >> 4) & 0x03 {
            0 => RegPair::BC,
            1 => RegPair::DE,
            2 => RegPair::HL,
            _ => RegPair::SP,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pairs_are_high_byte_first() {
        let mut regs = Registers::default();
        regs.set_bc(0x1234);
        assert_eq!((regs.b, regs.c), (0x12, 0x34));
        regs.set_pair(RegPair::DE, 0xABCD);
        assert_eq!((regs.d, regs.e), (0xAB, 0xCD));
        regs.set_pair(RegPair::HL, 0x0102);
        assert_eq!(regs.pair(RegPair::HL), 0x0102);
        regs.set_pair(RegPair::SP, 0xFFFE);
        assert_eq!(regs.sp, 0xFFFE);
    }

    #[test]
    fn psw_round_trip_keeps_real_flags_only() {
        let mut regs = Registers::default();
        regs.set_psw(0x42FF);
        assert_eq!(regs.a, 0x42);
        assert_eq!(regs.flags, Flags::all());
        assert_eq!(regs.psw(), 0x42D7);
    }

    #[test]
    fn operand_decoding() {
        assert_eq!(Reg::destination(0x78), Reg::A); // MOV A,B
        assert_eq!(Reg::source(0x78), Reg::B);
        assert_eq!(Reg::source(0x86), Reg::M); // ADD M
        assert_eq!(RegPair::from_opcode(0x31), RegPair::SP); // LXI SP
        assert_eq!(RegPair::from_opcode(0xE5), RegPair::HL); // PUSH H
    }

    #[test]
    fn display_is_a_single_line() {
        let mut regs = Registers::default();
        regs.a = 0x0F;
        regs.flags = Flags::ZERO | Flags::CARRY;
        assert_eq!(
            regs.to_string(),
            "A=0F BC=0000 DE=0000 HL=0000 SP=0000 PC=0000 F=-Z--C"
        );
    }
}
