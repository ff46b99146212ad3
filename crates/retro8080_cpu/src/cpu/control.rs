use super::flags::Flags;
use super::Cpu8080;

/// Branch predicate encoded in bits 3-5 of conditional jump/call/return.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Condition {
    NotZero,
    Zero,
    NoCarry,
    Carry,
    ParityOdd,
    ParityEven,
    Plus,
    Minus,
}

impl Condition {
    pub fn from_opcode(opcode: u8) -> Condition {
        match (opcode >> 3) & 0x07 {
            0 => Condition::NotZero,
            1 => Condition::Zero,
            2 => Condition::NoCarry,
            3 => Condition::Carry,
            4 => Condition::ParityOdd,
            5 => Condition::ParityEven,
            6 => Condition::Plus,
            _ => Condition::Minus,
        }
    }

    #[inline]
    pub fn holds(self, flags: Flags) -> bool {
        match self {
            Condition::NotZero => !flags.zero(),
            Condition::Zero => flags.zero(),
            Condition::NoCarry => !flags.carry(),
            Condition::Carry => flags.carry(),
            Condition::ParityOdd => !flags.parity(),
            Condition::ParityEven => flags.parity(),
            Condition::Plus => !flags.sign(),
            Condition::Minus => flags.sign(),
        }
    }
}

/// Target address of `RST n`.
#[inline]
pub fn rst_vector(n: u8) -> u16 {
    u16::from(n & 0x07) << 3
}

impl Cpu8080 {
    /// Push a word: high byte at SP-1, low byte at SP-2, then SP -= 2.
    pub fn push_word(&mut self, value: u16) {
        let [hi, lo] = value.to_be_bytes();
        let sp = self.regs.sp;
        self.memory.write(sp.wrapping_sub(1), hi);
        self.memory.write(sp.wrapping_sub(2), lo);
        self.regs.sp = sp.wrapping_sub(2);
    }

    /// Pop a word: low byte from SP, high byte from SP+1, then SP += 2.
    pub fn pop_word(&mut self) -> u16 {
        let sp = self.regs.sp;
        let lo = self.memory.read(sp);
        let hi = self.memory.read(sp.wrapping_add(1));
        self.regs.sp = sp.wrapping_add(2);
        u16::from_le_bytes([lo, hi])
    }

    /// Push `return_to` and transfer control to `target`.
    pub(crate) fn call(&mut self, target: u16, return_to: u16) {
        self.push_word(return_to);
        self.regs.pc = target;
    }

    pub(crate) fn ret(&mut self) {
        self.regs.pc = self.pop_word();
    }
}
