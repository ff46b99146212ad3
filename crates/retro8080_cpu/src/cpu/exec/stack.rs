use crate::cpu::regs::RegPair;
use crate::cpu::table::{Decoded, Flow};
use crate::cpu::{Cpu8080, IoPorts};

impl Cpu8080 {
    /// PUSH B/D/H/PSW
    pub(crate) fn exec_push(&mut self, _io: &mut dyn IoPorts, op: &Decoded) -> Flow {
        debug_assert!(matches!(op.opcode, 0xC5 | 0xD5 | 0xE5 | 0xF5));

        let value = match op.opcode {
            0xF5 => self.regs.psw(),
            _ => self.regs.pair(RegPair::from_opcode(op.opcode)),
        };
        self.push_word(value);
        Flow::Next
    }

    /// POP B/D/H/PSW
    pub(crate) fn exec_pop(&mut self, _io: &mut dyn IoPorts, op: &Decoded) -> Flow {
        debug_assert!(matches!(op.opcode, 0xC1 | 0xD1 | 0xE1 | 0xF1));

        let value = self.pop_word();
        match op.opcode {
            0xF1 => self.regs.set_psw(value),
            _ => self.regs.set_pair(RegPair::from_opcode(op.opcode), value),
        }
        Flow::Next
    }

    /// XTHL: exchange HL with the word at the top of the stack.
    pub(crate) fn exec_xthl(&mut self, _io: &mut dyn IoPorts, _op: &Decoded) -> Flow {
        let sp = self.regs.sp;
        let top = self.memory.read_word(sp);
        self.memory.write_word(sp, self.regs.hl());
        self.regs.set_hl(top);
        Flow::Next
    }

    /// SPHL: SP = HL.
    pub(crate) fn exec_sphl(&mut self, _io: &mut dyn IoPorts, _op: &Decoded) -> Flow {
        self.regs.sp = self.regs.hl();
        Flow::Next
    }
}
