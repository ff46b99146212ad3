use crate::cpu::regs::{Reg, RegPair};
use crate::cpu::table::{Decoded, Flow};
use crate::cpu::{Cpu8080, IoPorts};

impl Cpu8080 {
    /// MOV r1,r2 (0x40-0x7F except HLT).
    pub(crate) fn exec_mov(&mut self, _io: &mut dyn IoPorts, op: &Decoded) -> Flow {
        debug_assert!((0x40..=0x7F).contains(&op.opcode) && op.opcode != 0x76);

        let value = self.read_reg(Reg::source(op.opcode));
        self.write_reg(Reg::destination(op.opcode), value);
        Flow::Next
    }

    /// MVI r,d8
    pub(crate) fn exec_mvi(&mut self, _io: &mut dyn IoPorts, op: &Decoded) -> Flow {
        self.write_reg(Reg::destination(op.opcode), op.d8());
        Flow::Next
    }

    /// LXI rp,d16
    pub(crate) fn exec_lxi(&mut self, _io: &mut dyn IoPorts, op: &Decoded) -> Flow {
        self.regs.set_pair(RegPair::from_opcode(op.opcode), op.d16());
        Flow::Next
    }

    /// STAX B / STAX D
    pub(crate) fn exec_stax(&mut self, _io: &mut dyn IoPorts, op: &Decoded) -> Flow {
        debug_assert!(matches!(op.opcode, 0x02 | 0x12));
        let addr = self.regs.pair(RegPair::from_opcode(op.opcode));
        self.memory.write(addr, self.regs.a);
        Flow::Next
    }

    /// LDAX B / LDAX D
    pub(crate) fn exec_ldax(&mut self, _io: &mut dyn IoPorts, op: &Decoded) -> Flow {
        debug_assert!(matches!(op.opcode, 0x0A | 0x1A));
        let addr = self.regs.pair(RegPair::from_opcode(op.opcode));
        self.regs.a = self.memory.read(addr);
        Flow::Next
    }

    pub(crate) fn exec_sta(&mut self, _io: &mut dyn IoPorts, op: &Decoded) -> Flow {
        self.memory.write(op.d16(), self.regs.a);
        Flow::Next
    }

    pub(crate) fn exec_lda(&mut self, _io: &mut dyn IoPorts, op: &Decoded) -> Flow {
        self.regs.a = self.memory.read(op.d16());
        Flow::Next
    }

    /// SHLD: L to addr, H to addr+1.
    pub(crate) fn exec_shld(&mut self, _io: &mut dyn IoPorts, op: &Decoded) -> Flow {
        let hl = self.regs.hl();
        self.memory.write_word(op.d16(), hl);
        Flow::Next
    }

    /// LHLD: L from addr, H from addr+1.
    pub(crate) fn exec_lhld(&mut self, _io: &mut dyn IoPorts, op: &Decoded) -> Flow {
        let value = self.memory.read_word(op.d16());
        self.regs.set_hl(value);
        Flow::Next
    }

    /// XCHG: swap DE and HL.
    pub(crate) fn exec_xchg(&mut self, _io: &mut dyn IoPorts, _op: &Decoded) -> Flow {
        std::mem::swap(&mut self.regs.d, &mut self.regs.h);
        std::mem::swap(&mut self.regs.e, &mut self.regs.l);
        Flow::Next
    }
}
