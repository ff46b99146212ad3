use crate::cpu::alu::{self, AluOp};
use crate::cpu::regs::{Reg, RegPair};
use crate::cpu::table::{Decoded, Flow};
use crate::cpu::{Cpu8080, IoPorts};

impl Cpu8080 {
    fn accumulate(&mut self, op: AluOp, operand: u8) {
        let (a, flags) = op.apply(self.regs.a, operand, self.regs.flags);
        self.regs.a = a;
        self.regs.flags = flags;
    }

    /// ADD/ADC/SUB/SBB/ANA/XRA/ORA/CMP with a register or M (0x80-0xBF).
    pub(crate) fn exec_alu_reg(&mut self, _io: &mut dyn IoPorts, op: &Decoded) -> Flow {
        debug_assert!((0x80..=0xBF).contains(&op.opcode));
        let operand = self.read_reg(Reg::source(op.opcode));
        self.accumulate(AluOp::from_opcode(op.opcode), operand);
        Flow::Next
    }

    /// ADI/ACI/SUI/SBI/ANI/XRI/ORI/CPI d8
    pub(crate) fn exec_alu_imm(&mut self, _io: &mut dyn IoPorts, op: &Decoded) -> Flow {
        debug_assert!(op.opcode & 0xC7 == 0xC6);
        self.accumulate(AluOp::from_opcode(op.opcode), op.d8());
        Flow::Next
    }

    pub(crate) fn exec_inr(&mut self, _io: &mut dyn IoPorts, op: &Decoded) -> Flow {
        let reg = Reg::destination(op.opcode);
        let (value, flags) = alu::inr(self.read_reg(reg), self.regs.flags);
        self.write_reg(reg, value);
        self.regs.flags = flags;
        Flow::Next
    }

    pub(crate) fn exec_dcr(&mut self, _io: &mut dyn IoPorts, op: &Decoded) -> Flow {
        let reg = Reg::destination(op.opcode);
        let (value, flags) = alu::dcr(self.read_reg(reg), self.regs.flags);
        self.write_reg(reg, value);
        self.regs.flags = flags;
        Flow::Next
    }

    /// INX rp. No flags are affected.
    pub(crate) fn exec_inx(&mut self, _io: &mut dyn IoPorts, op: &Decoded) -> Flow {
        let pair = RegPair::from_opcode(op.opcode);
        let value = self.regs.pair(pair).wrapping_add(1);
        self.regs.set_pair(pair, value);
        Flow::Next
    }

    /// DCX rp. No flags are affected.
    pub(crate) fn exec_dcx(&mut self, _io: &mut dyn IoPorts, op: &Decoded) -> Flow {
        let pair = RegPair::from_opcode(op.opcode);
        let value = self.regs.pair(pair).wrapping_sub(1);
        self.regs.set_pair(pair, value);
        Flow::Next
    }

    pub(crate) fn exec_dad(&mut self, _io: &mut dyn IoPorts, op: &Decoded) -> Flow {
        let operand = self.regs.pair(RegPair::from_opcode(op.opcode));
        let (hl, flags) = alu::dad(self.regs.hl(), operand, self.regs.flags);
        self.regs.set_hl(hl);
        self.regs.flags = flags;
        Flow::Next
    }

    pub(crate) fn exec_daa(&mut self, _io: &mut dyn IoPorts, _op: &Decoded) -> Flow {
        let (a, flags) = alu::daa(self.regs.a, self.regs.flags);
        self.regs.a = a;
        self.regs.flags = flags;
        Flow::Next
    }
}
