use crate::cpu::control::{rst_vector, Condition};
use crate::cpu::table::{Decoded, Flow};
use crate::cpu::{Cpu8080, IoPorts};

impl Cpu8080 {
    /// JMP a16 (and the undocumented 0xCB alias).
    pub(crate) fn exec_jmp(&mut self, _io: &mut dyn IoPorts, op: &Decoded) -> Flow {
        self.regs.pc = op.d16();
        Flow::Jump
    }

    /// Jcc a16
    pub(crate) fn exec_jmp_cond(&mut self, _io: &mut dyn IoPorts, op: &Decoded) -> Flow {
        if Condition::from_opcode(op.opcode).holds(self.regs.flags) {
            self.regs.pc = op.d16();
            Flow::Jump
        } else {
            Flow::Next
        }
    }

    /// CALL a16 (and the 0xDD/0xED/0xFD aliases).
    pub(crate) fn exec_call(&mut self, _io: &mut dyn IoPorts, op: &Decoded) -> Flow {
        self.call(op.d16(), op.next_pc);
        Flow::Jump
    }

    /// Ccc a16
    pub(crate) fn exec_call_cond(&mut self, _io: &mut dyn IoPorts, op: &Decoded) -> Flow {
        if Condition::from_opcode(op.opcode).holds(self.regs.flags) {
            self.call(op.d16(), op.next_pc);
            Flow::Jump
        } else {
            Flow::Next
        }
    }

    /// RET (and the undocumented 0xD9 alias).
    pub(crate) fn exec_ret(&mut self, _io: &mut dyn IoPorts, _op: &Decoded) -> Flow {
        self.ret();
        Flow::Jump
    }

    /// Rcc
    pub(crate) fn exec_ret_cond(&mut self, _io: &mut dyn IoPorts, op: &Decoded) -> Flow {
        if Condition::from_opcode(op.opcode).holds(self.regs.flags) {
            self.ret();
            Flow::Jump
        } else {
            Flow::Next
        }
    }

    /// RST n: call 8*n.
    pub(crate) fn exec_rst(&mut self, _io: &mut dyn IoPorts, op: &Decoded) -> Flow {
        debug_assert!(op.opcode & 0xC7 == 0xC7);
        self.call(rst_vector(op.opcode >> 3), op.next_pc);
        Flow::Jump
    }

    /// PCHL: PC = HL.
    pub(crate) fn exec_pchl(&mut self, _io: &mut dyn IoPorts, _op: &Decoded) -> Flow {
        self.regs.pc = self.regs.hl();
        Flow::Jump
    }
}
