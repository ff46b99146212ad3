use crate::cpu::table::{Decoded, Flow};
use crate::cpu::{Cpu8080, IoPorts};

impl Cpu8080 {
    /// NOP and its seven undocumented aliases.
    pub(crate) fn exec_nop(&mut self, _io: &mut dyn IoPorts, _op: &Decoded) -> Flow {
        Flow::Next
    }

    pub(crate) fn exec_hlt(&mut self, _io: &mut dyn IoPorts, _op: &Decoded) -> Flow {
        Flow::Halt
    }

    pub(crate) fn exec_ei(&mut self, _io: &mut dyn IoPorts, _op: &Decoded) -> Flow {
        self.set_interrupts_enabled(true);
        Flow::Next
    }

    pub(crate) fn exec_di(&mut self, _io: &mut dyn IoPorts, _op: &Decoded) -> Flow {
        self.set_interrupts_enabled(false);
        Flow::Next
    }

    /// IN d8: A = port_in(d8).
    pub(crate) fn exec_in(&mut self, io: &mut dyn IoPorts, op: &Decoded) -> Flow {
        self.regs.a = io.port_in(op.d8());
        Flow::Next
    }

    /// OUT d8: port_out(d8, A).
    pub(crate) fn exec_out(&mut self, io: &mut dyn IoPorts, op: &Decoded) -> Flow {
        io.port_out(op.d8(), self.regs.a);
        Flow::Next
    }
}
