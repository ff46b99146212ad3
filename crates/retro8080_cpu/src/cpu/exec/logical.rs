use crate::cpu::alu;
use crate::cpu::flags::Flags;
use crate::cpu::table::{Decoded, Flow};
use crate::cpu::{Cpu8080, IoPorts};

impl Cpu8080 {
    /// RLC / RRC / RAL / RAR
    pub(crate) fn exec_rotate(&mut self, _io: &mut dyn IoPorts, op: &Decoded) -> Flow {
        let rotate: fn(u8, Flags) -> (u8, Flags) = match op.opcode {
            0x07 => alu::rlc,
            0x0F => alu::rrc,
            0x17 => alu::ral,
            0x1F => alu::rar,
            other => unreachable!("not a rotate opcode: {:02X}", other),
        };
        let (a, flags) = rotate(self.regs.a, self.regs.flags);
        self.regs.a = a;
        self.regs.flags = flags;
        Flow::Next
    }

    /// CMA: complement A, flags untouched.
    pub(crate) fn exec_cma(&mut self, _io: &mut dyn IoPorts, _op: &Decoded) -> Flow {
        self.regs.a = !self.regs.a;
        Flow::Next
    }

    pub(crate) fn exec_stc(&mut self, _io: &mut dyn IoPorts, _op: &Decoded) -> Flow {
        self.regs.flags.insert(Flags::CARRY);
        Flow::Next
    }

    pub(crate) fn exec_cmc(&mut self, _io: &mut dyn IoPorts, _op: &Decoded) -> Flow {
        self.regs.flags.toggle(Flags::CARRY);
        Flow::Next
    }
}
