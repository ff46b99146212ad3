pub mod alu;
pub mod control;
mod exec;
pub mod flags;
pub mod regs;
pub mod table;


use crate::disasm::disassemble;
use crate::memory::Memory;

use self::control::rst_vector;
use self::flags::Flags;
use self::regs::{Reg, RegPair, Registers};
use self::table::{Decoded, Flow, OPCODES};

/// Port interface for the IN and OUT instructions.
///
/// The CPU knows nothing about the hardware behind a port; the machine
/// (shift register, input latches, sound triggers) implements this trait.
pub trait IoPorts {
    fn port_in(&mut self, port: u8) -> u8;
    fn port_out(&mut self, port: u8, value: u8);
}

/// Ports with nothing attached: reads return 0, writes are dropped.
#[derive(Clone, Copy, Debug, Default)]
pub struct NullPorts;

impl IoPorts for NullPorts {
    fn port_in(&mut self, _port: u8) -> u8 {
        0
    }

    fn port_out(&mut self, _port: u8, _value: u8) {}
}

/// Outcome of a single `step`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct StepResult {
    /// Cycles consumed; zero when the CPU was already halted.
    pub cycles: u32,
    pub halted: bool,
}

/// How long `run` keeps stepping.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RunLimit {
    /// Stop once at least this many cycles have elapsed (or on HLT).
    Cycles(u64),
    /// Stop only on HLT.
    UntilHalt,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct RunSummary {
    pub cycles: u64,
    pub instructions: u64,
    pub halted: bool,
}

/// Intel 8080 CPU together with the 64 KiB memory it owns.
///
/// Lifecycle is construct, `load_program`, then `step`/`run` with interrupts
/// injected between budgets by the caller.
#[derive(Clone, Debug, Default)]
pub struct Cpu8080 {
    pub regs: Registers,
    memory: Memory,
    interrupts_enabled: bool,
    halted: bool,
}

impl Cpu8080 {
    /// Create a new CPU instance in reset state with zeroed memory.
    pub fn new() -> Self {
        Self::default()
    }

    /// Reset registers and latches to their power-on values. Memory is kept.
    pub fn reset(&mut self) {
        self.regs = Registers::default();
        self.interrupts_enabled = false;
        self.halted = false;
    }

    /// Place a program image at `addr`. Registers are left untouched, so the
    /// caller sets PC (and usually SP) before stepping.
    pub fn load_program(&mut self, addr: u16, image: &[u8]) {
        let written = self.memory.load(addr, image);
        log::debug!("Loaded {} bytes at {:04X}", written, addr);
    }

    pub fn memory(&self) -> &Memory {
        &self.memory
    }

    pub fn memory_mut(&mut self) -> &mut Memory {
        &mut self.memory
    }

    #[inline]
    pub fn read_memory(&self, addr: u16) -> u8 {
        self.memory.read(addr)
    }

    #[inline]
    pub fn pc(&self) -> u16 {
        self.regs.pc
    }

    #[inline]
    pub fn sp(&self) -> u16 {
        self.regs.sp
    }

    #[inline]
    pub fn flags(&self) -> Flags {
        self.regs.flags
    }

    pub fn registers(&self) -> Registers {
        self.regs
    }

    pub fn interrupts_enabled(&self) -> bool {
        self.interrupts_enabled
    }

    pub fn is_halted(&self) -> bool {
        self.halted
    }

    /// Read an 8-bit operand; `Reg::M` reads memory at HL.
    pub fn read_reg(&self, reg: Reg) -> u8 {
        match reg {
            Reg::B => self.regs.b,
            Reg::C => self.regs.c,
            Reg::D => self.regs.d,
            Reg::E => self.regs.e,
            Reg::H => self.regs.h,
            Reg::L => self.regs.l,
            Reg::M => self.memory.read(self.regs.hl()),
            Reg::A => self.regs.a,
        }
    }

    /// Write an 8-bit operand; `Reg::M` writes memory at HL.
    pub fn write_reg(&mut self, reg: Reg, value: u8) {
        match reg {
            Reg::B => self.regs.b = value,
            Reg::C => self.regs.c = value,
            Reg::D => self.regs.d = value,
            Reg::E => self.regs.e = value,
            Reg::H => self.regs.h = value,
            Reg::L => self.regs.l = value,
            Reg::M => self.memory.write(self.regs.hl(), value),
            Reg::A => self.regs.a = value,
        }
    }

    pub fn pair(&self, pair: RegPair) -> u16 {
        self.regs.pair(pair)
    }

    /// Execute a single instruction.
    ///
    /// A halted CPU stays put and reports zero cycles until an interrupt
    /// (or `reset`) releases it.
    pub fn step<P: IoPorts>(&mut self, ports: &mut P) -> StepResult {
        if self.halted {
            return StepResult {
                cycles: 0,
                halted: true,
            };
        }

        let pc = self.regs.pc;
        let opcode = self.memory.read(pc);
        let instr = &OPCODES[opcode as usize];
        let decoded = Decoded {
            opcode,
            operands: [
                self.memory.read(pc.wrapping_add(1)),
                self.memory.read(pc.wrapping_add(2)),
            ],
            next_pc: pc.wrapping_add(instr.length as u16),
        };

        if log::log_enabled!(log::Level::Trace) {
            let (text, _) = disassemble(&self.memory, pc);
            log::trace!("{:04X}  {:<14} {}", pc, text, self.regs);
        }

        let cycles = match (instr.handler)(self, ports, &decoded) {
            Flow::Next => {
                self.regs.pc = decoded.next_pc;
                instr.cycles
            }
            Flow::Jump => instr.cycles_taken,
            Flow::Halt => {
                self.regs.pc = decoded.next_pc;
                self.halted = true;
                log::debug!("HLT at {:04X}", pc);
                instr.cycles
            }
        };

        StepResult {
            cycles: cycles as u32,
            halted: self.halted,
        }
    }

    /// Step repeatedly until the limit is reached or the CPU halts.
    pub fn run<P: IoPorts>(&mut self, ports: &mut P, limit: RunLimit) -> RunSummary {
        let mut summary = RunSummary::default();

        loop {
            if let RunLimit::Cycles(budget) = limit {
                if summary.cycles >= budget {
                    break;
                }
            }

            let result = self.step(ports);
            if result.halted {
                if result.cycles > 0 {
                    summary.instructions += 1;
                    summary.cycles += result.cycles as u64;
                }
                summary.halted = true;
                break;
            }
            summary.instructions += 1;
            summary.cycles += result.cycles as u64;
        }

        summary
    }

    /// Deliver a maskable interrupt.
    ///
    /// `vector` is the RST number 0..=7, not the handler address: RST 1
    /// jumps to 0x0008. When interrupts are enabled this behaves like
    /// `RST vector` executed between instructions: the current PC is pushed,
    /// PC jumps to `8 * vector`, the enable latch is cleared and a halted CPU
    /// resumes. Otherwise nothing changes. Returns whether the interrupt was
    /// taken.
    ///
    /// Space Invaders raises RST 1 mid-frame and RST 2 at vertical blank.
    pub fn inject_interrupt(&mut self, vector: u8) -> bool {
        debug_assert!(vector < 8, "RST number out of range: {}", vector);

        if !self.interrupts_enabled {
            log::trace!("Interrupt RST {} masked", vector & 0x07);
            return false;
        }

        self.interrupts_enabled = false;
        self.halted = false;
        let return_to = self.regs.pc;
        self.call(rst_vector(vector), return_to);
        log::trace!("Interrupt RST {} taken from {:04X}", vector & 0x07, return_to);
        true
    }

    pub(crate) fn set_interrupts_enabled(&mut self, enabled: bool) {
        self.interrupts_enabled = enabled;
    }
}
