pub mod cpu;
pub mod disasm;
pub mod memory;

pub use cpu::alu;
pub use cpu::flags::Flags;
pub use cpu::regs::{Reg, RegPair, Registers};
pub use cpu::table::{Category, Instruction, OPCODES};
pub use cpu::{Cpu8080, IoPorts, NullPorts, RunLimit, RunSummary, StepResult};
pub use disasm::disassemble;
pub use memory::{Memory, MEMORY_SIZE};
