//! Just enough of CP/M to run the classic 8080 exerciser programs.
//!
//! The program is loaded into the TPA at 0x0100. Address 0x0000 (warm boot)
//! holds HLT so that a program exiting via `JMP 0` or a final `RET` stops the
//! CPU. Address 0x0005 holds RET; when PC reaches it the BDOS function in C
//! is serviced first, then the RET returns to the caller.

use retro8080_cpu::{Cpu8080, NullPorts};

use crate::config::CPM_LOAD_ADDRESS;

pub const WARM_BOOT: u16 = 0x0000;
pub const BDOS_ENTRY: u16 = 0x0005;

/// Top of the TPA; programs reading the BDOS address at 0x0006 set their
/// stack here.
const STACK_TOP: u16 = 0xF000;

const HLT: u8 = 0x76;
const RET: u8 = 0xC9;

const BDOS_CONSOLE_OUTPUT: u8 = 2;
const BDOS_PRINT_STRING: u8 = 9;

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct CpmReport {
    /// Everything written to the console through the BDOS.
    pub output: String,
    pub cycles: u64,
    pub instructions: u64,
    /// True only when the program reached warm boot. A cycle limit or a
    /// HLT elsewhere leaves this false.
    pub completed: bool,
}

pub struct CpmMachine {
    cpu: Cpu8080,
    output: String,
}

impl CpmMachine {
    pub fn new(program: &[u8]) -> Self {
        Self::with_origin(program, CPM_LOAD_ADDRESS)
    }

    pub fn with_origin(program: &[u8], origin: u16) -> Self {
        let mut cpu = Cpu8080::new();
        cpu.load_program(origin, program);

        let [lo, hi] = STACK_TOP.to_le_bytes();
        cpu.load_program(WARM_BOOT, &[HLT]);
        cpu.load_program(BDOS_ENTRY, &[RET, lo, hi]);

        cpu.regs.pc = origin;
        cpu.regs.sp = STACK_TOP;
        // A plain RET from the program lands on warm boot.
        cpu.push_word(WARM_BOOT);

        Self {
            cpu,
            output: String::new(),
        }
    }

    /// Run until the program warm boots, executes a HLT of its own, or
    /// `max_cycles` have elapsed.
    pub fn run(&mut self, max_cycles: Option<u64>) -> CpmReport {
        let mut cycles = 0u64;
        let mut instructions = 0u64;
        let mut completed = false;

        loop {
            if let Some(max) = max_cycles {
                if cycles >= max {
                    break;
                }
            }

            if self.cpu.pc() == BDOS_ENTRY {
                self.bdos_call();
            }

            let result = self.cpu.step(&mut NullPorts);
            cycles += u64::from(result.cycles);
            instructions += 1;
            if result.halted {
                // Only the HLT planted at warm boot means the program exited.
                completed = self.cpu.pc() == WARM_BOOT + 1;
                if !completed {
                    log::warn!(
                        "HLT at {:04X} before warm boot",
                        self.cpu.pc().wrapping_sub(1)
                    );
                }
                break;
            }
        }

        log::info!(
            "CP/M program {} after {} instructions ({} cycles)",
            if completed { "finished" } else { "stopped" },
            instructions,
            cycles
        );

        CpmReport {
            output: std::mem::take(&mut self.output),
            cycles,
            instructions,
            completed,
        }
    }

    pub fn cpu(&self) -> &Cpu8080 {
        &self.cpu
    }

    fn bdos_call(&mut self) {
        match self.cpu.regs.c {
            BDOS_CONSOLE_OUTPUT => self.output.push(char::from(self.cpu.regs.e)),
            BDOS_PRINT_STRING => {
                let mut addr = self.cpu.regs.de();
                // Bounded so a missing terminator cannot loop forever.
                for _ in 0..=u16::MAX {
                    let byte = self.cpu.read_memory(addr);
                    if byte == b'$' {
                        break;
                    }
                    self.output.push(char::from(byte));
                    addr = addr.wrapping_add(1);
                }
            }
            other => log::debug!("Ignoring BDOS function {}", other),
        }
    }
}
