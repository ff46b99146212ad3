use retro8080_cpu::{Cpu8080, IoPorts, RunLimit};

/// Start of video RAM on the Space Invaders board.
///
/// The frame buffer lives at 0x2400-0x3FFF (224x256 one-bit pixels).
pub const VRAM_START: u16 = 0x2400;
/// Last byte of video RAM.
pub const VRAM_END: u16 = 0x3FFF;

/// Interrupts raised by the video hardware each frame.
const MID_SCREEN_RST: u8 = 1;
const VBLANK_RST: u8 = 2;

/// A bank of port latches.
///
/// `IN` returns whatever the host last put on the port with `set_input`;
/// `OUT` stores the value so the host can inspect it later. Sound and the
/// shift register are not modelled.
#[derive(Clone, Debug)]
pub struct LatchPorts {
    inputs: [u8; 256],
    outputs: [u8; 256],
}

impl Default for LatchPorts {
    fn default() -> Self {
        Self {
            inputs: [0; 256],
            outputs: [0; 256],
        }
    }
}

impl LatchPorts {
    pub fn set_input(&mut self, port: u8, value: u8) {
        self.inputs[port as usize] = value;
    }

    pub fn input(&self, port: u8) -> u8 {
        self.inputs[port as usize]
    }

    /// Last value written to `port`, or 0 if it was never written.
    pub fn output(&self, port: u8) -> u8 {
        self.outputs[port as usize]
    }
}

impl IoPorts for LatchPorts {
    fn port_in(&mut self, port: u8) -> u8 {
        self.inputs[port as usize]
    }

    fn port_out(&mut self, port: u8, value: u8) {
        log::debug!("OUT {:02X} <- {:02X}", port, value);
        self.outputs[port as usize] = value;
    }
}

/// Cycles executed and interrupts accepted during one frame.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct FrameReport {
    pub cycles: u64,
    pub mid_screen_taken: bool,
    pub vblank_taken: bool,
}

/// The CPU plus port latches, driven one video frame at a time.
pub struct ArcadeMachine {
    cpu: Cpu8080,
    ports: LatchPorts,
    cycles_per_frame: u32,
    frames: u64,
}

impl ArcadeMachine {
    pub fn new(cycles_per_frame: u32) -> Self {
        Self {
            cpu: Cpu8080::new(),
            ports: LatchPorts::default(),
            cycles_per_frame,
            frames: 0,
        }
    }

    /// Load a ROM image at 0x0000, where the board starts executing.
    pub fn load_rom(&mut self, rom: &[u8]) {
        self.cpu.load_program(0x0000, rom);
        self.cpu.regs.pc = 0x0000;
    }

    /// Run one video frame.
    ///
    /// Half a frame of cycles is executed, RST 1 is raised, the second half
    /// runs and RST 2 is raised. A halted CPU ends its half early and waits
    /// for the next interrupt.
    pub fn step_frame(&mut self) -> FrameReport {
        let half_frame = u64::from(self.cycles_per_frame / 2);

        let first = self.cpu.run(&mut self.ports, RunLimit::Cycles(half_frame));
        let mid_screen_taken = self.cpu.inject_interrupt(MID_SCREEN_RST);

        let remaining = u64::from(self.cycles_per_frame).saturating_sub(first.cycles);
        let second = self.cpu.run(&mut self.ports, RunLimit::Cycles(remaining));
        let vblank_taken = self.cpu.inject_interrupt(VBLANK_RST);

        self.frames += 1;
        FrameReport {
            cycles: first.cycles + second.cycles,
            mid_screen_taken,
            vblank_taken,
        }
    }

    pub fn frame_count(&self) -> u64 {
        self.frames
    }

    pub fn cpu(&self) -> &Cpu8080 {
        &self.cpu
    }

    pub fn cpu_mut(&mut self) -> &mut Cpu8080 {
        &mut self.cpu
    }

    pub fn ports(&self) -> &LatchPorts {
        &self.ports
    }

    pub fn ports_mut(&mut self) -> &mut LatchPorts {
        &mut self.ports
    }

    /// The raw frame buffer window.
    pub fn video_ram(&self) -> &[u8] {
        self.cpu.memory().range(VRAM_START..=VRAM_END)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::CYCLES_PER_FRAME;

    #[test]
    fn latches_hold_values() {
        let mut ports = LatchPorts::default();
        ports.set_input(1, 0x08);
        assert_eq!(ports.port_in(1), 0x08);
        assert_eq!(ports.input(1), 0x08);
        ports.port_out(3, 0x22);
        assert_eq!(ports.output(3), 0x22);
        assert_eq!(ports.output(5), 0x00);
    }

    #[test]
    fn masked_interrupts_are_not_taken() {
        let mut machine = ArcadeMachine::new(CYCLES_PER_FRAME);
        machine.load_rom(&[0xC3, 0x00, 0x00]); // JMP 0000h
        let report = machine.step_frame();
        assert!(!report.mid_screen_taken);
        assert!(!report.vblank_taken);
        assert!(report.cycles >= u64::from(CYCLES_PER_FRAME));
        assert_eq!(machine.frame_count(), 1);
    }

    #[test]
    fn video_ram_window() {
        let mut machine = ArcadeMachine::new(CYCLES_PER_FRAME);
        machine.cpu_mut().memory_mut().write(VRAM_START, 0xAA);
        machine.cpu_mut().memory_mut().write(VRAM_END, 0x55);
        machine.cpu_mut().memory_mut().write(VRAM_END + 1, 0xFF);
        let vram = machine.video_ram();
        assert_eq!(vram.len(), 0x1C00);
        assert_eq!(vram[0], 0xAA);
        assert_eq!(vram[vram.len() - 1], 0x55);
    }
}
