use anyhow::{bail, Result};

pub mod arcade;
pub mod config;
pub mod cpm;
pub mod loader;

pub use config::{Mode, RunConfig};
pub use retro8080_cpu;

use arcade::ArcadeMachine;
use cpm::CpmMachine;

pub fn run(config: &RunConfig, image: &[u8]) -> Result<()> {
    loader::check_image(image, config.origin())?;

    match config.mode {
        Mode::Arcade => run_arcade(config, image),
        Mode::Cpm => run_cpm(config, image),
    }
}

pub fn run_arcade(config: &RunConfig, rom: &[u8]) -> Result<()> {
    let mut machine = ArcadeMachine::new(config.cycles_per_frame);
    machine.load_rom(rom);
    log::info!(
        "Running {} frames at {} cycles per frame",
        config.frames,
        config.cycles_per_frame
    );

    let mut cycles = 0u64;
    for _ in 0..config.frames {
        cycles += machine.step_frame().cycles;
    }

    let cpu = machine.cpu();
    let (next, _) = retro8080_cpu::disassemble(cpu.memory(), cpu.pc());
    log::info!(
        "Stopped after {} frames ({} cycles), next: {}",
        machine.frame_count(),
        cycles,
        next
    );
    println!("{}", cpu.registers());
    Ok(())
}

pub fn run_cpm(config: &RunConfig, program: &[u8]) -> Result<()> {
    let mut machine = CpmMachine::with_origin(program, config.origin());
    log::info!("Running CP/M program at {:04X}", config.origin());

    let report = machine.run(config.max_cycles);
    print!("{}", report.output);
    println!();
    println!("{}", machine.cpu().registers());

    if !report.completed {
        let cpu = machine.cpu();
        if cpu.is_halted() {
            bail!(
                "program did not finish: HLT at {:04X} before warm boot",
                cpu.pc().wrapping_sub(1)
            );
        }
        bail!(
            "program did not finish within {} cycles",
            config.max_cycles.unwrap_or_default()
        );
    }
    Ok(())
}
