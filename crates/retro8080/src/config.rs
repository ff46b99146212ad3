use std::str::FromStr;

use anyhow::bail;
use typed_builder::TypedBuilder;

/// 8080 clock and frame timing for the Space Invaders board.
pub const CPU_CLOCK_HZ: u32 = 2_000_000;
pub const FRAME_RATE_HZ: u32 = 60;
pub const CYCLES_PER_FRAME: u32 = CPU_CLOCK_HZ / FRAME_RATE_HZ;

/// CP/M loads transient programs here.
pub const CPM_LOAD_ADDRESS: u16 = 0x0100;

/// What kind of image is being run.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Mode {
    /// Arcade ROM at 0x0000, driven frame by frame with RST 1/RST 2.
    Arcade,
    /// CP/M `.COM` program at 0x0100 with BDOS console output.
    Cpm,
}

impl Mode {
    pub fn default_load_address(self) -> u16 {
        match self {
            Mode::Arcade => 0x0000,
            Mode::Cpm => CPM_LOAD_ADDRESS,
        }
    }
}

impl FromStr for Mode {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "arcade" | "invaders" | "space_invaders" | "space-invaders" => Ok(Mode::Arcade),
            "cpm" | "CPM" | "com" => Ok(Mode::Cpm),
            other => bail!("unknown mode '{}'. Supported: arcade, cpm", other),
        }
    }
}

#[derive(Clone, Debug, TypedBuilder)]
pub struct RunConfig {
    pub mode: Mode,
    /// Video frames to run in arcade mode.
    #[builder(default = 60)]
    pub frames: u32,
    #[builder(default = CYCLES_PER_FRAME)]
    pub cycles_per_frame: u32,
    /// Overrides the mode's usual load address.
    #[builder(default, setter(strip_option))]
    pub load_address: Option<u16>,
    /// Gives up on a CP/M program after this many cycles.
    #[builder(default, setter(strip_option))]
    pub max_cycles: Option<u64>,
}

impl RunConfig {
    pub fn origin(&self) -> u16 {
        self.load_address
            .unwrap_or_else(|| self.mode.default_load_address())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn frame_budget() {
        assert_eq!(CYCLES_PER_FRAME, 33_333);
    }

    #[test]
    fn builder_defaults() {
        let config = RunConfig::builder().mode(Mode::Arcade).build();
        assert_eq!(config.frames, 60);
        assert_eq!(config.cycles_per_frame, CYCLES_PER_FRAME);
        assert_eq!(config.origin(), 0x0000);
        assert_eq!(config.max_cycles, None);

        let config = RunConfig::builder().mode(Mode::Cpm).build();
        assert_eq!(config.origin(), CPM_LOAD_ADDRESS);
    }

    #[test]
    fn load_address_override() {
        let config = RunConfig::builder()
            .mode(Mode::Cpm)
            .load_address(0x8000)
            .build();
        assert_eq!(config.origin(), 0x8000);
    }

    #[test]
    fn parse_modes() {
        assert_eq!("arcade".parse::<Mode>().unwrap(), Mode::Arcade);
        assert_eq!("invaders".parse::<Mode>().unwrap(), Mode::Arcade);
        assert_eq!("cpm".parse::<Mode>().unwrap(), Mode::Cpm);
        assert!("gb".parse::<Mode>().is_err());
    }
}
