use bitflags::bitflags;

bitflags! {
    /// Condition flags for Intel 8080.
    ///
    /// Bit positions match the flag byte pushed by `PUSH PSW`.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct Flags: u8 {
        const SIGN = 0x80;
        const ZERO = 0x40;
        const AUX_CARRY = 0x10;
        const PARITY = 0x04;
        const CARRY = 0x01;
    }
}

/// Bit 1 of the packed flag byte always reads as one.
const PSW_FIXED_ONE: u8 = 0x02;

impl Default for Flags {
    fn default() -> Self {
        Flags::empty()
    }
}

impl Flags {
    /// Zero, sign and parity for an 8-bit result.
    #[inline]
    pub fn szp(value: u8) -> Flags {
        let mut f = Flags::empty();
        f.set(Flags::ZERO, value == 0);
        f.set(Flags::SIGN, value & 0x80 != 0);
        f.set(Flags::PARITY, value.count_ones() % 2 == 0);
        f
    }

    #[inline]
    pub fn zero(self) -> bool {
        self.contains(Flags::ZERO)
    }

    #[inline]
    pub fn sign(self) -> bool {
        self.contains(Flags::SIGN)
    }

    #[inline]
    pub fn parity(self) -> bool {
        self.contains(Flags::PARITY)
    }

    #[inline]
    pub fn carry(self) -> bool {
        self.contains(Flags::CARRY)
    }

    #[inline]
    pub fn aux_carry(self) -> bool {
        self.contains(Flags::AUX_CARRY)
    }

    /// Pack into the PSW flag byte (S Z 0 AC 0 P 1 CY).
    pub fn to_psw(self) -> u8 {
        self.bits() | PSW_FIXED_ONE
    }

    /// Unpack a PSW flag byte; the fixed bits 1, 3 and 5 are discarded.
    pub fn from_psw(value: u8) -> Flags {
        Flags::from_bits_truncate(value)
    }
}
