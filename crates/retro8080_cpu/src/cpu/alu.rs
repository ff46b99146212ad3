//! Arithmetic and logic with the 8080 flag rules.
//!
//! Every function is pure: it takes operands (and the incoming flags where
//! an instruction preserves or consumes some of them) and returns the result
//! together with the new flag set. Instruction handlers store both.

use super::flags::Flags;

/// The eight accumulator operations encoded in bits 3-5 of the
/// `0x80..=0xBF` register forms and the `0xC6..=0xFE` immediate forms.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AluOp {
    Add,
    Adc,
    Sub,
    Sbb,
    Ana,
    Xra,
    Ora,
    Cmp,
}

impl AluOp {
    pub fn from_opcode(opcode: u8) -> AluOp {
        match (opcode >> 3) & 0x07 {
            0 => AluOp::Add,
            1 => AluOp::Adc,
            2 => AluOp::Sub,
            3 => AluOp::Sbb,
            4 => AluOp::Ana,
            5 => AluOp::Xra,
            6 => AluOp::Ora,
            _ => AluOp::Cmp,
        }
    }

    /// Apply to the accumulator. Returns the new accumulator (unchanged for
    /// `Cmp`) and the new flags.
    pub fn apply(self, a: u8, operand: u8, flags: Flags) -> (u8, Flags) {
        match self {
            AluOp::Add => add(a, operand, false),
            AluOp::Adc => add(a, operand, flags.carry()),
            AluOp::Sub => sub(a, operand, false),
            AluOp::Sbb => sub(a, operand, flags.carry()),
            AluOp::Ana => and(a, operand),
            AluOp::Xra => xor(a, operand),
            AluOp::Ora => or(a, operand),
            AluOp::Cmp => {
                let (_, f) = sub(a, operand, false);
                (a, f)
            }
        }
    }
}

/// 8-bit addition with optional carry in.
pub fn add(a: u8, value: u8, carry_in: bool) -> (u8, Flags) {
    let carry = carry_in as u16;
    let full = a as u16 + value as u16 + carry;
    let result = full as u8;

    let mut f = Flags::szp(result);
    f.set(Flags::CARRY, full > 0xFF);
    f.set(
        Flags::AUX_CARRY,
        (a & 0x0F) as u16 + (value & 0x0F) as u16 + carry > 0x0F,
    );
    (result, f)
}

/// 8-bit subtraction with optional borrow in. Carry and auxiliary carry
/// report a borrow out of bit 7 and into bit 3 respectively.
pub fn sub(a: u8, value: u8, borrow_in: bool) -> (u8, Flags) {
    let borrow = borrow_in as u16;
    let result = a.wrapping_sub(value).wrapping_sub(borrow as u8);

    let mut f = Flags::szp(result);
    f.set(Flags::CARRY, (a as u16) < value as u16 + borrow);
    f.set(
        Flags::AUX_CARRY,
        ((a & 0x0F) as u16) < (value & 0x0F) as u16 + borrow,
    );
    (result, f)
}

pub fn and(a: u8, value: u8) -> (u8, Flags) {
    let result = a & value;
    let mut f = Flags::szp(result);
    // The 8080 ANA/ANI latch bit 3 of the OR of both operands into AC.
    f.set(Flags::AUX_CARRY, (a | value) & 0x08 != 0);
    (result, f)
}

pub fn xor(a: u8, value: u8) -> (u8, Flags) {
    let result = a ^ value;
    (result, Flags::szp(result))
}

pub fn or(a: u8, value: u8) -> (u8, Flags) {
    let result = a | value;
    (result, Flags::szp(result))
}

/// INR: carry is preserved from `flags`.
pub fn inr(value: u8, flags: Flags) -> (u8, Flags) {
    let result = value.wrapping_add(1);
    let mut f = Flags::szp(result);
    f.set(Flags::AUX_CARRY, value & 0x0F == 0x0F);
    f.set(Flags::CARRY, flags.carry());
    (result, f)
}

/// DCR: carry is preserved from `flags`.
pub fn dcr(value: u8, flags: Flags) -> (u8, Flags) {
    let result = value.wrapping_sub(1);
    let mut f = Flags::szp(result);
    f.set(Flags::AUX_CARRY, value & 0x0F == 0x00);
    f.set(Flags::CARRY, flags.carry());
    (result, f)
}

/// DAD: 16-bit add into HL. Only carry is affected.
pub fn dad(hl: u16, value: u16, flags: Flags) -> (u16, Flags) {
    let (result, carry) = hl.overflowing_add(value);
    let mut f = flags;
    f.set(Flags::CARRY, carry);
    (result, f)
}

/// DAA: decimal-adjust the accumulator after a BCD addition.
///
/// The correction goes through `add`, so zero, sign, parity and auxiliary
/// carry describe the final accumulator. Carry is only ever set here.
pub fn daa(a: u8, flags: Flags) -> (u8, Flags) {
    let low = a & 0x0F;
    let high = a >> 4;
    let mut adjust = 0u8;
    let mut carry = flags.carry();

    if low > 9 || flags.aux_carry() {
        adjust |= 0x06;
    }
    // The high digit is corrected when it already exceeds 9 or will once
    // the low-digit correction carries into it.
    if high > 9 || carry || (high >= 9 && low > 9) {
        adjust |= 0x60;
        carry = true;
    }

    let (result, mut f) = add(a, adjust, false);
    f.set(Flags::CARRY, carry);
    (result, f)
}

/// RLC: rotate left, bit 7 into carry and bit 0.
pub fn rlc(a: u8, flags: Flags) -> (u8, Flags) {
    let mut f = flags;
    f.set(Flags::CARRY, a & 0x80 != 0);
    (a.rotate_left(1), f)
}

/// RRC: rotate right, bit 0 into carry and bit 7.
pub fn rrc(a: u8, flags: Flags) -> (u8, Flags) {
    let mut f = flags;
    f.set(Flags::CARRY, a & 0x01 != 0);
    (a.rotate_right(1), f)
}

/// RAL: rotate left through carry.
pub fn ral(a: u8, flags: Flags) -> (u8, Flags) {
    let mut f = flags;
    f.set(Flags::CARRY, a & 0x80 != 0);
    ((a << 1) | flags.carry() as u8, f)
}

/// RAR: rotate right through carry.
pub fn rar(a: u8, flags: Flags) -> (u8, Flags) {
    let mut f = flags;
    f.set(Flags::CARRY, a & 0x01 != 0);
    ((a >> 1) | ((flags.carry() as u8) << 7), f)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn add_wraps_to_zero_with_all_carries() {
        let (r, f) = add(0xFF, 0x01, false);
        assert_eq!(r, 0x00);
        assert!(f.zero());
        assert!(f.carry());
        assert!(f.aux_carry());
        assert!(f.parity());
        assert!(!f.sign());
    }

    #[test]
    fn add_nibble_boundary() {
        let (r, f) = add(0x09, 0x06, false);
        assert_eq!(r, 0x0F);
        assert!(!f.aux_carry());
        let (r, f) = add(0x0A, 0x06, false);
        assert_eq!(r, 0x10);
        assert!(f.aux_carry());
        assert!(!f.carry());
    }

    #[test]
    fn add_sets_sign_without_carry() {
        let (r, f) = add(0x7F, 0x01, false);
        assert_eq!(r, 0x80);
        assert!(f.sign());
        assert!(!f.carry());
        assert!(f.aux_carry());
        assert!(!f.parity());
    }

    #[test]
    fn adc_uses_carry_in() {
        let (r, f) = add(0xFE, 0x00, true);
        assert_eq!(r, 0xFF);
        assert!(!f.carry());
        let (r, f) = add(0xFF, 0x00, true);
        assert_eq!(r, 0x00);
        assert!(f.carry());
        assert!(f.aux_carry());
        let (_, f) = add(0x0F, 0x00, true);
        assert!(f.aux_carry());
    }

    #[test]
    fn sub_borrow_rules() {
        let (r, f) = sub(0x00, 0x01, false);
        assert_eq!(r, 0xFF);
        assert!(f.carry());
        assert!(f.aux_carry());
        assert!(f.sign());
        assert!(f.parity());

        let (r, f) = sub(0x10, 0x01, false);
        assert_eq!(r, 0x0F);
        assert!(!f.carry());
        assert!(f.aux_carry());

        let (r, f) = sub(0x3E, 0x3E, false);
        assert_eq!(r, 0);
        assert!(f.zero());
        assert!(!f.carry());
        assert!(!f.aux_carry());
    }

    #[test]
    fn sbb_uses_borrow_in() {
        let (r, f) = sub(0x05, 0x05, true);
        assert_eq!(r, 0xFF);
        assert!(f.carry());
        let (r, f) = sub(0x05, 0x04, true);
        assert_eq!(r, 0x00);
        assert!(f.zero());
        assert!(!f.carry());
    }

    #[test]
    fn logical_ops_clear_carry() {
        let (r, f) = and(0xFC, 0x0F);
        assert_eq!(r, 0x0C);
        assert!(!f.carry());
        assert!(f.aux_carry());
        assert!(f.parity());

        let (_, f) = and(0x30, 0x07);
        assert!(!f.aux_carry());
        assert!(f.zero());

        let (r, f) = xor(0x5A, 0x5A);
        assert_eq!(r, 0);
        assert!(f.zero());
        assert!(!f.aux_carry());

        let (r, f) = or(0x80, 0x01);
        assert_eq!(r, 0x81);
        assert!(f.sign());
        assert!(f.parity());
        assert!(!f.carry());
    }

    #[test]
    fn cmp_leaves_accumulator() {
        let (a, f) = AluOp::Cmp.apply(0x0A, 0x05, Flags::empty());
        assert_eq!(a, 0x0A);
        assert!(!f.carry());
        assert!(!f.zero());
        let (a, f) = AluOp::Cmp.apply(0x02, 0x05, Flags::empty());
        assert_eq!(a, 0x02);
        assert!(f.carry());
        let (_, f) = AluOp::Cmp.apply(0x05, 0x05, Flags::empty());
        assert!(f.zero());
    }

    #[test]
    fn opcode_to_alu_op() {
        assert_eq!(AluOp::from_opcode(0x80), AluOp::Add);
        assert_eq!(AluOp::from_opcode(0x8E), AluOp::Adc);
        assert_eq!(AluOp::from_opcode(0xD6), AluOp::Sub);
        assert_eq!(AluOp::from_opcode(0xDE), AluOp::Sbb);
        assert_eq!(AluOp::from_opcode(0xE6), AluOp::Ana);
        assert_eq!(AluOp::from_opcode(0xAF), AluOp::Xra);
        assert_eq!(AluOp::from_opcode(0xB0), AluOp::Ora);
        assert_eq!(AluOp::from_opcode(0xFE), AluOp::Cmp);
    }

    #[test]
    fn inr_dcr_preserve_carry() {
        let (r, f) = inr(0xFF, Flags::CARRY);
        assert_eq!(r, 0x00);
        assert!(f.zero());
        assert!(f.carry());
        assert!(f.aux_carry());

        let (r, f) = inr(0x0E, Flags::empty());
        assert_eq!(r, 0x0F);
        assert!(!f.carry());
        assert!(!f.aux_carry());

        let (r, f) = dcr(0x00, Flags::empty());
        assert_eq!(r, 0xFF);
        assert!(!f.carry());
        assert!(f.sign());
        assert!(f.aux_carry());

        let (r, f) = dcr(0x01, Flags::CARRY);
        assert_eq!(r, 0x00);
        assert!(f.zero());
        assert!(f.carry());
        assert!(!f.aux_carry());
    }

    #[test]
    fn dad_only_touches_carry() {
        let incoming = Flags::ZERO | Flags::SIGN;
        let (r, f) = dad(0xFFFF, 0x0001, incoming);
        assert_eq!(r, 0x0000);
        assert_eq!(f, incoming | Flags::CARRY);

        let (r, f) = dad(0x1234, 0x1111, Flags::CARRY);
        assert_eq!(r, 0x2345);
        assert!(!f.carry());
    }

    #[test]
    fn daa_wraps_bcd_with_carries_set() {
        let (r, f) = daa(0x9A, Flags::AUX_CARRY | Flags::CARRY);
        assert_eq!(r, 0x00);
        assert!(f.carry());
        assert!(f.zero());
    }

    #[test]
    fn daa_low_digit_only() {
        // 0x19 + 0x28 = 0x41 with AC set; decimal 19 + 28 = 47.
        let (r, f) = daa(0x41, Flags::AUX_CARRY);
        assert_eq!(r, 0x47);
        assert!(!f.carry());
    }

    #[test]
    fn daa_high_digit_only() {
        // 0x50 + 0x70 = 0xC0; decimal 50 + 70 = 120.
        let (r, f) = daa(0xC0, Flags::empty());
        assert_eq!(r, 0x20);
        assert!(f.carry());
    }

    #[test]
    fn daa_leaves_valid_bcd_alone() {
        let (r, f) = daa(0x42, Flags::empty());
        assert_eq!(r, 0x42);
        assert!(!f.carry());
        assert!(!f.aux_carry());
        assert!(f.parity());
    }

    #[test]
    fn daa_high_nine_with_low_overflow() {
        // 0x9B: the low correction carries into a high digit of 9.
        let (r, f) = daa(0x9B, Flags::empty());
        assert_eq!(r, 0x01);
        assert!(f.carry());
    }

    #[test]
    fn rotates_move_bits_through_carry() {
        let (r, f) = rlc(0x81, Flags::empty());
        assert_eq!(r, 0x03);
        assert!(f.carry());

        let (r, f) = rrc(0x01, Flags::empty());
        assert_eq!(r, 0x80);
        assert!(f.carry());

        let (r, f) = ral(0x80, Flags::empty());
        assert_eq!(r, 0x00);
        assert!(f.carry());
        let (r, f) = ral(0x00, Flags::CARRY);
        assert_eq!(r, 0x01);
        assert!(!f.carry());

        let (r, f) = rar(0x01, Flags::empty());
        assert_eq!(r, 0x00);
        assert!(f.carry());
        let (r, f) = rar(0x00, Flags::CARRY);
        assert_eq!(r, 0x80);
        assert!(!f.carry());
    }

    #[test]
    fn rotates_keep_other_flags() {
        let incoming = Flags::ZERO | Flags::PARITY | Flags::AUX_CARRY;
        let (_, f) = rlc(0x01, incoming);
        assert_eq!(f, incoming);
    }
}
