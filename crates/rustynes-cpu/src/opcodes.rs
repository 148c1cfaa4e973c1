//! Opcode decode table.
//!
//! Maps each of the 256 opcode bytes to a mnemonic, addressing mode, and base
//! cycle count. The 56 documented 6502 operations are decoded precisely; any
//! byte that does not correspond to one of them decodes as [`Op::Xxx`], which
//! [`crate::cpu::Cpu`] executes as a `NOP` consuming the tabled cycle count.

use crate::addressing::AddrMode;

/// A decoded 6502 operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[allow(clippy::upper_case_acronyms)]
pub enum Op {
    Adc, And, Asl, Bcc, Bcs, Beq, Bit, Bmi, Bne, Bpl, Brk, Bvc, Bvs, Clc, Cld,
    Cli, Clv, Cmp, Cpx, Cpy, Dec, Dex, Dey, Eor, Inc, Inx, Iny, Jmp, Jsr, Lda,
    Ldx, Ldy, Lsr, Nop, Ora, Pha, Php, Pla, Plp, Rol, Ror, Rti, Rts, Sbc, Sec,
    Sed, Sei, Sta, Stx, Sty, Tax, Tay, Tsx, Txa, Txs, Tya,
    /// Illegal opcode; always executes as a `NOP`.
    Xxx,
}

impl Op {
    /// Three-letter mnemonic, as used by the disassembler.
    #[must_use]
    pub const fn mnemonic(self) -> &'static str {
        match self {
            Self::Adc => "ADC", Self::And => "AND", Self::Asl => "ASL",
            Self::Bcc => "BCC", Self::Bcs => "BCS", Self::Beq => "BEQ",
            Self::Bit => "BIT", Self::Bmi => "BMI", Self::Bne => "BNE",
            Self::Bpl => "BPL", Self::Brk => "BRK", Self::Bvc => "BVC",
            Self::Bvs => "BVS", Self::Clc => "CLC", Self::Cld => "CLD",
            Self::Cli => "CLI", Self::Clv => "CLV", Self::Cmp => "CMP",
            Self::Cpx => "CPX", Self::Cpy => "CPY", Self::Dec => "DEC",
            Self::Dex => "DEX", Self::Dey => "DEY", Self::Eor => "EOR",
            Self::Inc => "INC", Self::Inx => "INX", Self::Iny => "INY",
            Self::Jmp => "JMP", Self::Jsr => "JSR", Self::Lda => "LDA",
            Self::Ldx => "LDX", Self::Ldy => "LDY", Self::Lsr => "LSR",
            Self::Nop => "NOP", Self::Ora => "ORA", Self::Pha => "PHA",
            Self::Php => "PHP", Self::Pla => "PLA", Self::Plp => "PLP",
            Self::Rol => "ROL", Self::Ror => "ROR", Self::Rti => "RTI",
            Self::Rts => "RTS", Self::Sbc => "SBC", Self::Sec => "SEC",
            Self::Sed => "SED", Self::Sei => "SEI", Self::Sta => "STA",
            Self::Stx => "STX", Self::Sty => "STY", Self::Tax => "TAX",
            Self::Tay => "TAY", Self::Tsx => "TSX", Self::Txa => "TXA",
            Self::Txs => "TXS", Self::Tya => "TYA", Self::Xxx => "XXX",
        }
    }
}

/// One decoded table entry: operation, addressing mode, base cycle count.
#[derive(Debug, Clone, Copy)]
pub struct OpInfo {
    /// The operation to execute.
    pub op: Op,
    /// The addressing mode used to resolve the operand.
    pub mode: AddrMode,
    /// Base cycle count before any page-cross / branch penalty.
    pub cycles: u8,
}

const fn info(op: Op, mode: AddrMode, cycles: u8) -> OpInfo {
    OpInfo { op, mode, cycles }
}

/// Default cycle count for an illegal opcode, derived from its addressing
/// mode's operand width. Real silicon has a definite cycle count per illegal
/// opcode; since `XXX` only needs to behave as a tabled-length `NOP` here, an
/// operand-size-derived estimate is sufficient.
const fn default_illegal_cycles(mode: AddrMode) -> u8 {
    match mode {
        AddrMode::Imp | AddrMode::Acc => 2,
        AddrMode::Imm | AddrMode::Zp0 => 3,
        AddrMode::Zpx | AddrMode::Zpy | AddrMode::Abs => 4,
        AddrMode::Abx | AddrMode::Aby => 4,
        AddrMode::Rel => 2,
        AddrMode::Izx => 6,
        AddrMode::Izy => 5,
        AddrMode::Ind => 5,
    }
}

/// Addressing mode assigned to each opcode byte, including illegal ones, so
/// instruction length (and therefore PC advancement) is always correct even
/// when the operation itself is a no-op.
#[rustfmt::skip]
const ADDR_MODE_TABLE: [AddrMode; 256] = {
    use AddrMode::{Abs, Abx, Aby, Acc, Imm, Imp, Ind, Izx, Izy, Rel, Zp0, Zpx, Zpy};
    [
        Imp, Izx, Imp, Izx, Zp0, Zp0, Zp0, Zp0, Imp, Imm, Acc, Imm, Abs, Abs, Abs, Abs,
        Rel, Izy, Imp, Izy, Zpx, Zpx, Zpx, Zpx, Imp, Aby, Imp, Aby, Abx, Abx, Abx, Abx,
        Abs, Izx, Imp, Izx, Zp0, Zp0, Zp0, Zp0, Imp, Imm, Acc, Imm, Abs, Abs, Abs, Abs,
        Rel, Izy, Imp, Izy, Zpx, Zpx, Zpx, Zpx, Imp, Aby, Imp, Aby, Abx, Abx, Abx, Abx,
        Imp, Izx, Imp, Izx, Zp0, Zp0, Zp0, Zp0, Imp, Imm, Acc, Imm, Abs, Abs, Abs, Abs,
        Rel, Izy, Imp, Izy, Zpx, Zpx, Zpx, Zpx, Imp, Aby, Imp, Aby, Abx, Abx, Abx, Abx,
        Imp, Izx, Imp, Izx, Zp0, Zp0, Zp0, Zp0, Imp, Imm, Acc, Imm, Ind, Abs, Abs, Abs,
        Rel, Izy, Imp, Izy, Zpx, Zpx, Zpx, Zpx, Imp, Aby, Imp, Aby, Abx, Abx, Abx, Abx,
        Imm, Izx, Imm, Izx, Zp0, Zp0, Zp0, Zp0, Imp, Imm, Imp, Imm, Abs, Abs, Abs, Abs,
        Rel, Izy, Imp, Izy, Zpx, Zpx, Zpy, Zpy, Imp, Aby, Imp, Aby, Abx, Abx, Aby, Aby,
        Imm, Izx, Imm, Izx, Zp0, Zp0, Zp0, Zp0, Imp, Imm, Imp, Imm, Abs, Abs, Abs, Abs,
        Rel, Izy, Imp, Izy, Zpx, Zpx, Zpy, Zpy, Imp, Aby, Imp, Aby, Abx, Abx, Aby, Aby,
        Imm, Izx, Imm, Izx, Zp0, Zp0, Zp0, Zp0, Imp, Imm, Imp, Imm, Abs, Abs, Abs, Abs,
        Rel, Izy, Imp, Izy, Zpx, Zpx, Zpx, Zpx, Imp, Aby, Imp, Aby, Abx, Abx, Abx, Abx,
        Imm, Izx, Imm, Izx, Zp0, Zp0, Zp0, Zp0, Imp, Imm, Imp, Imm, Abs, Abs, Abs, Abs,
        Rel, Izy, Imp, Izy, Zpx, Zpx, Zpx, Zpx, Imp, Aby, Imp, Aby, Abx, Abx, Abx, Abx,
    ]
};

/// Decode one opcode byte into operation, addressing mode, and base cycles.
#[must_use]
pub fn decode(opcode: u8) -> OpInfo {
    let mode = ADDR_MODE_TABLE[opcode as usize];
    match opcode {
        0x69 => info(Op::Adc, AddrMode::Imm, 2),
        0x65 => info(Op::Adc, AddrMode::Zp0, 3),
        0x75 => info(Op::Adc, AddrMode::Zpx, 4),
        0x6D => info(Op::Adc, AddrMode::Abs, 4),
        0x7D => info(Op::Adc, AddrMode::Abx, 4),
        0x79 => info(Op::Adc, AddrMode::Aby, 4),
        0x61 => info(Op::Adc, AddrMode::Izx, 6),
        0x71 => info(Op::Adc, AddrMode::Izy, 5),

        0x29 => info(Op::And, AddrMode::Imm, 2),
        0x25 => info(Op::And, AddrMode::Zp0, 3),
        0x35 => info(Op::And, AddrMode::Zpx, 4),
        0x2D => info(Op::And, AddrMode::Abs, 4),
        0x3D => info(Op::And, AddrMode::Abx, 4),
        0x39 => info(Op::And, AddrMode::Aby, 4),
        0x21 => info(Op::And, AddrMode::Izx, 6),
        0x31 => info(Op::And, AddrMode::Izy, 5),

        0x0A => info(Op::Asl, AddrMode::Acc, 2),
        0x06 => info(Op::Asl, AddrMode::Zp0, 5),
        0x16 => info(Op::Asl, AddrMode::Zpx, 6),
        0x0E => info(Op::Asl, AddrMode::Abs, 6),
        0x1E => info(Op::Asl, AddrMode::Abx, 7),

        0x90 => info(Op::Bcc, AddrMode::Rel, 2),
        0xB0 => info(Op::Bcs, AddrMode::Rel, 2),
        0xF0 => info(Op::Beq, AddrMode::Rel, 2),
        0x30 => info(Op::Bmi, AddrMode::Rel, 2),
        0xD0 => info(Op::Bne, AddrMode::Rel, 2),
        0x10 => info(Op::Bpl, AddrMode::Rel, 2),
        0x50 => info(Op::Bvc, AddrMode::Rel, 2),
        0x70 => info(Op::Bvs, AddrMode::Rel, 2),

        0x24 => info(Op::Bit, AddrMode::Zp0, 3),
        0x2C => info(Op::Bit, AddrMode::Abs, 4),

        0x00 => info(Op::Brk, AddrMode::Imm, 7),

        0x18 => info(Op::Clc, AddrMode::Imp, 2),
        0xD8 => info(Op::Cld, AddrMode::Imp, 2),
        0x58 => info(Op::Cli, AddrMode::Imp, 2),
        0xB8 => info(Op::Clv, AddrMode::Imp, 2),

        0xC9 => info(Op::Cmp, AddrMode::Imm, 2),
        0xC5 => info(Op::Cmp, AddrMode::Zp0, 3),
        0xD5 => info(Op::Cmp, AddrMode::Zpx, 4),
        0xCD => info(Op::Cmp, AddrMode::Abs, 4),
        0xDD => info(Op::Cmp, AddrMode::Abx, 4),
        0xD9 => info(Op::Cmp, AddrMode::Aby, 4),
        0xC1 => info(Op::Cmp, AddrMode::Izx, 6),
        0xD1 => info(Op::Cmp, AddrMode::Izy, 5),

        0xE0 => info(Op::Cpx, AddrMode::Imm, 2),
        0xE4 => info(Op::Cpx, AddrMode::Zp0, 3),
        0xEC => info(Op::Cpx, AddrMode::Abs, 4),

        0xC0 => info(Op::Cpy, AddrMode::Imm, 2),
        0xC4 => info(Op::Cpy, AddrMode::Zp0, 3),
        0xCC => info(Op::Cpy, AddrMode::Abs, 4),

        0xC6 => info(Op::Dec, AddrMode::Zp0, 5),
        0xD6 => info(Op::Dec, AddrMode::Zpx, 6),
        0xCE => info(Op::Dec, AddrMode::Abs, 6),
        0xDE => info(Op::Dec, AddrMode::Abx, 7),

        0xCA => info(Op::Dex, AddrMode::Imp, 2),
        0x88 => info(Op::Dey, AddrMode::Imp, 2),

        0x49 => info(Op::Eor, AddrMode::Imm, 2),
        0x45 => info(Op::Eor, AddrMode::Zp0, 3),
        0x55 => info(Op::Eor, AddrMode::Zpx, 4),
        0x4D => info(Op::Eor, AddrMode::Abs, 4),
        0x5D => info(Op::Eor, AddrMode::Abx, 4),
        0x59 => info(Op::Eor, AddrMode::Aby, 4),
        0x41 => info(Op::Eor, AddrMode::Izx, 6),
        0x51 => info(Op::Eor, AddrMode::Izy, 5),

        0xE6 => info(Op::Inc, AddrMode::Zp0, 5),
        0xF6 => info(Op::Inc, AddrMode::Zpx, 6),
        0xEE => info(Op::Inc, AddrMode::Abs, 6),
        0xFE => info(Op::Inc, AddrMode::Abx, 7),

        0xE8 => info(Op::Inx, AddrMode::Imp, 2),
        0xC8 => info(Op::Iny, AddrMode::Imp, 2),

        0x4C => info(Op::Jmp, AddrMode::Abs, 3),
        0x6C => info(Op::Jmp, AddrMode::Ind, 5),

        0x20 => info(Op::Jsr, AddrMode::Abs, 6),

        0xA9 => info(Op::Lda, AddrMode::Imm, 2),
        0xA5 => info(Op::Lda, AddrMode::Zp0, 3),
        0xB5 => info(Op::Lda, AddrMode::Zpx, 4),
        0xAD => info(Op::Lda, AddrMode::Abs, 4),
        0xBD => info(Op::Lda, AddrMode::Abx, 4),
        0xB9 => info(Op::Lda, AddrMode::Aby, 4),
        0xA1 => info(Op::Lda, AddrMode::Izx, 6),
        0xB1 => info(Op::Lda, AddrMode::Izy, 5),

        0xA2 => info(Op::Ldx, AddrMode::Imm, 2),
        0xA6 => info(Op::Ldx, AddrMode::Zp0, 3),
        0xB6 => info(Op::Ldx, AddrMode::Zpy, 4),
        0xAE => info(Op::Ldx, AddrMode::Abs, 4),
        0xBE => info(Op::Ldx, AddrMode::Aby, 4),

        0xA0 => info(Op::Ldy, AddrMode::Imm, 2),
        0xA4 => info(Op::Ldy, AddrMode::Zp0, 3),
        0xB4 => info(Op::Ldy, AddrMode::Zpx, 4),
        0xAC => info(Op::Ldy, AddrMode::Abs, 4),
        0xBC => info(Op::Ldy, AddrMode::Abx, 4),

        0x4A => info(Op::Lsr, AddrMode::Acc, 2),
        0x46 => info(Op::Lsr, AddrMode::Zp0, 5),
        0x56 => info(Op::Lsr, AddrMode::Zpx, 6),
        0x4E => info(Op::Lsr, AddrMode::Abs, 6),
        0x5E => info(Op::Lsr, AddrMode::Abx, 7),

        0xEA => info(Op::Nop, AddrMode::Imp, 2),

        0x09 => info(Op::Ora, AddrMode::Imm, 2),
        0x05 => info(Op::Ora, AddrMode::Zp0, 3),
        0x15 => info(Op::Ora, AddrMode::Zpx, 4),
        0x0D => info(Op::Ora, AddrMode::Abs, 4),
        0x1D => info(Op::Ora, AddrMode::Abx, 4),
        0x19 => info(Op::Ora, AddrMode::Aby, 4),
        0x01 => info(Op::Ora, AddrMode::Izx, 6),
        0x11 => info(Op::Ora, AddrMode::Izy, 5),

        0x48 => info(Op::Pha, AddrMode::Imp, 3),
        0x08 => info(Op::Php, AddrMode::Imp, 3),
        0x68 => info(Op::Pla, AddrMode::Imp, 4),
        0x28 => info(Op::Plp, AddrMode::Imp, 4),

        0x2A => info(Op::Rol, AddrMode::Acc, 2),
        0x26 => info(Op::Rol, AddrMode::Zp0, 5),
        0x36 => info(Op::Rol, AddrMode::Zpx, 6),
        0x2E => info(Op::Rol, AddrMode::Abs, 6),
        0x3E => info(Op::Rol, AddrMode::Abx, 7),

        0x6A => info(Op::Ror, AddrMode::Acc, 2),
        0x66 => info(Op::Ror, AddrMode::Zp0, 5),
        0x76 => info(Op::Ror, AddrMode::Zpx, 6),
        0x6E => info(Op::Ror, AddrMode::Abs, 6),
        0x7E => info(Op::Ror, AddrMode::Abx, 7),

        0x40 => info(Op::Rti, AddrMode::Imp, 6),
        0x60 => info(Op::Rts, AddrMode::Imp, 6),

        0xE9 => info(Op::Sbc, AddrMode::Imm, 2),
        0xE5 => info(Op::Sbc, AddrMode::Zp0, 3),
        0xF5 => info(Op::Sbc, AddrMode::Zpx, 4),
        0xED => info(Op::Sbc, AddrMode::Abs, 4),
        0xFD => info(Op::Sbc, AddrMode::Abx, 4),
        0xF9 => info(Op::Sbc, AddrMode::Aby, 4),
        0xE1 => info(Op::Sbc, AddrMode::Izx, 6),
        0xF1 => info(Op::Sbc, AddrMode::Izy, 5),

        0x38 => info(Op::Sec, AddrMode::Imp, 2),
        0xF8 => info(Op::Sed, AddrMode::Imp, 2),
        0x78 => info(Op::Sei, AddrMode::Imp, 2),

        0x85 => info(Op::Sta, AddrMode::Zp0, 3),
        0x95 => info(Op::Sta, AddrMode::Zpx, 4),
        0x8D => info(Op::Sta, AddrMode::Abs, 4),
        0x9D => info(Op::Sta, AddrMode::Abx, 5),
        0x99 => info(Op::Sta, AddrMode::Aby, 5),
        0x81 => info(Op::Sta, AddrMode::Izx, 6),
        0x91 => info(Op::Sta, AddrMode::Izy, 6),

        0x86 => info(Op::Stx, AddrMode::Zp0, 3),
        0x96 => info(Op::Stx, AddrMode::Zpy, 4),
        0x8E => info(Op::Stx, AddrMode::Abs, 4),

        0x84 => info(Op::Sty, AddrMode::Zp0, 3),
        0x94 => info(Op::Sty, AddrMode::Zpx, 4),
        0x8C => info(Op::Sty, AddrMode::Abs, 4),

        0xAA => info(Op::Tax, AddrMode::Imp, 2),
        0xA8 => info(Op::Tay, AddrMode::Imp, 2),
        0xBA => info(Op::Tsx, AddrMode::Imp, 2),
        0x8A => info(Op::Txa, AddrMode::Imp, 2),
        0x9A => info(Op::Txs, AddrMode::Imp, 2),
        0x98 => info(Op::Tya, AddrMode::Imp, 2),

        _ => info(Op::Xxx, mode, default_illegal_cycles(mode)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_lda_variants() {
        assert_eq!(decode(0xA9).mode, AddrMode::Imm);
        assert_eq!(decode(0xA5).mode, AddrMode::Zp0);
        assert_eq!(decode(0xAD).mode, AddrMode::Abs);
        assert_eq!(decode(0xA9).op, Op::Lda);
    }

    #[test]
    fn test_decode_jmp_indirect() {
        let jmp = decode(0x6C);
        assert_eq!(jmp.op, Op::Jmp);
        assert_eq!(jmp.mode, AddrMode::Ind);
        assert_eq!(jmp.cycles, 5);
    }

    #[test]
    fn test_decode_illegal_is_nop() {
        let illegal = decode(0x02);
        assert_eq!(illegal.op, Op::Xxx);
    }

    #[test]
    fn test_all_official_mnemonics_present() {
        let official = [
            Op::Adc, Op::And, Op::Asl, Op::Bcc, Op::Bcs, Op::Beq, Op::Bit,
            Op::Bmi, Op::Bne, Op::Bpl, Op::Brk, Op::Bvc, Op::Bvs, Op::Clc,
            Op::Cld, Op::Cli, Op::Clv, Op::Cmp, Op::Cpx, Op::Cpy, Op::Dec,
            Op::Dex, Op::Dey, Op::Eor, Op::Inc, Op::Inx, Op::Iny, Op::Jmp,
            Op::Jsr, Op::Lda, Op::Ldx, Op::Ldy, Op::Lsr, Op::Nop, Op::Ora,
            Op::Pha, Op::Php, Op::Pla, Op::Plp, Op::Rol, Op::Ror, Op::Rti,
            Op::Rts, Op::Sbc, Op::Sec, Op::Sed, Op::Sei, Op::Sta, Op::Stx,
            Op::Sty, Op::Tax, Op::Tay, Op::Tsx, Op::Txa, Op::Txs, Op::Tya,
        ];
        assert_eq!(official.len(), 56);
        for op in official {
            assert!(!op.mnemonic().is_empty());
        }
    }
}
