//! Pure-function disassembler: `(bus, range) -> address -> mnemonic`.
//!
//! Walks a CPU address range one instruction at a time, decoding the same
//! opcode table [`rustynes_cpu::Cpu`] executes, but only ever peeking memory
//! — no CPU or bus state is observed to change.

use std::collections::BTreeMap;

use rustynes_cpu::{AddrMode, Bus, Op, decode};

/// Disassemble every instruction in `[start, end]`, keyed by the address of
/// its opcode byte.
///
/// `bus` is only ever peeked (see [`Bus::peek`]); no side effects (PPU
/// register reads, controller shifts) occur.
#[must_use]
pub fn disassemble(bus: &impl Bus, start: u16, end: u16) -> BTreeMap<u16, String> {
    let mut out = BTreeMap::new();
    let mut addr = start;

    loop {
        let opcode = bus.peek(addr);
        let info = decode(opcode);
        let operand_addr = addr.wrapping_add(1);
        out.insert(addr, format_instruction(bus, info.op, info.mode, operand_addr));

        let instruction_len = 1 + u16::from(info.mode.operand_size());
        let next = addr.wrapping_add(instruction_len);
        if next <= addr || addr >= end {
            break;
        }
        addr = next;
    }

    out
}

/// Render one decoded instruction as `MNEMONIC operand`, matching the
/// textual form of hand-authored trace files (e.g. `LDA $1234`,
/// `BNE $FE [$8020]`).
fn format_instruction(bus: &impl Bus, op: Op, mode: AddrMode, operand_addr: u16) -> String {
    let mnemonic = op.mnemonic();
    match mode {
        AddrMode::Imp => mnemonic.to_string(),
        AddrMode::Acc => format!("{mnemonic} A"),
        AddrMode::Imm => format!("{mnemonic} #${:02X}", bus.peek(operand_addr)),
        AddrMode::Zp0 => format!("{mnemonic} ${:02X}", bus.peek(operand_addr)),
        AddrMode::Zpx => format!("{mnemonic} ${:02X},X", bus.peek(operand_addr)),
        AddrMode::Zpy => format!("{mnemonic} ${:02X},Y", bus.peek(operand_addr)),
        AddrMode::Izx => format!("{mnemonic} (${:02X},X)", bus.peek(operand_addr)),
        AddrMode::Izy => format!("{mnemonic} (${:02X}),Y", bus.peek(operand_addr)),
        AddrMode::Abs => format!("{mnemonic} ${:04X}", read_u16(bus, operand_addr)),
        AddrMode::Abx => format!("{mnemonic} ${:04X},X", read_u16(bus, operand_addr)),
        AddrMode::Aby => format!("{mnemonic} ${:04X},Y", read_u16(bus, operand_addr)),
        AddrMode::Ind => format!("{mnemonic} (${:04X})", read_u16(bus, operand_addr)),
        AddrMode::Rel => {
            let offset = bus.peek(operand_addr) as i8;
            let target = operand_addr.wrapping_add(1).wrapping_add(offset as u16);
            format!("{mnemonic} ${:02X} [${:04X}]", offset as u8, target)
        }
    }
}

/// Peek a little-endian 16-bit value without the CPU's `JMP`-indirect bug
/// (that quirk belongs to instruction execution, not to reading a literal
/// absolute operand).
fn read_u16(bus: &impl Bus, addr: u16) -> u16 {
    let lo = u16::from(bus.peek(addr));
    let hi = u16::from(bus.peek(addr.wrapping_add(1)));
    (hi << 8) | lo
}
