//! Instruction-level conformance checks for the atomic CPU engine.
//!
//! These exercise small hand-assembled programs against the public
//! [`Cpu`]/[`Bus`] API rather than a golden execution log, since no test
//! ROMs ship with this crate.

use rustynes_cpu::{Bus, Cpu, Status};

struct FlatBus {
    mem: [u8; 0x10000],
}

impl FlatBus {
    fn new() -> Self {
        Self { mem: [0; 0x10000] }
    }

    fn load(&mut self, addr: u16, bytes: &[u8]) {
        for (i, b) in bytes.iter().enumerate() {
            self.mem[addr as usize + i] = *b;
        }
    }

    fn with_reset_vector(addr: u16) -> Self {
        let mut bus = Self::new();
        bus.load(0xFFFC, &[addr as u8, (addr >> 8) as u8]);
        bus
    }
}

impl Bus for FlatBus {
    fn read(&mut self, addr: u16) -> u8 {
        self.mem[addr as usize]
    }

    fn write(&mut self, addr: u16, value: u8) {
        self.mem[addr as usize] = value;
    }

    fn peek(&self, addr: u16) -> u8 {
        self.mem[addr as usize]
    }
}

fn booted(bus: &mut FlatBus) -> Cpu {
    let mut cpu = Cpu::new();
    cpu.reset(bus);
    cpu.step(bus); // consume the reset's own cycle cost
    cpu
}

#[test]
fn register_transfer_chain_preserves_values() {
    let mut bus = FlatBus::with_reset_vector(0x8000);
    // LDA #$37; TAX; TXA; TAY; TYA; TSX; TXS
    bus.load(0x8000, &[0xA9, 0x37, 0xAA, 0x8A, 0xA8, 0x98, 0xBA, 0x9A]);
    let mut cpu = booted(&mut bus);

    for _ in 0..7 {
        cpu.step(&mut bus);
    }

    assert_eq!(cpu.a, 0x37);
    assert_eq!(cpu.x, 0xFD); // TSX captured SP before TXS restored it
    assert_eq!(cpu.y, 0x37);
    assert_eq!(cpu.sp, 0xFD);
}

#[test]
fn arithmetic_and_comparison_flags() {
    let mut bus = FlatBus::with_reset_vector(0x8000);
    // LDA #$50; CMP #$50; LDA #$10; SBC #$20 (borrow, carry was clear)
    bus.load(0x8000, &[0xA9, 0x50, 0xC9, 0x50, 0xA9, 0x10, 0xE9, 0x20]);
    let mut cpu = booted(&mut bus);

    cpu.step(&mut bus); // LDA #$50
    cpu.step(&mut bus); // CMP #$50
    assert!(cpu.status.contains(Status::Z));
    assert!(cpu.status.contains(Status::C));

    cpu.step(&mut bus); // LDA #$10
    cpu.step(&mut bus); // SBC #$20
    assert_eq!(cpu.a, 0xEF);
    assert!(!cpu.status.contains(Status::C));
}

#[test]
fn brk_pushes_b_flag_and_enters_irq_vector() {
    let mut bus = FlatBus::with_reset_vector(0x8000);
    bus.load(0xFFFE, &[0x00, 0x90]); // IRQ/BRK vector -> $9000
    bus.load(0x8000, &[0x00]); // BRK
    let mut cpu = booted(&mut bus);

    let sp_before = cpu.sp;
    cpu.step(&mut bus);

    assert_eq!(cpu.pc, 0x9000);
    assert!(cpu.status.contains(Status::I));
    assert_eq!(cpu.sp, sp_before.wrapping_sub(3));

    let pushed_status = bus.read(0x0100 + u16::from(cpu.sp) + 1);
    assert!(pushed_status & Status::B.bits() != 0);
}

#[test]
fn nmi_takes_priority_and_uses_nmi_vector() {
    let mut bus = FlatBus::with_reset_vector(0x8000);
    bus.load(0xFFFA, &[0x00, 0x91]); // NMI vector -> $9100
    bus.load(0x8000, &[0xEA]); // NOP
    let mut cpu = booted(&mut bus);

    cpu.step(&mut bus); // NOP
    cpu.trigger_nmi();
    cpu.step(&mut bus); // services the NMI instead of fetching the next opcode

    assert_eq!(cpu.pc, 0x9100);
}

#[test]
fn indexed_indirect_and_indirect_indexed_addressing() {
    let mut bus = FlatBus::with_reset_vector(0x8000);
    // Pointer table at $20: ($20+X) -> $3000 for Izx; ($20) -> $3000 for Izy.
    bus.write(0x20, 0x00);
    bus.write(0x21, 0x30);
    bus.write(0x3000, 0xAB);
    bus.write(0x3001, 0xCD);
    // LDX #$00; LDA ($20,X); LDY #$01; LDA ($20),Y
    bus.load(0x8000, &[0xA2, 0x00, 0xA1, 0x20, 0xA0, 0x01, 0xB1, 0x20]);
    let mut cpu = booted(&mut bus);

    cpu.step(&mut bus); // LDX #$00
    cpu.step(&mut bus); // LDA ($20,X)
    assert_eq!(cpu.a, 0xAB);

    cpu.step(&mut bus); // LDY #$01
    cpu.step(&mut bus); // LDA ($20),Y
    assert_eq!(cpu.a, 0xCD);
}
