//! 6502 CPU core: fetch-decode-execute, interrupts, and cycle accounting.
//!
//! The engine models each instruction atomically: resolve the operand,
//! execute the operation, then spend the remainder of the instruction's
//! declared cycle count doing nothing observable. This is enough to
//! reproduce every documented timing and register-conformance property of
//! the real CPU without a per-micro-op pipeline.

use crate::addressing::AddrMode;
use crate::opcodes::{decode, Op};
use crate::status::Status;

/// Memory bus interface the CPU drives all reads/writes through.
///
/// Implementors provide the full 16-bit address space view: RAM, PPU
/// registers, controller ports, and cartridge space.
pub trait Bus {
    /// Read a byte from memory. May have side effects (PPU register reads,
    /// controller shift).
    fn read(&mut self, addr: u16) -> u8;

    /// Write a byte to memory. May have side effects (PPU register writes,
    /// controller strobe, mapper bank switches).
    fn write(&mut self, addr: u16, value: u8);

    /// Read a byte without side effects, for disassembly and debugging.
    /// Default implementation returns 0; override for proper support.
    #[inline]
    fn peek(&self, addr: u16) -> u8 {
        let _ = addr;
        0
    }

    /// Read a little-endian 16-bit value from `addr`/`addr+1`.
    #[inline]
    fn read_u16(&mut self, addr: u16) -> u16 {
        let lo = u16::from(self.read(addr));
        let hi = u16::from(self.read(addr.wrapping_add(1)));
        (hi << 8) | lo
    }

    /// Read a little-endian 16-bit value, reproducing the 6502 `JMP`
    /// indirect page-boundary bug: if `addr` ends in 0xFF, the high byte is
    /// fetched from the start of the same page instead of the next one.
    #[inline]
    fn read_u16_wrap(&mut self, addr: u16) -> u16 {
        let lo = u16::from(self.read(addr));
        let hi_addr = if addr & 0x00FF == 0x00FF {
            addr & 0xFF00
        } else {
            addr.wrapping_add(1)
        };
        let hi = u16::from(self.read(hi_addr));
        (hi << 8) | lo
    }
}

/// Interrupt vectors.
pub mod vectors {
    /// Non-maskable interrupt vector.
    pub const NMI: u16 = 0xFFFA;
    /// Reset vector.
    pub const RESET: u16 = 0xFFFC;
    /// IRQ/BRK vector.
    pub const IRQ: u16 = 0xFFFE;
}

/// The 6502 (2A03) CPU core.
#[derive(Debug, Clone)]
pub struct Cpu {
    /// Accumulator.
    pub a: u8,
    /// X index register.
    pub x: u8,
    /// Y index register.
    pub y: u8,
    /// Stack pointer (offset into page 1, $0100-$01FF).
    pub sp: u8,
    /// Program counter.
    pub pc: u16,
    /// Processor status flags.
    pub status: Status,
    /// Cycles remaining in the instruction currently executing.
    cycles_remaining: u8,
    /// Total cycles elapsed since power-on/reset.
    cycles: u64,
    /// Opcode byte of the most recently fetched instruction.
    last_opcode: u8,
    /// Asserted for exactly the tick an instruction retires.
    instruction_complete: bool,
    /// Edge-triggered non-maskable interrupt request.
    nmi_pending: bool,
    /// Level-triggered interrupt request (honored only while I is clear).
    irq_pending: bool,
}

impl Default for Cpu {
    fn default() -> Self {
        Self::new()
    }
}

impl Cpu {
    /// Construct a CPU in its power-on state. Call [`Cpu::reset`] afterwards
    /// to load the program counter from the reset vector.
    #[must_use]
    pub fn new() -> Self {
        Self {
            a: 0,
            x: 0,
            y: 0,
            sp: 0xFD,
            pc: 0,
            status: Status::POWER_ON,
            cycles_remaining: 0,
            cycles: 0,
            last_opcode: 0,
            instruction_complete: false,
            nmi_pending: false,
            irq_pending: false,
        }
    }

    /// Reset the CPU: registers return to their power-on pattern, the
    /// program counter loads from the reset vector, and the operation
    /// consumes 8 cycles.
    pub fn reset(&mut self, bus: &mut impl Bus) {
        self.a = 0;
        self.x = 0;
        self.y = 0;
        self.sp = 0xFD;
        self.status = Status::POWER_ON;
        self.pc = bus.read_u16(vectors::RESET);
        self.cycles_remaining = 8;
        self.nmi_pending = false;
        self.irq_pending = false;
        self.instruction_complete = false;
    }

    /// Request a non-maskable interrupt. Serviced the next time the CPU is
    /// ready to start a new instruction.
    pub fn trigger_nmi(&mut self) {
        self.nmi_pending = true;
    }

    /// Set or clear the level-triggered IRQ line.
    pub fn set_irq(&mut self, active: bool) {
        self.irq_pending = active;
    }

    /// Total cycles elapsed since the last reset.
    #[must_use]
    pub fn cycles(&self) -> u64 {
        self.cycles
    }

    /// Opcode byte of the most recently fetched instruction.
    #[must_use]
    pub fn last_opcode(&self) -> u8 {
        self.last_opcode
    }

    /// True on the one tick an instruction retires.
    #[must_use]
    pub fn instruction_complete(&self) -> bool {
        self.instruction_complete
    }

    /// Run [`Cpu::tick`] until the in-flight instruction (or interrupt
    /// sequence) retires, returning the number of cycles it consumed.
    /// A convenience wrapper around the per-tick contract for callers that
    /// don't need to observe sub-instruction state.
    pub fn step(&mut self, bus: &mut impl Bus) -> u8 {
        let start = self.cycles;
        self.tick(bus);
        while !self.instruction_complete {
            self.tick(bus);
        }
        (self.cycles - start) as u8
    }

    /// Advance the CPU by one master-clock-derived tick. When the previous
    /// instruction's cycle count has been exhausted, this fetches and fully
    /// resolves/executes the next instruction (or services a pending
    /// interrupt) and loads `cycles_remaining` with its total cost; every
    /// tick, including this one, then decrements that counter by one.
    pub fn tick(&mut self, bus: &mut impl Bus) {
        self.instruction_complete = false;

        if self.cycles_remaining == 0 {
            if self.nmi_pending {
                self.nmi_pending = false;
                self.service_interrupt(bus, vectors::NMI, false);
                self.cycles_remaining = 7;
            } else if self.irq_pending && !self.status.contains(Status::I) {
                self.service_interrupt(bus, vectors::IRQ, false);
                self.cycles_remaining = 7;
            } else {
                self.step_instruction(bus);
            }
        }

        self.cycles_remaining -= 1;
        self.cycles += 1;
        if self.cycles_remaining == 0 {
            self.instruction_complete = true;
        }
    }

    /// Fetch, decode, resolve operand, and execute one instruction, loading
    /// `cycles_remaining` with its total cost (base cycles plus any
    /// page-cross or branch penalty).
    fn step_instruction(&mut self, bus: &mut impl Bus) {
        let opcode = bus.read(self.pc);
        self.pc = self.pc.wrapping_add(1);
        self.last_opcode = opcode;

        let decoded = decode(opcode);
        let operand = self.resolve_operand(bus, decoded.mode);
        let extra_cycles = self.execute(bus, decoded.op, operand);

        self.cycles_remaining = decoded.cycles + extra_cycles;
    }

    /// Push PC (high, then low) and status onto the stack and load `pc`
    /// from `vector`. Used by hardware interrupts (`brk = false`) and the
    /// software `BRK` instruction (`brk = true`).
    fn service_interrupt(&mut self, bus: &mut impl Bus, vector: u16, brk: bool) {
        self.push16(bus, self.pc);
        let byte = self.status.to_stack_byte(brk);
        self.push(bus, byte);
        self.status.insert(Status::I);
        self.pc = bus.read_u16(vector);
    }

    fn push(&mut self, bus: &mut impl Bus, value: u8) {
        bus.write(0x0100 + u16::from(self.sp), value);
        self.sp = self.sp.wrapping_sub(1);
    }

    fn pop(&mut self, bus: &mut impl Bus) -> u8 {
        self.sp = self.sp.wrapping_add(1);
        bus.read(0x0100 + u16::from(self.sp))
    }

    fn push16(&mut self, bus: &mut impl Bus, value: u16) {
        self.push(bus, (value >> 8) as u8);
        self.push(bus, value as u8);
    }

    fn pop16(&mut self, bus: &mut impl Bus) -> u16 {
        let lo = u16::from(self.pop(bus));
        let hi = u16::from(self.pop(bus));
        (hi << 8) | lo
    }

    /// Resolve the operand for `mode`, advancing `pc` past the operand
    /// bytes. Returns the effective address (meaningless for `Acc`/`Imp`),
    /// whether a page boundary was crossed, and whether the operand lives
    /// in the accumulator rather than memory.
    fn resolve_operand(&mut self, bus: &mut impl Bus, mode: AddrMode) -> Operand {
        match mode {
            AddrMode::Acc | AddrMode::Imp => Operand { addr: 0, page_crossed: false, is_acc: true },
            AddrMode::Imm => {
                let addr = self.pc;
                self.pc = self.pc.wrapping_add(1);
                Operand { addr, page_crossed: false, is_acc: false }
            }
            AddrMode::Zp0 => {
                let addr = u16::from(bus.read(self.pc));
                self.pc = self.pc.wrapping_add(1);
                Operand { addr, page_crossed: false, is_acc: false }
            }
            AddrMode::Zpx => {
                let base = bus.read(self.pc);
                self.pc = self.pc.wrapping_add(1);
                let addr = u16::from(base.wrapping_add(self.x));
                Operand { addr, page_crossed: false, is_acc: false }
            }
            AddrMode::Zpy => {
                let base = bus.read(self.pc);
                self.pc = self.pc.wrapping_add(1);
                let addr = u16::from(base.wrapping_add(self.y));
                Operand { addr, page_crossed: false, is_acc: false }
            }
            AddrMode::Abs => {
                let addr = bus.read_u16(self.pc);
                self.pc = self.pc.wrapping_add(2);
                Operand { addr, page_crossed: false, is_acc: false }
            }
            AddrMode::Abx => {
                let base = bus.read_u16(self.pc);
                self.pc = self.pc.wrapping_add(2);
                let addr = base.wrapping_add(u16::from(self.x));
                let page_crossed = (base & 0xFF00) != (addr & 0xFF00);
                Operand { addr, page_crossed, is_acc: false }
            }
            AddrMode::Aby => {
                let base = bus.read_u16(self.pc);
                self.pc = self.pc.wrapping_add(2);
                let addr = base.wrapping_add(u16::from(self.y));
                let page_crossed = (base & 0xFF00) != (addr & 0xFF00);
                Operand { addr, page_crossed, is_acc: false }
            }
            AddrMode::Ind => {
                let ptr = bus.read_u16(self.pc);
                self.pc = self.pc.wrapping_add(2);
                let addr = bus.read_u16_wrap(ptr);
                Operand { addr, page_crossed: false, is_acc: false }
            }
            AddrMode::Izx => {
                let ptr = bus.read(self.pc);
                self.pc = self.pc.wrapping_add(1);
                let ptr = ptr.wrapping_add(self.x);
                let lo = u16::from(bus.read(u16::from(ptr)));
                let hi = u16::from(bus.read(u16::from(ptr.wrapping_add(1))));
                Operand { addr: (hi << 8) | lo, page_crossed: false, is_acc: false }
            }
            AddrMode::Izy => {
                let ptr = bus.read(self.pc);
                self.pc = self.pc.wrapping_add(1);
                let lo = u16::from(bus.read(u16::from(ptr)));
                let hi = u16::from(bus.read(u16::from(ptr.wrapping_add(1))));
                let base = (hi << 8) | lo;
                let addr = base.wrapping_add(u16::from(self.y));
                let page_crossed = (base & 0xFF00) != (addr & 0xFF00);
                Operand { addr, page_crossed, is_acc: false }
            }
            AddrMode::Rel => {
                let offset = bus.read(self.pc) as i8;
                self.pc = self.pc.wrapping_add(1);
                let base = self.pc;
                let addr = base.wrapping_add(offset as u16);
                let page_crossed = (base & 0xFF00) != (addr & 0xFF00);
                Operand { addr, page_crossed, is_acc: false }
            }
        }
    }

    fn read_operand(&self, bus: &mut impl Bus, operand: Operand) -> u8 {
        if operand.is_acc {
            self.a
        } else {
            bus.read(operand.addr)
        }
    }

    fn write_operand(&mut self, bus: &mut impl Bus, operand: Operand, value: u8) {
        if operand.is_acc {
            self.a = value;
        } else {
            bus.write(operand.addr, value);
        }
    }

    fn set_zn(&mut self, value: u8) {
        self.status.set(Status::Z, value == 0);
        self.status.set(Status::N, value & 0x80 != 0);
    }

    fn branch_if(&mut self, taken: bool, operand: Operand) -> u8 {
        if !taken {
            return 0;
        }
        self.pc = operand.addr;
        if operand.page_crossed {
            2
        } else {
            1
        }
    }

    fn compare(&mut self, register: u8, value: u8) {
        let result = register.wrapping_sub(value);
        self.status.set(Status::C, register >= value);
        self.status.set(Status::Z, register == value);
        self.status.set(Status::N, result & 0x80 != 0);
    }

    fn adc(&mut self, value: u8) {
        let carry_in = u16::from(self.status.contains(Status::C));
        let a = u16::from(self.a);
        let sum = a + u16::from(value) + carry_in;
        let result = sum as u8;
        self.status.set(Status::C, sum > 0xFF);
        let overflow = (!(self.a ^ value) & (self.a ^ result) & 0x80) != 0;
        self.status.set(Status::V, overflow);
        self.a = result;
        self.set_zn(self.a);
    }

    /// Execute the decoded operation against its resolved operand. Returns
    /// extra cycles to add beyond the table's base count: 1 for an eligible
    /// read crossing a page boundary, or the branch-specific 0/1/2 bonus.
    fn execute(&mut self, bus: &mut impl Bus, op: Op, operand: Operand) -> u8 {
        match op {
            Op::Lda => {
                self.a = self.read_operand(bus, operand);
                self.set_zn(self.a);
                u8::from(operand.page_crossed)
            }
            Op::Ldx => {
                self.x = self.read_operand(bus, operand);
                self.set_zn(self.x);
                u8::from(operand.page_crossed)
            }
            Op::Ldy => {
                self.y = self.read_operand(bus, operand);
                self.set_zn(self.y);
                u8::from(operand.page_crossed)
            }
            Op::Sta => {
                self.write_operand(bus, operand, self.a);
                0
            }
            Op::Stx => {
                self.write_operand(bus, operand, self.x);
                0
            }
            Op::Sty => {
                self.write_operand(bus, operand, self.y);
                0
            }
            Op::Tax => {
                self.x = self.a;
                self.set_zn(self.x);
                0
            }
            Op::Tay => {
                self.y = self.a;
                self.set_zn(self.y);
                0
            }
            Op::Txa => {
                self.a = self.x;
                self.set_zn(self.a);
                0
            }
            Op::Tya => {
                self.a = self.y;
                self.set_zn(self.a);
                0
            }
            Op::Tsx => {
                self.x = self.sp;
                self.set_zn(self.x);
                0
            }
            Op::Txs => {
                self.sp = self.x;
                0
            }
            Op::Pha => {
                self.push(bus, self.a);
                0
            }
            Op::Php => {
                let byte = self.status.to_stack_byte(true);
                self.push(bus, byte);
                0
            }
            Op::Pla => {
                self.a = self.pop(bus);
                self.set_zn(self.a);
                0
            }
            Op::Plp => {
                let byte = self.pop(bus);
                self.status = Status::from_stack_byte(byte);
                0
            }
            Op::Adc => {
                let value = self.read_operand(bus, operand);
                self.adc(value);
                u8::from(operand.page_crossed)
            }
            Op::Sbc => {
                let value = self.read_operand(bus, operand);
                self.adc(!value);
                u8::from(operand.page_crossed)
            }
            Op::And => {
                let value = self.read_operand(bus, operand);
                self.a &= value;
                self.set_zn(self.a);
                u8::from(operand.page_crossed)
            }
            Op::Ora => {
                let value = self.read_operand(bus, operand);
                self.a |= value;
                self.set_zn(self.a);
                u8::from(operand.page_crossed)
            }
            Op::Eor => {
                let value = self.read_operand(bus, operand);
                self.a ^= value;
                self.set_zn(self.a);
                u8::from(operand.page_crossed)
            }
            Op::Bit => {
                let value = self.read_operand(bus, operand);
                self.status.set(Status::Z, (self.a & value) == 0);
                self.status.set(Status::N, value & 0x80 != 0);
                self.status.set(Status::V, value & 0x40 != 0);
                0
            }
            Op::Cmp => {
                let value = self.read_operand(bus, operand);
                self.compare(self.a, value);
                u8::from(operand.page_crossed)
            }
            Op::Cpx => {
                let value = self.read_operand(bus, operand);
                self.compare(self.x, value);
                0
            }
            Op::Cpy => {
                let value = self.read_operand(bus, operand);
                self.compare(self.y, value);
                0
            }
            Op::Inc => {
                let value = self.read_operand(bus, operand).wrapping_add(1);
                self.write_operand(bus, operand, value);
                self.set_zn(value);
                0
            }
            Op::Dec => {
                let value = self.read_operand(bus, operand).wrapping_sub(1);
                self.write_operand(bus, operand, value);
                self.set_zn(value);
                0
            }
            Op::Inx => {
                self.x = self.x.wrapping_add(1);
                self.set_zn(self.x);
                0
            }
            Op::Iny => {
                self.y = self.y.wrapping_add(1);
                self.set_zn(self.y);
                0
            }
            Op::Dex => {
                self.x = self.x.wrapping_sub(1);
                self.set_zn(self.x);
                0
            }
            Op::Dey => {
                self.y = self.y.wrapping_sub(1);
                self.set_zn(self.y);
                0
            }
            Op::Asl => {
                let value = self.read_operand(bus, operand);
                self.status.set(Status::C, value & 0x80 != 0);
                let result = value << 1;
                self.write_operand(bus, operand, result);
                self.set_zn(result);
                0
            }
            Op::Lsr => {
                let value = self.read_operand(bus, operand);
                self.status.set(Status::C, value & 0x01 != 0);
                let result = value >> 1;
                self.write_operand(bus, operand, result);
                self.set_zn(result);
                0
            }
            Op::Rol => {
                let value = self.read_operand(bus, operand);
                let carry_in = u8::from(self.status.contains(Status::C));
                self.status.set(Status::C, value & 0x80 != 0);
                let result = (value << 1) | carry_in;
                self.write_operand(bus, operand, result);
                self.set_zn(result);
                0
            }
            Op::Ror => {
                let value = self.read_operand(bus, operand);
                let carry_in = u8::from(self.status.contains(Status::C));
                self.status.set(Status::C, value & 0x01 != 0);
                let result = (value >> 1) | (carry_in << 7);
                self.write_operand(bus, operand, result);
                self.set_zn(result);
                0
            }
            Op::Jmp => {
                self.pc = operand.addr;
                0
            }
            Op::Jsr => {
                let return_addr = self.pc.wrapping_sub(1);
                self.push16(bus, return_addr);
                self.pc = operand.addr;
                0
            }
            Op::Rts => {
                self.pc = self.pop16(bus).wrapping_add(1);
                0
            }
            Op::Brk => {
                self.pc = self.pc.wrapping_add(1);
                self.service_interrupt(bus, vectors::IRQ, true);
                0
            }
            Op::Rti => {
                let byte = self.pop(bus);
                self.status = Status::from_stack_byte(byte);
                self.pc = self.pop16(bus);
                0
            }
            Op::Bcc => self.branch_if(!self.status.contains(Status::C), operand),
            Op::Bcs => self.branch_if(self.status.contains(Status::C), operand),
            Op::Beq => self.branch_if(self.status.contains(Status::Z), operand),
            Op::Bne => self.branch_if(!self.status.contains(Status::Z), operand),
            Op::Bmi => self.branch_if(self.status.contains(Status::N), operand),
            Op::Bpl => self.branch_if(!self.status.contains(Status::N), operand),
            Op::Bvc => self.branch_if(!self.status.contains(Status::V), operand),
            Op::Bvs => self.branch_if(self.status.contains(Status::V), operand),
            Op::Clc => {
                self.status.remove(Status::C);
                0
            }
            Op::Sec => {
                self.status.insert(Status::C);
                0
            }
            Op::Cli => {
                self.status.remove(Status::I);
                0
            }
            Op::Sei => {
                self.status.insert(Status::I);
                0
            }
            Op::Cld => {
                self.status.remove(Status::D);
                0
            }
            Op::Sed => {
                self.status.insert(Status::D);
                0
            }
            Op::Clv => {
                self.status.remove(Status::V);
                0
            }
            Op::Nop | Op::Xxx => 0,
        }
    }
}

/// A resolved operand: either an effective address in memory or the
/// accumulator, plus whether resolving it crossed a page boundary.
#[derive(Debug, Clone, Copy)]
struct Operand {
    addr: u16,
    page_crossed: bool,
    is_acc: bool,
}
