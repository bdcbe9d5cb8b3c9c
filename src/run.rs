use std::fmt;
use std::fs;
use std::path::Path;
use std::str::FromStr;

use log::trace;
use num_bigint::BigInt;
use num_traits::{ToPrimitive, Zero};

use crate::error::{Error, Result};
use crate::input::InputQueue;
use crate::mem::{self, Memory};
use crate::mode::Mode;
use crate::op::{Context, Flow, Op, Param};
use crate::parse_program;

/// The state of the computer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Status {
    /// Ready to execute the next instruction.
    Ready,
    /// Waiting for input.
    Waiting,
    /// Program execution has finished.
    Complete,
}

/// The outcome of executing a single instruction.
enum Step {
    Continue,
    Wait,
    Halt,
}

/// An Intcode computer.
///
/// Constructed once from a program, then driven cooperatively: [`run`]
/// executes instructions until the program halts or blocks on input, in
/// which case the caller can [`enqueue`] more values and call [`run`] again
/// to resume from the same instruction.
///
/// [`run`]: Computer::run
/// [`enqueue`]: Computer::enqueue
pub struct Computer {
    mem: Memory,
    ptr: usize,
    relative_base: BigInt,
    input: InputQueue,
    output: Box<dyn FnMut(BigInt)>,
    status: Status,
}

fn default_output() -> Box<dyn FnMut(BigInt)> {
    Box::new(|value| println!("{}", value))
}

impl Computer {
    pub fn new(program: Vec<BigInt>) -> Self {
        Self {
            mem: Memory::new(program),
            ptr: 0,
            relative_base: BigInt::zero(),
            input: InputQueue::new(),
            output: default_output(),
            status: Status::Ready,
        }
    }

    /// Constructs a computer from a file containing program text.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        fs::read_to_string(path)?.parse()
    }

    pub fn status(&self) -> Status {
        self.status
    }

    /// Whether the computer is blocked waiting for input.
    pub fn is_waiting(&self) -> bool {
        self.status == Status::Waiting
    }

    /// Whether the program has halted.
    pub fn is_complete(&self) -> bool {
        self.status == Status::Complete
    }

    /// Returns the value in memory at the given address.
    pub fn read(&self, addr: i64) -> Result<BigInt> {
        Ok(self.mem.read(mem::addr(&BigInt::from(addr))?))
    }

    /// Stores a value in memory at the given address.
    ///
    /// Typically used to patch a program before running it.
    pub fn write(&mut self, addr: i64, value: impl Into<BigInt>) -> Result<()> {
        self.mem.write(mem::addr(&BigInt::from(addr))?, value.into());
        Ok(())
    }

    /// Queues a sequence of input values, which may be unbounded.
    pub fn enqueue<I, T>(&mut self, values: I)
    where
        I: IntoIterator<Item = T>,
        I::IntoIter: 'static,
        T: Into<BigInt> + 'static,
    {
        self.input.enqueue(values);
    }

    /// Replaces the output callback.
    pub fn set_output(&mut self, output: impl FnMut(BigInt) + 'static) {
        self.output = Box::new(output);
    }

    /// Restores the default output callback, which prints each value to
    /// stdout on its own line.
    pub fn reset_output(&mut self) {
        self.output = default_output();
    }

    /// Restores the computer to its initial state.
    ///
    /// Memory is reset to the original program, pending input is discarded,
    /// and the pointer and relative base are zeroed. The output callback is
    /// left untouched so that a program can be re-run with the same
    /// observation hook attached.
    pub fn reset(&mut self) {
        self.mem.reset();
        self.input.clear();
        self.relative_base = BigInt::zero();
        self.ptr = 0;
        self.status = Status::Ready;
    }

    /// Decodes and executes the instruction at the current pointer.
    fn step(&mut self) -> Result<Step> {
        let instr = self.mem.read(self.ptr);
        // A valid instruction has at most two opcode digits and one mode
        // digit per parameter, so anything outside `i64` cannot decode.
        let code = instr.to_i64().ok_or_else(|| Error::UnknownOpcode {
            opcode: instr.clone(),
        })?;
        let op = Op::from_value(code % 100).ok_or(Error::UnknownOpcode { opcode: instr })?;

        let params: Vec<Param> = (0..op.params())
            .map(|i| {
                let mode = code / 10i64.pow(i as u32 + 2) % 10;
                let mode = Mode::from_value(mode).ok_or(Error::UnknownMode { mode })?;
                let raw = self.mem.read(self.ptr + 1 + i);
                Ok(Param { mode, raw })
            })
            .collect::<Result<_>>()?;

        let mut cx = Context {
            mem: &mut self.mem,
            relative_base: &mut self.relative_base,
            input: &mut self.input,
            output: &mut *self.output,
        };
        Ok(match op.execute(&mut cx, &params)? {
            Flow::Advance => {
                self.ptr += op.params() + 1;
                Step::Continue
            }
            Flow::Jump(ptr) => {
                self.ptr = ptr;
                Step::Continue
            }
            Flow::Wait => Step::Wait,
            Flow::Halt => Step::Halt,
        })
    }

    /// Executes instructions until the program halts or blocks on input.
    ///
    /// Blocking on input does not advance the pointer, so the same input
    /// instruction is retried on the next call. Once the program has halted
    /// this returns immediately.
    ///
    /// Only opcode 99 halts the program. A jump to a negative address
    /// fails with [`Error::AddressOutOfRange`], like any other negative
    /// memory access.
    pub fn run(&mut self) -> Result<()> {
        if self.status == Status::Complete {
            return Ok(());
        }
        self.status = Status::Ready;
        loop {
            match self.step()? {
                Step::Continue => {}
                Step::Wait => {
                    trace!("waiting for input at `{}`", self.ptr);
                    self.status = Status::Waiting;
                    break Ok(());
                }
                Step::Halt => {
                    trace!("halted");
                    self.status = Status::Complete;
                    break Ok(());
                }
            }
        }
    }
}

impl FromStr for Computer {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Ok(Self::new(parse_program(s)?))
    }
}

impl fmt::Debug for Computer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Computer")
            .field("mem", &self.mem)
            .field("ptr", &self.ptr)
            .field("relative_base", &self.relative_base)
            .field("input", &self.input)
            .field("status", &self.status)
            .finish_non_exhaustive()
    }
}
