use num_bigint::BigInt;
use num_traits::Zero;

use crate::error::{Error, Result};
use crate::input::InputQueue;
use crate::mem::{self, Memory};
use crate::mode::Mode;

/// An instruction type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Op {
    Add,
    Multiply,
    Input,
    Output,
    JumpNonZero,
    JumpZero,
    LessThan,
    Equal,
    AdjustRelativeBase,
    Halt,
}

/// A decoded operand: the raw value and its addressing mode.
#[derive(Debug, Clone)]
pub(crate) struct Param {
    pub mode: Mode,
    pub raw: BigInt,
}

/// What the engine should do once an operation has executed.
#[derive(Debug)]
pub(crate) enum Flow {
    /// Advance the pointer past this instruction.
    Advance,
    /// Jump the pointer to the given address.
    Jump(usize),
    /// No input was available, retry this instruction later.
    Wait,
    /// Program execution has finished.
    Halt,
}

/// The machine state an operation executes against.
pub(crate) struct Context<'a> {
    pub mem: &'a mut Memory,
    pub relative_base: &'a mut BigInt,
    pub input: &'a mut InputQueue,
    pub output: &'a mut dyn FnMut(BigInt),
}

impl Context<'_> {
    fn load(&self, param: &Param) -> Result<BigInt> {
        param.mode.load(self.mem, self.relative_base, &param.raw)
    }

    fn store(&mut self, param: &Param, value: BigInt) -> Result<()> {
        let addr = param.mode.store(self.relative_base, &param.raw)?;
        self.mem.write(addr, value);
        Ok(())
    }
}

impl Op {
    pub fn from_value(v: i64) -> Option<Op> {
        Some(match v {
            1 => Self::Add,
            2 => Self::Multiply,
            3 => Self::Input,
            4 => Self::Output,
            5 => Self::JumpNonZero,
            6 => Self::JumpZero,
            7 => Self::LessThan,
            8 => Self::Equal,
            9 => Self::AdjustRelativeBase,
            99 => Self::Halt,
            _ => return None,
        })
    }

    pub fn value(&self) -> i64 {
        match self {
            Self::Add => 1,
            Self::Multiply => 2,
            Self::Input => 3,
            Self::Output => 4,
            Self::JumpNonZero => 5,
            Self::JumpZero => 6,
            Self::LessThan => 7,
            Self::Equal => 8,
            Self::AdjustRelativeBase => 9,
            Self::Halt => 99,
        }
    }

    pub fn params(&self) -> usize {
        match self {
            Self::Add => 3,
            Self::Multiply => 3,
            Self::Input => 1,
            Self::Output => 1,
            Self::JumpNonZero => 2,
            Self::JumpZero => 2,
            Self::LessThan => 3,
            Self::Equal => 3,
            Self::AdjustRelativeBase => 1,
            Self::Halt => 0,
        }
    }

    /// Executes this operation against the given machine state.
    pub(crate) fn execute(&self, cx: &mut Context, params: &[Param]) -> Result<Flow> {
        // The engine always decodes exactly `params()` operands, anything
        // else is a decoding bug.
        if params.len() != self.params() {
            return Err(Error::ParamCount {
                opcode: self.value(),
                expected: self.params(),
                found: params.len(),
            });
        }
        match self {
            Self::Add => {
                let value = cx.load(&params[0])? + cx.load(&params[1])?;
                cx.store(&params[2], value)?;
                Ok(Flow::Advance)
            }
            Self::Multiply => {
                let value = cx.load(&params[0])? * cx.load(&params[1])?;
                cx.store(&params[2], value)?;
                Ok(Flow::Advance)
            }
            Self::Input => match cx.input.try_next() {
                Some(value) => {
                    cx.store(&params[0], value)?;
                    Ok(Flow::Advance)
                }
                None => Ok(Flow::Wait),
            },
            Self::Output => {
                let value = cx.load(&params[0])?;
                (cx.output)(value);
                Ok(Flow::Advance)
            }
            Self::JumpNonZero => {
                if !cx.load(&params[0])?.is_zero() {
                    Ok(Flow::Jump(mem::addr(&cx.load(&params[1])?)?))
                } else {
                    Ok(Flow::Advance)
                }
            }
            Self::JumpZero => {
                if cx.load(&params[0])?.is_zero() {
                    Ok(Flow::Jump(mem::addr(&cx.load(&params[1])?)?))
                } else {
                    Ok(Flow::Advance)
                }
            }
            Self::LessThan => {
                let value = (cx.load(&params[0])? < cx.load(&params[1])?) as i64;
                cx.store(&params[2], BigInt::from(value))?;
                Ok(Flow::Advance)
            }
            Self::Equal => {
                let value = (cx.load(&params[0])? == cx.load(&params[1])?) as i64;
                cx.store(&params[2], BigInt::from(value))?;
                Ok(Flow::Advance)
            }
            Self::AdjustRelativeBase => {
                let value = cx.load(&params[0])?;
                *cx.relative_base += value;
                Ok(Flow::Advance)
            }
            Self::Halt => Ok(Flow::Halt),
        }
    }
}
