//! An Intcode virtual machine.
//!
//! Programs are comma-separated lists of arbitrary-precision integers. The
//! [`Computer`] executes them cooperatively: [`run`][Computer::run] advances
//! execution until the program halts or blocks waiting for input, at which
//! point control returns to the caller, who can queue more input and resume.
//! Output is delivered synchronously through a replaceable callback.
//!
//! ```no_run
//! use intcode::Computer;
//!
//! # fn main() -> intcode::Result<()> {
//! let mut c: Computer = "3,9,8,9,10,9,4,9,99,-1,8".parse()?;
//! c.set_output(|value| println!("got {}", value));
//! c.enqueue([8]);
//! c.run()?;
//! assert!(c.is_complete());
//! # Ok(())
//! # }
//! ```

mod error;
mod input;
mod mem;
mod mode;
mod op;
mod run;

pub use num_bigint::BigInt;

pub use crate::error::{Error, Result};
pub use crate::input::InputQueue;
pub use crate::mem::Memory;
pub use crate::mode::Mode;
pub use crate::op::Op;
pub use crate::run::{Computer, Status};

/// Parses program text into a list of values.
pub fn parse_program(input: &str) -> Result<Vec<BigInt>> {
    let input = input.trim();
    if input.is_empty() {
        return Err(Error::Empty);
    }
    input
        .split(',')
        .map(|token| {
            token.parse().map_err(|_| Error::Parse {
                token: token.to_owned(),
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_program_basic() {
        let program = parse_program("109,-1,99\n").unwrap();
        let expected: Vec<_> = [109, -1, 99].iter().map(|&v| BigInt::from(v)).collect();
        assert_eq!(program, expected);
    }

    #[test]
    fn parse_program_huge_values() {
        let program = parse_program("104,1125899906842624123456789,99").unwrap();
        assert_eq!(
            program[1],
            "1125899906842624123456789".parse::<BigInt>().unwrap()
        );
    }

    #[test]
    fn parse_program_empty() {
        assert!(matches!(parse_program(""), Err(Error::Empty)));
        assert!(matches!(parse_program("  \n "), Err(Error::Empty)));
    }

    #[test]
    fn parse_program_invalid_token() {
        assert!(matches!(
            parse_program("1,two,3"),
            Err(Error::Parse { token }) if token == "two"
        ));
    }
}
