use std::io;

use num_bigint::BigInt;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

/// Any error produced while parsing or running a program.
#[derive(Debug, Error)]
pub enum Error {
    #[error("empty program")]
    Empty,
    #[error("invalid token `{}`", .token)]
    Parse { token: String },
    #[error("address `{}` is out of range", .addr)]
    AddressOutOfRange { addr: BigInt },
    #[error("unknown opcode `{}`", .opcode)]
    UnknownOpcode { opcode: BigInt },
    #[error("unknown mode `{}`", .mode)]
    UnknownMode { mode: i64 },
    #[error("write through an immediate parameter")]
    WriteToImmediate,
    #[error("opcode `{}` takes {} parameters, found {}", .opcode, .expected, .found)]
    ParamCount {
        opcode: i64,
        expected: usize,
        found: usize,
    },
    #[error(transparent)]
    Io(#[from] io::Error),
}
