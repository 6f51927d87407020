use thiserror::Error;

use crate::data::Table;

#[derive(Error, Debug)]
#[error("{kind}")]
pub struct Error {
    pub kind: ErrorKind,
}

#[derive(Error, Debug, Clone, PartialEq)]
pub enum ErrorKind {
    #[error("No record with id {id} in table {table}")]
    NotFound { table: Table, id: i64 },
    #[error("Record {id} in table {table} is missing required field `{field}`")]
    MissingField {
        table: Table,
        id: i64,
        field: &'static str,
    },
    #[error("{what} out of range: {value} (expected {min}..={max})")]
    Range {
        what: &'static str,
        value: i64,
        min: i64,
        max: i64,
    },
    #[error("Invalid state: {0}")]
    InvalidState(String),
    #[error("Unsupported operation: {0}")]
    Unsupported(String),
    #[error("Bad configuration in record {id} of table {table}: {detail}")]
    Configuration {
        table: Table,
        id: i64,
        detail: String,
    },
    #[error("Cyclic reference while resolving {kind} {id} (level {level})")]
    CyclicReference {
        kind: &'static str,
        id: i64,
        level: u32,
    },
}

impl ErrorKind {
    /// Checks `value` against an inclusive range, producing a [`ErrorKind::Range`] on failure.
    pub fn check_range(what: &'static str, value: i64, min: i64, max: i64) -> Result<(), Error> {
        if value < min || value > max {
            return Err(failure_from_kind(ErrorKind::Range {
                what,
                value,
                min,
                max,
            }));
        }

        Ok(())
    }
}

impl From<ErrorKind> for Error {
    fn from(kind: ErrorKind) -> Self {
        Error { kind }
    }
}

pub type IResult<T> = Result<T, Error>;

pub fn failure_from_kind(kind: ErrorKind) -> Error {
    Error { kind }
}
