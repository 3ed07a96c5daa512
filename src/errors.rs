use crate::address::AddressError;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("invalid value {value:?} for {field}: {reason}")]
pub struct FieldError {
    pub field: &'static str,
    pub value: String,
    pub reason: AddressError,
}

/// Every field that failed validation, in the order fields are read.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("invalid environment configuration: {}", display_errors(.errors))]
pub struct ValidationError {
    pub errors: Vec<FieldError>,
}

impl ValidationError {
    pub fn fields(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.errors.iter().map(|error| error.field)
    }
}

fn display_errors(errors: &[FieldError]) -> String {
    errors
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}

/// Value that cannot be written as a single `KEY=value` line.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("value of {field} cannot be written as an env line: contains {character:?}")]
pub struct EnvLineError {
    pub field: &'static str,
    pub character: char,
}
