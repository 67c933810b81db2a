use std::borrow::Cow;
use std::fmt::{self, Display, Formatter};
use std::ops::Deref;
use std::{env, io};

use thiserror::Error;

/// Cheap owned-or-static message payload for [`StrataError`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ErrString(Cow<'static, str>);

impl ErrString {
    pub const fn new_static(s: &'static str) -> Self {
        ErrString(Cow::Borrowed(s))
    }
}

impl<T> From<T> for ErrString
where
    T: Into<Cow<'static, str>>,
{
    fn from(msg: T) -> Self {
        if env::var("STRATA_PANIC_ON_ERR").as_deref().unwrap_or("") == "1" {
            panic!("STRATA_PANIC_ON_ERR set: {}", msg.into())
        } else {
            ErrString(msg.into())
        }
    }
}

impl Deref for ErrString {
    type Target = str;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl Display for ErrString {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        Display::fmt(&self.0, f)
    }
}

#[derive(Debug, Error)]
pub enum StrataError {
    #[error("not found: {0}")]
    ColumnNotFound(ErrString),
    #[error("{0}")]
    ComputeError(ErrString),
    #[error("duplicate: {0}")]
    Duplicate(ErrString),
    #[error("invalid operation: {0}")]
    InvalidOperation(ErrString),
    #[error(transparent)]
    Io(#[from] io::Error),
    #[error("out of bounds: {0}")]
    OutOfBounds(ErrString),
    #[error("data types don't match: {0}")]
    SchemaMismatch(ErrString),
    #[error("lengths don't match: {0}")]
    ShapeMismatch(ErrString),
}

pub type StrataResult<T> = Result<T, StrataError>;

impl StrataError {
    pub fn wrap_msg<F: FnOnce(&str) -> String>(&self, func: F) -> Self {
        use StrataError::*;
        match self {
            ColumnNotFound(msg) => ColumnNotFound(func(msg).into()),
            ComputeError(msg) => ComputeError(func(msg).into()),
            Duplicate(msg) => Duplicate(func(msg).into()),
            InvalidOperation(msg) => InvalidOperation(func(msg).into()),
            Io(err) => ComputeError(func(&format!("{err}")).into()),
            OutOfBounds(msg) => OutOfBounds(func(msg).into()),
            SchemaMismatch(msg) => SchemaMismatch(func(msg).into()),
            ShapeMismatch(msg) => ShapeMismatch(func(msg).into()),
        }
    }
}

#[macro_export]
macro_rules! strata_err {
    ($variant:ident: $fmt:literal $(, $arg:expr)* $(,)?) => {
        $crate::StrataError::$variant(format!($fmt $(, $arg)*).into())
    };
    (oob = $idx:expr, $len:expr) => {
        $crate::strata_err!(
            OutOfBounds: "index {} is out of bounds for length {}", $idx, $len
        )
    };
    (duplicate = $name:expr) => {
        $crate::strata_err!(
            Duplicate: "column with name '{}' already exists", $name
        )
    };
    (col_not_found = $name:expr) => {
        $crate::strata_err!(ColumnNotFound: "column '{}' not found", $name)
    };
}

#[macro_export]
macro_rules! strata_bail {
    ($($tt:tt)+) => {
        return Err($crate::strata_err!($($tt)+))
    };
}

#[macro_export]
macro_rules! strata_ensure {
    ($cond:expr, $($tt:tt)+) => {
        if !$cond {
            $crate::strata_bail!($($tt)+);
        }
    };
}
