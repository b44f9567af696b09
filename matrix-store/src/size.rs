//! Named edge lengths for generated square matrices.

use std::fmt;
use std::str::FromStr;

use crate::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatrixSize {
    Small,
    Middle,
    Big,
    Custom(usize),
}

impl MatrixSize {
    /// Edge length of the square matrix.
    pub fn edge(self) -> usize {
        match self {
            MatrixSize::Small => 1000,
            MatrixSize::Middle => 5000,
            MatrixSize::Big => 10000,
            MatrixSize::Custom(n) => n,
        }
    }
}

impl FromStr for MatrixSize {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "small" => Ok(MatrixSize::Small),
            "middle" => Ok(MatrixSize::Middle),
            "big" => Ok(MatrixSize::Big),
            other => match other.parse::<usize>() {
                Ok(n) if n > 0 => Ok(MatrixSize::Custom(n)),
                _ => Err(Error::UnknownSize(s.to_string())),
            },
        }
    }
}

impl fmt::Display for MatrixSize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MatrixSize::Small => f.write_str("small"),
            MatrixSize::Middle => f.write_str("middle"),
            MatrixSize::Big => f.write_str("big"),
            MatrixSize::Custom(n) => write!(f, "{n}"),
        }
    }
}
