use alloc::string::String;
use thiserror::Error;

#[derive(Error, Debug, Copy, Clone, PartialEq, Eq)]
pub enum GameError {
    #[error("No card at that position")]
    InvalidCardIndex,
    #[error("Flip duration must be between 350 and 3000 ms, it has been set to 350 ms")]
    InvalidFlipDuration,
}

pub type Result<T> = core::result::Result<T, GameError>;

/// Failures of the currency converter, the display text is what the user gets to see.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConverterError {
    #[error("Could not load currencies.")]
    FetchCurrencies,
    #[error("Could not convert currency.")]
    Convert,
    #[error("Error performing conversion.")]
    InvalidAmount,
    #[error("Error performing conversion.")]
    UnknownCurrency(String),
    #[error("Error performing conversion.")]
    MissingRate(String),
}
