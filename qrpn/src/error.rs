/******************************************************************************
 * Copyright ContinuousC. Licensed under the "Elastic License 2.0".           *
 ******************************************************************************/

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Every fallible operation in this crate returns one of these. None of
/// them carry enough state to reconstruct the failing input; callers that
/// need that should keep the token around themselves.
#[derive(Error, Serialize, Deserialize, PartialEq, Eq, Clone, Debug)]
pub enum QrpnError {
    #[error("unrecognized token: {0}")]
    TokenUnrecognized(String),
    #[error("not enough values on the stack")]
    NotEnoughStack,
    #[error("stack would overflow")]
    TooMuchStack,
    #[error("inconsistent units")]
    InconsistentUnits,
    #[error("argument must be an integer")]
    MustBeInteger,
    #[error("argument must be unitless")]
    MustBeUnitless,
    #[error("argument must be real")]
    MustBeReal,
    #[error("argument must be nonnegative")]
    MustBeNonnegative,
    #[error("operation would produce a non-integer dimension")]
    RationalNotImplemented,
    #[error("domain error")]
    Domain,
    #[error("dimension exponent overflow")]
    DimensionOverflow,
    #[error("unmatched control statement")]
    UnmatchedControlStatement,
    #[error("literal cannot be represented exactly")]
    InexactLiteral,
}

/// Short human-readable string for a result code, mirroring the source's
/// `qrpn_strerror`.
pub fn strerror(err: &QrpnError) -> &'static str {
    match err {
        QrpnError::TokenUnrecognized(_) => "unrecognized",
        QrpnError::NotEnoughStack => "not enough args",
        QrpnError::TooMuchStack => "insufficient stack space",
        QrpnError::InconsistentUnits => "inconsistent units",
        QrpnError::MustBeInteger => "arg must be integer",
        QrpnError::MustBeUnitless => "arg must be unitless",
        QrpnError::MustBeReal => "arg must be real-valued",
        QrpnError::MustBeNonnegative => "arg must be nonnegative",
        QrpnError::RationalNotImplemented => "noninteger units",
        QrpnError::Domain => "domain error",
        QrpnError::DimensionOverflow => "dimension overflow",
        QrpnError::UnmatchedControlStatement => "unmatched control statement",
        QrpnError::InexactLiteral => "unrepresentable literal",
    }
}
