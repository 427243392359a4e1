/******************************************************************************
 * Copyright ContinuousC. Licensed under the "Elastic License 2.0".           *
 ******************************************************************************/

//! Token classification: literals (numbers, DMS angles, ISO-8601 dates,
//! reserved atoms) and compound unit expressions.

pub mod literal;
pub mod unit;
