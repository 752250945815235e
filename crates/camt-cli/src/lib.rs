//! Command-line front end for CAMT.053 field normalization.

pub mod cli;
pub mod commands;
pub mod logging;
