//! Scripts for building, deploying & verifying the PrivateDoc contract.

#![deny(missing_docs)]
#![deny(clippy::missing_docs_in_private_items)]

pub mod artifacts;
pub mod cli;
pub mod commands;
pub mod constants;
pub mod deployments;
pub mod errors;
pub mod purge;
pub mod utils;
