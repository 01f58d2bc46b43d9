//! CLI command implementations.

pub(crate) mod ast;
pub(crate) mod fmt;
pub(crate) mod vet;

pub(crate) use ast::AstArgs;
pub(crate) use fmt::FmtArgs;
pub(crate) use vet::VetArgs;

/// Outcome of a command that ran to completion.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Status {
    Clean,
    /// `vet` found at least one fault.
    Faults,
}
