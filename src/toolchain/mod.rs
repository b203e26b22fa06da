//! Strongly-typed toolchain identifiers
//!
//! The set of supported toolchains is closed. Its declaration order is the
//! canonical order used everywhere a deterministic sequence is needed
//! (evidence listings, registry rows, reports).

#[macro_use]
pub mod id_enum_macro;

pub mod toolchain_id;

pub use toolchain_id::ToolchainId;
