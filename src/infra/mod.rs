//! Infrastructure layer (filesystem, external tool processes)

pub mod filesystem;
pub mod toolchain;
