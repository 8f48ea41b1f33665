//! Default configuration values

/// Solution descriptor file name
pub const SOLUTION_MANIFEST: &str = "crossforge.toml";

/// Project descriptor file name
pub const PROJECT_MANIFEST: &str = "project.toml";

/// Default build output directory name (overridable per project)
pub const DEFAULT_BUILD_DIR: &str = "build";

/// Object file subdirectory under the output root
pub const OBJ_DIR: &str = "obj";

/// Binary subdirectory under the output root
pub const BIN_DIR: &str = "bin";

/// Source extensions dispatched to the compiler
pub const C_EXTENSIONS: &[&str] = &["c"];

/// C++ source extensions dispatched to the compiler
pub const CPP_EXTENSIONS: &[&str] = &["cpp", "cc", "cxx"];
