//! Common test utilities and helpers
//!
//! Shared fixtures for the CLI integration tests: a temporary solution
//! directory and descriptor templates.

use std::path::PathBuf;
use std::process::{Command, Output};
use tempfile::TempDir;

/// Test solution context in a temporary directory
pub struct TestSolution {
    /// Temporary directory holding the solution
    pub dir: TempDir,
}

impl TestSolution {
    /// Create an empty solution directory
    pub fn new() -> Self {
        Self {
            dir: TempDir::new().expect("Failed to create temp directory"),
        }
    }

    /// Path to the solution directory
    pub fn path(&self) -> PathBuf {
        self.dir.path().to_path_buf()
    }

    /// Create a file under the solution directory
    pub fn create_file(&self, name: &str, content: &str) {
        let path = self.dir.path().join(name);
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).expect("Failed to create parent directories");
        }
        std::fs::write(path, content).expect("Failed to write file");
    }

    /// Create a directory under the solution directory
    pub fn create_dir(&self, name: &str) {
        std::fs::create_dir_all(self.dir.path().join(name)).expect("Failed to create directory");
    }

    /// Whether a path exists under the solution directory
    pub fn exists(&self, name: &str) -> bool {
        self.dir.path().join(name).exists()
    }

    /// Run the crossforge binary in the solution directory
    pub fn run(&self, args: &[&str]) -> Output {
        let mut cmd = Command::new(env!("CARGO_BIN_EXE_crossforge"));
        cmd.current_dir(self.path());
        cmd.args(args);
        cmd.output().expect("Failed to execute crossforge")
    }
}

impl Default for TestSolution {
    fn default() -> Self {
        Self::new()
    }
}

/// Write a minimal two-project solution (App executable referencing the
/// Utils static library) with buildable C sources
#[allow(dead_code)]
pub fn write_app_utils_solution(solution: &TestSolution) {
    solution.create_file(
        "crossforge.toml",
        "[solution]\nname = \"demo\"\nprojects = [\"utils\", \"app\"]\n",
    );

    solution.create_file(
        "utils/project.toml",
        r#"
[project]
name = "Utils"
type = "static-library"
languages = ["c"]
sources = ["add.c"]
public-includes = ["."]
"#,
    );
    solution.create_file("utils/add.h", "int add(int a, int b);\n");
    solution.create_file("utils/add.c", "#include \"add.h\"\nint add(int a, int b) { return a + b; }\n");

    solution.create_file(
        "app/project.toml",
        r#"
[project]
name = "App"
type = "executable"
languages = ["c"]
sources = ["main.c"]
references = ["Utils"]
includes = ["../utils"]
"#,
    );
    solution.create_file(
        "app/main.c",
        "#include \"add.h\"\nint main(void) { return add(1, 2) == 3 ? 0 : 1; }\n",
    );
}

/// Whether the host gcc toolchain is available for end-to-end builds
#[allow(dead_code)]
pub fn host_gcc_available() -> bool {
    Command::new("gcc")
        .arg("--version")
        .output()
        .map(|o| o.status.success())
        .unwrap_or(false)
}
