use std::path::PathBuf;
use tempfile::TempDir;

/// Temporary directory holding scenario and config files for one test
pub struct TestContext {
    pub temp_dir: TempDir,
}

impl TestContext {
    pub fn new() -> Result<Self, std::io::Error> {
        let temp_dir = TempDir::new()?;
        Ok(TestContext { temp_dir })
    }

    pub fn temp_path(&self) -> PathBuf {
        self.temp_dir.path().to_path_buf()
    }

    /// Write `content` to `name` inside the temporary directory
    pub fn create_file(&self, name: &str, content: &str) -> Result<PathBuf, std::io::Error> {
        let file_path = self.temp_path().join(name);
        std::fs::write(&file_path, content)?;
        Ok(file_path)
    }
}

impl Default for TestContext {
    fn default() -> Self {
        Self::new().expect("Failed to create test context")
    }
}

/// The callmap command with colors disabled and no inherited log filter
#[allow(deprecated)]
pub fn cmd() -> assert_cmd::Command {
    let mut cmd =
        assert_cmd::Command::cargo_bin("callmap").expect("Failed to find callmap binary");
    cmd.env("NO_COLOR", "1").env_remove("RUST_LOG");
    cmd
}

/// Path of a scenario shipped in the repository's scenarios/ directory
pub fn bundled_scenario(name: &str) -> String {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("scenarios")
        .join(name)
        .to_string_lossy()
        .into_owned()
}

/// A scenario whose second step expects the wrong value
pub fn failing_scenario() -> &'static str {
    r#"
[target]
name = "Clock"
members = [{ name = "now" }]

[calls.now]
sequence = [1, 2]

[[steps]]
member = "now"
expect = 1

[[steps]]
member = "now"
expect = 3
"#
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_context_creation() {
        let ctx = TestContext::new().expect("Failed to create test context");
        assert!(ctx.temp_path().exists());
    }

    #[test]
    fn test_bundled_scenarios_exist() {
        assert!(std::path::Path::new(&bundled_scenario("greeter.toml")).exists());
        assert!(std::path::Path::new(&bundled_scenario("repository.toml")).exists());
    }
}
