//! Hermetic sandbox for driving the `quoter` binary from tests.
//!
//! - Points `HOME` at a private directory so the default config and ledger
//!   (`~/.quoter/...`) never touch the real user's files
//! - Clears `QUOTER_*` and `RUST_LOG` from the inherited environment
//! - Runs cargo binaries with the sandbox root as working directory
//!
//! Everything lives under an `assert_fs::TempDir` and is cleaned up on drop.
//!
//! ## Quick example
//! ```no_run
//! use quoter_test_utils::sandbox::Sandbox;
//!
//! let sb = Sandbox::new();
//! sb.run("quoter", ["init"]).unwrap();
//! assert!(sb.default_ledger().exists());
//! ```

use assert_fs::fixture::PathChild;
use assert_fs::TempDir;
use duct::Expression;
use std::collections::HashMap;
use std::ffi::OsStr;
use std::fs;
use std::path::{Path, PathBuf};
use std::process::Output;

pub struct Sandbox {
    root: TempDir,
    pub home: PathBuf,
    env: HashMap<String, String>,
}

impl Default for Sandbox {
    fn default() -> Self {
        Self::new()
    }
}

impl Sandbox {
    /// Create a new sandbox; all state is under an auto-cleaned TempDir.
    pub fn new() -> Self {
        let root = TempDir::new().expect("create sandbox TempDir");
        let home = root.child("home").to_path_buf();
        fs::create_dir_all(&home).expect("create home dir");

        Self {
            root,
            home,
            env: HashMap::new(),
        }
    }

    /// Absolute path to the sandbox root.
    pub fn root_path(&self) -> &Path {
        self.root.path()
    }

    /// Where `quoter` keeps its ledger when nothing overrides it.
    pub fn default_ledger(&self) -> PathBuf {
        self.home.join(".quoter/quotes.csv")
    }

    /// Write/overwrite a file relative to the sandbox root.
    pub fn write<P: AsRef<Path>, S: AsRef<[u8]>>(&mut self, rel: P, contents: S) -> &mut Self {
        let p = self.root_path().join(rel);
        if let Some(parent) = p.parent() {
            fs::create_dir_all(parent).expect("create parent dir");
        }
        fs::write(p, contents).expect("write file");
        self
    }

    /// Read a file relative to the sandbox root.
    pub fn read<P: AsRef<Path>>(&self, rel: P) -> String {
        fs::read_to_string(self.root_path().join(rel)).expect("read file")
    }

    /// Set an extra environment variable for every command run afterwards.
    pub fn env<K: Into<String>, V: Into<String>>(&mut self, key: K, value: V) -> &mut Self {
        self.env.insert(key.into(), value.into());
        self
    }

    /// Build a `duct::Expression` for a cargo binary, pre-wired with the sandbox env.
    pub fn cmd<I>(&self, program: &str, args: I) -> Expression
    where
        I: IntoIterator,
        I::Item: AsRef<OsStr>,
    {
        let cargo_bin_path = assert_cmd::cargo::cargo_bin(program)
            .to_string_lossy()
            .to_string();
        let args: Vec<_> = args
            .into_iter()
            .map(|arg| arg.as_ref().to_string_lossy().to_string())
            .collect();

        let expr = duct::cmd(&cargo_bin_path, args).dir(self.root_path());
        self.inject_env(expr)
    }

    /// Run a cargo binary and return stdout. Errors if the process exits with non-zero status.
    pub fn run<I>(&self, program: &str, args: I) -> Result<String, String>
    where
        I: IntoIterator,
        I::Item: AsRef<OsStr>,
    {
        self.cmd(program, args)
            .read()
            .map_err(|e| format!("command failed: {e}"))
    }

    /// Run a cargo binary and capture stdout, stderr and exit status without
    /// failing on a non-zero exit.
    pub fn output<I>(&self, program: &str, args: I) -> Output
    where
        I: IntoIterator,
        I::Item: AsRef<OsStr>,
    {
        self.cmd(program, args)
            .stdout_capture()
            .stderr_capture()
            .unchecked()
            .run()
            .expect("spawn command")
    }

    fn inject_env(&self, mut expr: Expression) -> Expression {
        let mut env_map: HashMap<String, String> = HashMap::new();
        if let Ok(path) = std::env::var("PATH") {
            env_map.insert("PATH".into(), path);
        }
        env_map.insert("HOME".into(), self.home.to_string_lossy().into_owned());
        env_map.insert(
            "XDG_CONFIG_HOME".into(),
            self.home.to_string_lossy().into_owned(),
        );
        env_map.insert("NO_COLOR".into(), "1".into());
        env_map.extend(self.env.clone());

        expr = expr.full_env(&env_map);

        expr
    }
}
