//! Settings and fixed layout names.
//!
//! All ambient environment variables are read once, here, into an explicit
//! [`Settings`] value that gets passed into components. Nothing else in the
//! crate reads the environment ad hoc, which keeps the prober, selector, and
//! executor pure functions of their inputs.

use std::path::{Path, PathBuf};

/// Name of the package being built and installed.
pub const PACKAGE_NAME: &str = "netsim";

/// Fixed name of the managed virtual-environment root, created under the
/// source root.
pub const VENV_DIR: &str = "netsim-venv";

/// Native helper source file, relative to the source root.
pub const HELPER_SOURCE: &str = "nsexec.c";

/// Native helper executable, produced at the source root.
pub const HELPER_BINARY: &str = "nsexec";

/// Entry point used for the version query, relative to the source root.
pub const VERSION_ENTRY_POINT: &str = "bin/netsim";

/// Doxygen configuration file, relative to the source root.
pub const DOXYGEN_CONFIG: &str = "doc/doxygen.cfg";

/// Directory doxygen writes API docs into, relative to the source root.
pub const API_DOC_DIR: &str = "doc/html";

/// An executable that gets a man page, plus the one-line description
/// help2man embeds in the page header.
#[derive(Debug, Clone, Copy)]
pub struct ManPageEntry {
    /// Page name (`<name>.1` at the source root).
    pub name: &'static str,
    /// Executable path relative to the source root.
    pub path: &'static str,
    /// One-line description for the page header.
    pub blurb: &'static str,
}

/// Executables that get man pages.
pub const MAN_PAGES: &[ManPageEntry] = &[
    ManPageEntry {
        name: "netsim",
        path: "bin/netsim",
        blurb: "create and run network emulation experiments",
    },
    ManPageEntry {
        name: "nsexec",
        path: "nsexec",
        blurb: "execution helper for network namespaces",
    },
];

/// Configuration gathered from the environment at startup.
#[derive(Debug, Clone)]
pub struct Settings {
    /// Scripting interpreter driving the package manager (`PYTHON`).
    pub python: PathBuf,
    /// Install prefix root (`PREFIX`, default `/usr/local`).
    pub prefix: PathBuf,
    /// Binary directory override (`BINDIR`, default `<prefix>/bin`).
    pub bindir: Option<PathBuf>,
    /// Man page directory override (`MANDIR`, default
    /// `<prefix>/share/man/man1`).
    pub mandir: Option<PathBuf>,
    /// C compiler for the native helper (`CC`, default `cc`).
    pub cc: String,
    /// Compiler flags for the native helper (`CFLAGS`, whitespace-split).
    pub cflags: Vec<String>,
}

impl Settings {
    /// Read settings from the actual process environment.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Read settings with a custom variable lookup function.
    ///
    /// This allows testing without modifying actual environment variables.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let python = lookup("PYTHON")
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from("python3"));
        let prefix = lookup("PREFIX")
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from("/usr/local"));
        let bindir = lookup("BINDIR").map(PathBuf::from);
        let mandir = lookup("MANDIR").map(PathBuf::from);
        let cc = lookup("CC").unwrap_or_else(|| "cc".to_string());
        let cflags = lookup("CFLAGS")
            .map(|flags| flags.split_whitespace().map(String::from).collect())
            .unwrap_or_else(|| vec!["-Wall".to_string(), "-Wextra".to_string()]);

        Self {
            python,
            prefix,
            bindir,
            mandir,
            cc,
            cflags,
        }
    }

    /// Effective binary install directory.
    pub fn bindir(&self) -> PathBuf {
        self.bindir
            .clone()
            .unwrap_or_else(|| self.prefix.join("bin"))
    }

    /// Effective man page install directory.
    pub fn mandir(&self) -> PathBuf {
        self.mandir
            .clone()
            .unwrap_or_else(|| self.prefix.join("share/man/man1"))
    }

    /// The interpreter path as a display/invocation string.
    pub fn python_str(&self) -> String {
        self.python.display().to_string()
    }
}

/// Managed venv root for a given source root.
pub fn venv_root(source_root: &Path) -> PathBuf {
    source_root.join(VENV_DIR)
}
