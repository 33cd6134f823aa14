#![allow(dead_code)]

use assert_cmd::Command;
use std::path::Path;

pub fn trace_cmd() -> Command {
    let mut cmd = Command::cargo_bin("trace").unwrap();
    cmd.env_remove("TRACE_ROOT");
    cmd.env_remove("TRACE_CLOUD_ROOT");
    cmd.env_remove("RUST_LOG");
    cmd
}

/// Command operating on the journal stored in `root`
pub fn trace_in(root: &Path) -> Command {
    let mut cmd = trace_cmd();
    cmd.env("TRACE_ROOT", root);
    cmd
}

/// Initialize a UTC journal without sample entries
pub fn init_quiet(root: &Path) {
    trace_cmd()
        .arg("init")
        .arg(root)
        .args(["--timezone", "utc", "--seed", "never"])
        .assert()
        .success();
}
