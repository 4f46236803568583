use std::process::Command;

/// Exports GIT_VERSION for `mediaview --version`.
///
/// Tagged builds report `1.2.3-N-gHASH[-dirty]`, untagged checkouts report
/// `0.0.0-gHASH`, and source tarballs without git fall back to the crate version.
fn main() {
    println!("cargo:rerun-if-changed=.git/HEAD");
    println!("cargo:rerun-if-changed=.git/refs");

    let version = describe().unwrap_or_else(|| env_or("CARGO_PKG_VERSION", "unknown"));
    println!("cargo:rustc-env=GIT_VERSION={version}");
}

fn env_or(key: &str, fallback: &str) -> String {
    std::env::var(key)
        .ok()
        .filter(|v| !v.is_empty())
        .unwrap_or_else(|| fallback.to_string())
}

fn describe() -> Option<String> {
    let output = Command::new("git")
        .args(["describe", "--always", "--long", "--dirty", "--tags", "--match", "v[0-9]*"])
        .output()
        .ok()?;
    if !output.status.success() {
        return None;
    }

    let raw = String::from_utf8(output.stdout).ok()?;
    match raw.trim() {
        "" => None,
        tagged if tagged.starts_with('v') => Some(tagged[1..].to_string()),
        hash => Some(format!("0.0.0-g{hash}")),
    }
}
