use std::{fmt, io, process};

const DEFAULT_VERSION: &str = "???";

fn main() {
    println!("cargo:rerun-if-changed=.git/HEAD");
    println!("cargo:rustc-env=GIT_HASH={}", git_version());
}

/// Short hash of HEAD, or DEFAULT_VERSION when git is unavailable (tarball builds, etc)
fn git_version() -> String {
    let output = process::Command::new("git")
        .args(&["rev-parse", "--short", "HEAD"])
        .output();

    match read_git_output(output) {
        Some(hash) => hash,
        None => {
            warning(format_args!("unable to determine version... using '{}'", DEFAULT_VERSION));
            DEFAULT_VERSION.to_string()
        }
    }
}

fn read_git_output(output: io::Result<process::Output>) -> Option<String> {
    let output = match output {
        Ok(output) => output,
        Err(err) => {
            warning(format_args!("unable to execute git... {:?}", err));
            return None;
        }
    };

    if !output.status.success() {
        warning(format_args!("git exited with {}", output.status));
        return None;
    }

    // anything on stderr means git complained, even if it exited 0
    let stderr = String::from_utf8_lossy(&output.stderr);
    if !stderr.trim().is_empty() {
        warning(format_args!("{}", stderr.trim()));
        return None;
    }

    let hash = String::from_utf8(output.stdout).ok()?.trim().to_ascii_lowercase();
    if hash.is_empty() {
        None
    } else {
        Some(hash)
    }
}

fn warning(args: fmt::Arguments<'_>) {
    println!("cargo:warning={}", args)
}
