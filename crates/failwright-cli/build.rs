//! Build script: render the CLI manual page into `OUT_DIR` and capture
//! build metadata for the `--version` report.

use std::{env, fs, path::PathBuf, process::Command};

use clap::CommandFactory;
use clap_mangen::Man;
use time::{OffsetDateTime, format_description::well_known::Iso8601};

#[path = "src/cli.rs"]
mod cli;

const FALLBACK_DATE: &str = "1970-01-01";

fn main() -> Result<(), Box<dyn std::error::Error>> {
    println!("cargo:rerun-if-changed=src/cli.rs");
    println!("cargo:rerun-if-changed=build.rs");
    println!("cargo:rerun-if-env-changed=SOURCE_DATE_EPOCH");
    println!("cargo:rerun-if-env-changed=CARGO_PKG_VERSION");

    emit_build_metadata();

    let cmd = cli::Cli::command();
    let binary_name = env::var("CARGO_BIN_NAME").unwrap_or_else(|_| cmd.get_name().to_owned());
    let version = env::var("CARGO_PKG_VERSION").map_err(
        |_| "CARGO_PKG_VERSION must be set by Cargo; cannot render manual page without it.",
    )?;

    let man = Man::new(cmd)
        .section("1")
        .source(format!("{binary_name} {version}"))
        .date(manual_date());
    let mut buf = Vec::new();
    man.render(&mut buf)?;

    let out_dir = env::var_os("OUT_DIR")
        .map(PathBuf::from)
        .ok_or("OUT_DIR must be set by Cargo")?;
    fs::write(out_dir.join(format!("{binary_name}.1")), buf)?;
    Ok(())
}

/// Manual page date from `SOURCE_DATE_EPOCH`, with a reproducible fallback.
fn manual_date() -> String {
    let Ok(raw) = env::var("SOURCE_DATE_EPOCH") else {
        return FALLBACK_DATE.into();
    };
    let formatted = raw
        .parse::<i64>()
        .ok()
        .and_then(|timestamp| OffsetDateTime::from_unix_timestamp(timestamp).ok())
        .and_then(|value| value.format(&Iso8601::DATE).ok());
    formatted.unwrap_or_else(|| {
        println!(
            "cargo:warning=Invalid SOURCE_DATE_EPOCH '{raw}'; falling back to {FALLBACK_DATE}"
        );
        FALLBACK_DATE.into()
    })
}

fn emit_build_metadata() {
    if let Some(sha) = command_output("git", &["rev-parse", "--short", "HEAD"]) {
        println!("cargo:rustc-env=FAILWRIGHT_GIT_SHA={sha}");
    }
    let rustc = env::var("RUSTC").unwrap_or_else(|_| String::from("rustc"));
    if let Some(version) = command_output(&rustc, &["--version"]) {
        println!("cargo:rustc-env=FAILWRIGHT_RUSTC_VERSION={version}");
    }
}

fn command_output(program: &str, args: &[&str]) -> Option<String> {
    let output = Command::new(program).args(args).output().ok()?;
    if !output.status.success() {
        return None;
    }
    let text = String::from_utf8(output.stdout).ok()?;
    let trimmed = text.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_owned())
}
