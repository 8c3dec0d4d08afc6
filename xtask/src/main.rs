//! Custom cargo commands for fastss.
//!
//! Usage:
//!   cargo xtask verify           - Run full verification suite
//!   cargo xtask test             - Run all tests
//!   cargo xtask check            - Quick check (check + test + clippy)
//!   cargo xtask bench            - Run benchmarks
//!   cargo xtask kani             - Run Kani proofs
//!   cargo xtask fuzz <target>    - Run one fuzz target for 60 seconds

use anyhow::{bail, Context, Result};
use std::env;
use std::path::{Path, PathBuf};
use std::process::Command;

const FUZZ_TARGETS: &[&str] = &["index_parsing", "distance_agreement", "index_queries"];

fn main() -> Result<()> {
    let mut args = env::args().skip(1);
    let task = args.next();
    match task.as_deref() {
        Some("verify") => verify()?,
        Some("test") => test()?,
        Some("check") => check()?,
        Some("bench") => bench()?,
        Some("kani") => kani()?,
        Some("fuzz") => fuzz(args.next().as_deref(), args.next().as_deref())?,
        _ => print_help(),
    }
    Ok(())
}

fn print_help() {
    eprintln!(
        r#"
cargo xtask <COMMAND>

Commands:
  verify            Run full verification suite (tests + clippy + Kani + constant alignment)
  test              Run all Rust tests
  check             Quick check (cargo check + test + clippy)
  bench             Run benchmarks
  kani              Run Kani proofs only
  fuzz <target> [s] Run a fuzz target for s seconds (default 60)

Fuzz targets: {}
"#,
        FUZZ_TARGETS.join(", ")
    );
}

/// Full verification suite
fn verify() -> Result<()> {
    println!("==========================================");
    println!("fastss Verification Suite");
    println!("==========================================\n");

    println!("[1/5] Running Rust tests...");
    run_cargo(&["test", "--quiet"])?;
    println!("✓ All Rust tests passed\n");

    println!("[2/5] Running tests without default features...");
    run_cargo(&["test", "--quiet", "--no-default-features"])?;
    println!("✓ Minimal build passes\n");

    println!("[3/5] Running clippy...");
    run_cargo(&["clippy", "--quiet", "--", "-D", "warnings"])?;
    println!("✓ Clippy passed\n");

    println!("[4/5] Running Kani proofs...");
    kani()?;
    println!("✓ Kani proofs pass\n");

    println!("[5/5] Verifying prefix range constants match the proofs...");
    verify_constants()?;
    println!("✓ Constants aligned\n");

    println!("==========================================");
    println!("✓ ALL VERIFICATION CHECKS PASSED");
    println!("==========================================");
    println!("\nSafe to commit changes.");

    Ok(())
}

/// Run all tests
fn test() -> Result<()> {
    run_cargo(&["test"])
}

/// Quick check
fn check() -> Result<()> {
    println!("Running quick checks...\n");

    println!("[1/3] cargo check...");
    run_cargo(&["check", "--all-targets"])?;

    println!("[2/3] cargo test...");
    run_cargo(&["test", "--quiet"])?;

    println!("[3/3] cargo clippy...");
    run_cargo(&["clippy", "--quiet", "--", "-D", "warnings"])?;

    println!("\n✓ Quick checks passed");
    Ok(())
}

/// Run benchmarks
fn bench() -> Result<()> {
    run_cargo(&["bench"])
}

/// Run the Kani proofs in their standalone crate
fn kani() -> Result<()> {
    let dir = project_root()?.join("kani-proofs");
    let available = Command::new("cargo")
        .args(["kani", "--version"])
        .output()
        .map(|o| o.status.success())
        .unwrap_or(false);
    if !available {
        println!("  (cargo-kani not installed, running the proof crate's unit tests)");
        return run_cargo_in(&dir, &["test", "--quiet"]);
    }
    run_cargo_in(&dir, &["kani"])
}

/// Run one fuzz target with cargo-fuzz
fn fuzz(target: Option<&str>, seconds: Option<&str>) -> Result<()> {
    let Some(target) = target else {
        bail!("missing fuzz target, one of: {}", FUZZ_TARGETS.join(", "));
    };
    if !FUZZ_TARGETS.contains(&target) {
        bail!("unknown fuzz target {target:?}, one of: {}", FUZZ_TARGETS.join(", "));
    }
    let seconds: u64 = seconds
        .unwrap_or("60")
        .parse()
        .context("fuzz duration must be a number of seconds")?;

    let root = project_root()?;
    let max_time = format!("-max_total_time={seconds}");
    run_cargo_in(&root, &["+nightly", "fuzz", "run", target, "--", &max_time])
}

// ============================================================================
// Helper functions
// ============================================================================

fn project_root() -> Result<PathBuf> {
    let manifest_dir = match env::var("CARGO_MANIFEST_DIR") {
        Ok(dir) => PathBuf::from(dir),
        Err(_) => env::current_dir().context("Failed to read current directory")?,
    };

    // xtask is in project_root/xtask, so go up one level
    let root = manifest_dir.parent().unwrap_or(&manifest_dir);
    Ok(root.to_path_buf())
}

fn run_cargo(args: &[&str]) -> Result<()> {
    run_cargo_in(&project_root()?, args)
}

fn run_cargo_in(dir: &Path, args: &[&str]) -> Result<()> {
    let status = Command::new("cargo")
        .args(args)
        .current_dir(dir)
        .status()
        .with_context(|| format!("Failed to run cargo {:?}", args))?;

    if !status.success() {
        bail!("cargo {:?} failed", args);
    }

    Ok(())
}

/// The proof crate carries its own copy of the packing; both must agree.
fn verify_constants() -> Result<()> {
    let root = project_root()?;

    let crate_src = std::fs::read_to_string(root.join("src/index/prefix_range.rs"))
        .context("Failed to read prefix_range.rs")?;
    let proof_src = std::fs::read_to_string(root.join("kani-proofs/src/lib.rs"))
        .context("Failed to read kani-proofs/src/lib.rs")?;

    for name in ["WORD_ID_BITS", "RUN_BITS"] {
        let ours = extract_const(&crate_src, name)
            .with_context(|| format!("{name} not found in prefix_range.rs"))?;
        let theirs = extract_const(&proof_src, name)
            .with_context(|| format!("{name} not found in kani-proofs"))?;
        if ours != theirs {
            bail!("{name}: crate has {ours}, proofs have {theirs}");
        }
        println!("  {name} = {ours}");
    }

    Ok(())
}

fn extract_const(content: &str, name: &str) -> Option<u32> {
    // Look for "pub const NAME: u32 = 23;"
    let prefix = format!("pub const {name}: u32 =");
    content.lines().find_map(|line| {
        let value = line.trim().strip_prefix(&prefix)?;
        value.trim().trim_end_matches(';').trim().parse().ok()
    })
}
