//! Environment diagnostics for `subclean check`.
//!
//! Verifies the external tools and files a session relies on.

use crate::config::Config;
use crate::pipeline::markers::HallucinationMarkers;
use std::path::Path;
use std::process::Command;

/// Result of a dependency check.
#[derive(Debug, PartialEq)]
pub enum CheckResult {
    /// Tool or file is present and usable
    Ok,
    /// Tool or file is not found
    NotFound,
    /// Present but has issues
    Warning(String),
}

/// Check if a command exists and is executable.
///
/// ffmpeg uses a single-dash `-version`, so the flag is a parameter.
fn check_command(command: &str, version_flag: &str) -> CheckResult {
    match Command::new(command).arg(version_flag).output() {
        Ok(output) if output.status.success() => CheckResult::Ok,
        Ok(_) => CheckResult::Warning(format!("'{}' found but {} failed", command, version_flag)),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => CheckResult::NotFound,
        Err(e) => CheckResult::Warning(format!("Error checking '{}': {}", command, e)),
    }
}

/// Check that the config file, if present, parses and validates.
fn check_config(path: &Path) -> CheckResult {
    if !path.exists() {
        return CheckResult::NotFound;
    }
    match Config::load(path).and_then(|c| c.validate()) {
        Ok(()) => CheckResult::Ok,
        Err(e) => CheckResult::Warning(e.to_string()),
    }
}

/// Check the hallucination marker file named in the config.
fn check_markers(path: Option<&Path>) -> CheckResult {
    let Some(path) = path else {
        return CheckResult::NotFound;
    };
    if !path.is_file() {
        return CheckResult::Warning(format!("{} does not exist", path.display()));
    }
    if HallucinationMarkers::load(Some(path)).is_empty() {
        return CheckResult::Warning(format!("{} contains no markers", path.display()));
    }
    CheckResult::Ok
}

/// Print a report of tools and files used by `subclean run`.
pub fn check_dependencies(config: &Config, config_path: &Path) {
    println!("subclean {}", crate::version_string());
    println!("Checking subclean environment...\n");

    print!("ffmpeg (denoising): ");
    match check_command("ffmpeg", "-version") {
        CheckResult::Ok => println!("✓ OK"),
        CheckResult::NotFound => {
            println!("✗ NOT FOUND");
            println!("  Needed only for --denoise.");
            println!("  Install: sudo apt install ffmpeg  (Debian/Ubuntu)");
            println!("           sudo pacman -S ffmpeg    (Arch)");
        }
        CheckResult::Warning(msg) => println!("⚠ WARNING: {}", msg),
    }

    print!("Config file ({}): ", config_path.display());
    match check_config(config_path) {
        CheckResult::Ok => println!("✓ OK"),
        CheckResult::NotFound => println!("- not present (using defaults)"),
        CheckResult::Warning(msg) => println!("⚠ WARNING: {}", msg),
    }

    print!("Hallucination markers: ");
    let markers_path = config.filter.markers_path.as_deref();
    match check_markers(markers_path) {
        CheckResult::Ok => {
            let count = HallucinationMarkers::load(markers_path).len();
            println!("✓ OK ({} markers)", count);
        }
        CheckResult::NotFound => println!("- none configured"),
        CheckResult::Warning(msg) => println!("⚠ WARNING: {}", msg),
    }

    println!();
    if config.translate.enabled {
        println!(
            "Translation: {} ({} → {})",
            config.translate.url, config.translate.source, config.translate.target
        );
    } else {
        println!("Translation: disabled (enable with --translate <LANG>)");
    }
}
