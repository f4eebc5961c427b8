//! Build script for songpt.
//!
//! Copies the `.env.example` template into the user's local data directory so
//! the configuration example sits next to the `.env` file that
//! `config::load_env` reads.

use std::{env, fs, path::PathBuf};

/// Copies `.env.example` from the crate root to `<data_local_dir>/songpt/`.
///
/// Missing templates and unwritable data directories only produce cargo
/// warnings; they never fail the build.
///
/// # Destination
///
/// - Linux: `~/.local/share/songpt/.env.example`
/// - macOS: `~/Library/Application Support/songpt/.env.example`
/// - Windows: `%LOCALAPPDATA%/songpt/.env.example`
fn main() -> Result<(), Box<dyn std::error::Error>> {
    println!("cargo:rerun-if-changed=.env.example");

    let manifest_dir = PathBuf::from(env::var("CARGO_MANIFEST_DIR")?);
    let env_example_path = manifest_dir.join(".env.example");

    if !env_example_path.is_file() {
        println!(
            "cargo:warning=.env.example not found at {}",
            env_example_path.display()
        );
        return Ok(());
    }

    let mut out_dir = dirs::data_local_dir().unwrap_or_else(|| PathBuf::from("."));
    out_dir.push("songpt");

    let copied = fs::create_dir_all(&out_dir).and_then(|_| {
        let contents = fs::read_to_string(&env_example_path)?;
        fs::write(out_dir.join(".env.example"), contents)
    });

    if let Err(e) = copied {
        println!(
            "cargo:warning=could not copy .env.example to {}: {}",
            out_dir.display(),
            e
        );
    }

    Ok(())
}
