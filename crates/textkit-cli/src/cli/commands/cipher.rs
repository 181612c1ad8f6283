//! Encrypt/decrypt commands.

use anyhow::Result;
use std::path::Path;
use textkit_core::cipher::{self, CipherKey};

pub fn run_encrypt(input: &Path, output: &Path, key: char) -> Result<()> {
    let units = cipher::encrypt_file(input, output, CipherKey::from_char(key))?;
    println!("encrypted {} units: {} -> {}", units, input.display(), output.display());
    Ok(())
}

pub fn run_decrypt(input: &Path, output: &Path, key: char) -> Result<()> {
    let units = cipher::decrypt_file(input, output, CipherKey::from_char(key))?;
    println!("decrypted {} units: {} -> {}", units, input.display(), output.display());
    Ok(())
}
