//! Whole-stream and file-level encrypt/decrypt.
//!
//! Encryption puts the encoder on the output side (plain bytes -> units -> shifted
//! units -> bytes); decryption puts the decoder on the input side. Either way only the
//! fixed transfer buffers are held in memory.

use anyhow::{Context, Result};
use std::fs::File;
use std::io::{self, BufReader, BufWriter, Read, Write};
use std::path::Path;

use super::{copy_units, CaesarDecoder, CaesarEncoder, CipherKey, UnitWrite, Utf16Reader, Utf16Writer};

/// Encrypt all text from `reader` into `writer`. Returns the number of units written.
pub fn encrypt_stream<R: Read, W: Write>(reader: R, writer: W, key: CipherKey) -> io::Result<u64> {
    let mut source = Utf16Reader::new(reader);
    let mut sink = CaesarEncoder::new(Utf16Writer::new(writer), key);
    let n = copy_units(&mut source, &mut sink)?;
    sink.flush()?;
    Ok(n)
}

/// Decrypt all text from `reader` into `writer`. Returns the number of units written.
pub fn decrypt_stream<R: Read, W: Write>(reader: R, writer: W, key: CipherKey) -> io::Result<u64> {
    let mut source = CaesarDecoder::new(Utf16Reader::new(reader), key);
    let mut sink = Utf16Writer::new(writer);
    let n = copy_units(&mut source, &mut sink)?;
    sink.flush()?;
    Ok(n)
}

fn open_pair(input: &Path, output: &Path) -> Result<(BufReader<File>, BufWriter<File>)> {
    let reader = File::open(input).with_context(|| format!("open {}", input.display()))?;
    let writer = File::create(output).with_context(|| format!("create {}", output.display()))?;
    Ok((BufReader::new(reader), BufWriter::new(writer)))
}

/// Encrypt the text file `input` into `output` with `key`.
pub fn encrypt_file(input: &Path, output: &Path, key: CipherKey) -> Result<u64> {
    let (reader, writer) = open_pair(input, output)?;
    let n = encrypt_stream(reader, writer, key)
        .with_context(|| format!("encrypt {} -> {}", input.display(), output.display()))?;
    tracing::info!(
        input = %input.display(),
        output = %output.display(),
        units = n,
        "encrypted file"
    );
    Ok(n)
}

/// Decrypt `input` (written by [`encrypt_file`]) into `output` with `key`.
pub fn decrypt_file(input: &Path, output: &Path, key: CipherKey) -> Result<u64> {
    let (reader, writer) = open_pair(input, output)?;
    let n = decrypt_stream(reader, writer, key)
        .with_context(|| format!("decrypt {} -> {}", input.display(), output.display()))?;
    tracing::info!(
        input = %input.display(),
        output = %output.display(),
        units = n,
        "decrypted file"
    );
    Ok(n)
}

/// Read a file as code units and render it as a `String`, replacing lone surrogates
/// with U+FFFD. Used to display cipher output.
pub fn read_text_lossy(path: &Path) -> Result<String> {
    let file = File::open(path).with_context(|| format!("open {}", path.display()))?;
    let mut source = Utf16Reader::new(BufReader::new(file));
    let mut units = Vec::new();
    copy_units(&mut source, &mut units).with_context(|| format!("read {}", path.display()))?;
    Ok(String::from_utf16_lossy(&units))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    const SAMPLE: &str = "Перший рядок\nДругий рядок з кількома словами в ньому\nОдин\n";

    #[test]
    fn stream_round_trip_restores_bytes() {
        let key = CipherKey::from_char('K');
        let mut cipher = Vec::new();
        let n = encrypt_stream(SAMPLE.as_bytes(), &mut cipher, key).unwrap();
        assert_eq!(n as usize, SAMPLE.encode_utf16().count());
        assert_ne!(cipher, SAMPLE.as_bytes());

        let mut plain = Vec::new();
        decrypt_stream(&cipher[..], &mut plain, key).unwrap();
        assert_eq!(plain, SAMPLE.as_bytes());
    }

    #[test]
    fn ab_with_k_encrypts_to_shifted_units() {
        let mut cipher = Vec::new();
        encrypt_stream(&b"AB"[..], &mut cipher, CipherKey::from_char('K')).unwrap();
        let expected: String = [char::from(140u8), char::from(141u8)].iter().collect();
        assert_eq!(cipher, expected.as_bytes());
    }

    #[test]
    fn keys_that_produce_surrogates_still_round_trip() {
        // 'A' + 0xD7BF = 0xD800, a lone lead surrogate in the cipher text.
        let key = CipherKey::new(0xD7BF);
        let text = "AAA \u{1F600} zzz";
        let mut cipher = Vec::new();
        encrypt_stream(text.as_bytes(), &mut cipher, key).unwrap();
        let mut plain = Vec::new();
        decrypt_stream(&cipher[..], &mut plain, key).unwrap();
        assert_eq!(plain, text.as_bytes());
    }

    #[test]
    fn file_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("input.txt");
        let encrypted = dir.path().join("encrypted.txt");
        let decrypted = dir.path().join("decrypted.txt");
        fs::write(&input, SAMPLE).unwrap();

        let key = CipherKey::from_char('K');
        encrypt_file(&input, &encrypted, key).unwrap();
        decrypt_file(&encrypted, &decrypted, key).unwrap();

        assert_eq!(fs::read_to_string(&decrypted).unwrap(), SAMPLE);
        let shown = read_text_lossy(&encrypted).unwrap();
        assert_eq!(shown.chars().count(), SAMPLE.chars().count());
        assert_ne!(shown, SAMPLE);
    }

    #[test]
    fn empty_file_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("empty.txt");
        let encrypted = dir.path().join("empty.enc");
        fs::write(&input, "").unwrap();
        assert_eq!(encrypt_file(&input, &encrypted, CipherKey::new(9)).unwrap(), 0);
        assert_eq!(fs::read(&encrypted).unwrap(), Vec::<u8>::new());
    }

    #[test]
    fn missing_input_names_path() {
        let dir = tempfile::tempdir().unwrap();
        let err = encrypt_file(
            &dir.path().join("missing.txt"),
            &dir.path().join("out.txt"),
            CipherKey::new(1),
        )
        .unwrap_err();
        assert!(format!("{:#}", err).contains("missing.txt"));
    }

    #[test]
    fn wrong_key_does_not_restore_text() {
        let mut cipher = Vec::new();
        encrypt_stream(&b"hello"[..], &mut cipher, CipherKey::new(5)).unwrap();
        let mut plain = Vec::new();
        decrypt_stream(&cipher[..], &mut plain, CipherKey::new(6)).unwrap();
        assert_ne!(plain, b"hello");
    }
}
