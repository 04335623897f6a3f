use std::fs::{self, File};
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};

use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use serde::Serialize;
use shardgen_core::GenError;

/// PEM payload line width.
const PEM_LINE_LEN: usize = 64;

/// One output file. Any file already present at the path is replaced.
#[derive(Debug)]
pub struct FileHandler {
    path: PathBuf,
    writer: BufWriter<File>,
}

impl FileHandler {
    pub fn new(output_directory: &Path, file_name: &str) -> Result<Self, GenError> {
        let path = output_directory.join(file_name);
        match fs::remove_file(&path) {
            Ok(()) => {}
            Err(e) if e.kind() == io::ErrorKind::NotFound => {}
            Err(e) => return Err(e.into()),
        }
        let file = File::create(&path)?;

        Ok(Self {
            path,
            writer: BufWriter::new(file),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Write `data` as pretty-printed JSON.
    pub fn write_object_in_file<T: Serialize + ?Sized>(&mut self, data: &T) -> Result<(), GenError> {
        serde_json::to_writer_pretty(&mut self.writer, data)?;
        self.writer.flush()?;
        Ok(())
    }

    /// Append a PEM block labelled `PRIVATE KEY for <identifier>` whose
    /// payload is the hex form of `sk_bytes`.
    pub fn save_sk_to_pem_file(&mut self, identifier: &str, sk_bytes: &[u8]) -> Result<(), GenError> {
        let block = encode_pem(&format!("PRIVATE KEY for {identifier}"), hex::encode(sk_bytes).as_bytes());
        self.writer.write_all(block.as_bytes())?;
        self.writer.flush()?;
        Ok(())
    }
}

fn encode_pem(label: &str, payload: &[u8]) -> String {
    let encoded = STANDARD.encode(payload);
    let mut out = format!("-----BEGIN {label}-----\n");
    for chunk in encoded.as_bytes().chunks(PEM_LINE_LEN) {
        // base64 output is ASCII
        out.push_str(&String::from_utf8_lossy(chunk));
        out.push('\n');
    }
    out.push_str(&format!("-----END {label}-----\n"));
    out
}
