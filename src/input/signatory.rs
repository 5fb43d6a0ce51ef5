//! Signing officer details carried through to the printed estimate

use base64::{engine::general_purpose::STANDARD, Engine as _};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

use super::error::InputError;

/// Officer name and signature image; neither affects the calculation
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Signatory {
    pub officer_name: Option<String>,
    /// `data:<mime>;base64,<payload>` URL
    pub signature: Option<String>,
}

impl Signatory {
    pub fn new(officer_name: Option<String>) -> Self {
        Self {
            officer_name: officer_name
                .map(|name| name.trim().to_string())
                .filter(|name| !name.is_empty()),
            signature: None,
        }
    }

    /// Read a signature image from disk and keep it as a data URL
    pub fn load_signature<P: AsRef<Path>>(&mut self, path: P) -> Result<(), InputError> {
        let path = path.as_ref();
        let bytes = fs::read(path).map_err(|source| InputError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        self.signature = Some(signature_data_url(mime_for(path), &bytes));
        Ok(())
    }

    pub fn has_signature(&self) -> bool {
        self.signature.is_some()
    }
}

/// Encode image bytes as a base64 data URL
pub fn signature_data_url(mime: &str, bytes: &[u8]) -> String {
    format!("data:{};base64,{}", mime, STANDARD.encode(bytes))
}

fn mime_for(path: &Path) -> &'static str {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_ascii_lowercase());

    match ext.as_deref() {
        Some("png") => "image/png",
        Some("jpg") | Some("jpeg") => "image/jpeg",
        Some("gif") => "image/gif",
        Some("webp") => "image/webp",
        Some("svg") => "image/svg+xml",
        _ => "application/octet-stream",
    }
}
