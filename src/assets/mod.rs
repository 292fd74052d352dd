//! Uploaded files: naming, MIME filtering and disk storage.

pub mod mime;
pub mod storage;
pub mod types;

pub use mime::MimeAllowList;
pub use storage::{generate_filename, public_url, sanitize_filename, UploadStore};
pub use types::Asset;

const BYTE_UNITS: [&str; 9] = ["Bytes", "KB", "MB", "GB", "TB", "PB", "EB", "ZB", "YB"];

/// Human readable size with up to `decimals` fraction digits, trailing
/// zeros trimmed: `1536` becomes `"1.5 KB"`.
pub fn format_bytes(bytes: u64, decimals: usize) -> String {
    if bytes == 0 {
        return "0 Bytes".to_string();
    }

    let mut exponent = 0;
    let mut scaled = bytes;
    while scaled >= 1024 && exponent < BYTE_UNITS.len() - 1 {
        scaled /= 1024;
        exponent += 1;
    }
    let value = bytes as f64 / 1024f64.powi(exponent as i32);

    let formatted = format!("{:.*}", decimals, value);
    let trimmed = if formatted.contains('.') {
        formatted.trim_end_matches('0').trim_end_matches('.')
    } else {
        formatted.as_str()
    };

    format!("{} {}", trimmed, BYTE_UNITS[exponent])
}
