//! BOM-aware text decoding for JSON documents.
//!
//! Windows editors commonly prefix config files with a byte-order mark.
//! A UTF-8 BOM is stripped; UTF-16 LE/BE BOMs select the matching decoder.
//! Input without a BOM must be strict UTF-8.

use encoding_rs::Encoding;
use std::borrow::Cow;
use std::io;

/// Decode `bytes` into text, dropping any leading byte-order mark.
pub fn decode_text(bytes: &[u8]) -> io::Result<String> {
    if let Some((encoding, bom_len)) = Encoding::for_bom(bytes) {
        tracing::debug!(encoding = encoding.name(), "stripping byte-order mark");
        return encoding
            .decode_without_bom_handling_and_without_replacement(&bytes[bom_len..])
            .map(Cow::into_owned)
            .ok_or_else(|| invalid_data(encoding.name()));
    }

    std::str::from_utf8(bytes).map(str::to_string).map_err(|_| invalid_data("UTF-8"))
}

fn invalid_data(encoding: &str) -> io::Error {
    io::Error::new(io::ErrorKind::InvalidData, format!("content is not valid {encoding}"))
}
