//! Text decoding helpers for raw export bytes.

use std::borrow::Cow;

// ============================================================================
// Character Encoding
// ============================================================================

/// Decode bytes to a string, handling the encodings seen in real exports.
///
/// 1. Tries UTF-8 first (BOM handled by encoding_rs)
/// 2. If malformed, tries the hint encoding (from the XML declaration)
/// 3. Falls back to Windows-1252, common in exports assembled from older
///    authoring tools (superset of ISO-8859-1)
///
/// Uses `Cow<str>` to avoid allocation when the input is already valid UTF-8.
pub(crate) fn decode_text<'a>(bytes: &'a [u8], hint_encoding: Option<&str>) -> Cow<'a, str> {
    let (result, _encoding, malformed) = encoding_rs::UTF_8.decode(bytes);
    if !malformed {
        return result;
    }

    if let Some(name) = hint_encoding
        && let Some(encoding) = encoding_rs::Encoding::for_label(name.as_bytes())
    {
        let (result, _, _) = encoding.decode(bytes);
        return result;
    }

    let (result, _, _) = encoding_rs::WINDOWS_1252.decode(bytes);
    result
}

/// Extract the encoding name from an XML declaration, if present.
///
/// Looks for `<?xml ... encoding="..." ?>` within the first ~100 bytes.
pub(crate) fn extract_xml_encoding(bytes: &[u8]) -> Option<&str> {
    let check_len = bytes.len().min(100);
    let prefix = &bytes[..check_len];

    let xml_start = prefix.windows(5).position(|w| w == b"<?xml")?;
    let after_xml = &prefix[xml_start..];

    let enc_pos = after_xml
        .windows(9)
        .position(|w| w.eq_ignore_ascii_case(b"encoding="))?;
    let after_enc = &after_xml[enc_pos + 9..];

    let quote = *after_enc.first()?;
    if quote != b'"' && quote != b'\'' {
        return None;
    }

    let value_end = after_enc[1..].iter().position(|&b| b == quote)? + 1;
    std::str::from_utf8(&after_enc[1..value_end]).ok()
}
