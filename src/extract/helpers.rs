use quick_xml::encoding::Decoder;
use quick_xml::events::BytesStart;

use super::ExtractError;

/// Element name of a start or self-closing tag
pub(super) fn element_name(e: &BytesStart) -> Result<String, ExtractError> {
    Ok(std::str::from_utf8(e.name().as_ref())?.to_string())
}

/// All attributes of a tag, decoded and unescaped, in document order
pub(super) fn attributes(
    e: &BytesStart,
    decoder: Decoder,
) -> Result<Vec<(String, String)>, ExtractError> {
    let mut out = Vec::new();
    for attr in e.attributes() {
        let attr = attr?;
        let key = std::str::from_utf8(attr.key.as_ref())?.to_string();
        let value = attr.decode_and_unescape_value(decoder)?.into_owned();
        out.push((key, value));
    }
    Ok(out)
}

/// True if `text` consists only of XML whitespace (space, tab, CR, LF)
pub(super) fn is_xml_whitespace(text: &str) -> bool {
    text.bytes().all(|b| matches!(b, b' ' | b'\t' | b'\r' | b'\n'))
}
