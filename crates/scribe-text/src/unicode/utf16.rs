use crate::error::{Error, Result};

/// Decode UTF-16 code units into Unicode scalar values.
///
/// Fails with [`Error::MalformedInput`] at the code unit index of the first
/// unpaired surrogate.
pub fn decode(units: &[u16]) -> Result<Vec<char>> {
    let mut text = Vec::with_capacity(units.len());
    let mut index = 0;
    for decoded in char::decode_utf16(units.iter().copied()) {
        match decoded {
            Ok(ch) => {
                index += ch.len_utf16();
                text.push(ch);
            }
            Err(_) => return Err(Error::MalformedInput { index }),
        }
    }
    Ok(text)
}

/// Number of UTF-16 code units needed for `text`.
pub fn encoded_len(text: &[char]) -> usize {
    text.iter().map(|ch| ch.len_utf16()).sum()
}

/// Encode Unicode scalar values as UTF-16 code units.
pub fn encode(text: &[char]) -> Vec<u16> {
    let mut units = Vec::with_capacity(encoded_len(text));
    let mut buf = [0u16; 2];
    for ch in text {
        units.extend_from_slice(ch.encode_utf16(&mut buf));
    }
    units
}
