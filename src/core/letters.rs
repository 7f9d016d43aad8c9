//! Column letter encoding (bijective base-26: A..Z, AA..AZ, BA.., no zero digit)

/// Convert a 1-based column position to its letters
///
/// Examples:
/// - 1 → A
/// - 26 → Z
/// - 27 → AA
/// - 53 → BA
///
/// Position 0 has no letters and yields an empty string.
pub fn position_to_letters(position: u32) -> String {
    let mut letters = Vec::new();
    let mut remaining = position;

    while remaining > 0 {
        let digit = (remaining - 1) % 26;
        letters.push(b'A' + digit as u8);
        remaining = (remaining - digit - 1) / 26;
    }

    letters.reverse();
    String::from_utf8(letters).unwrap_or_default()
}

/// Convert column letters back to a 1-based position
///
/// Returns `None` for empty input, anything outside `A..=Z`, or overflow.
pub fn letters_to_position(letters: &str) -> Option<u32> {
    if letters.is_empty() {
        return None;
    }

    letters.bytes().try_fold(0u32, |acc, byte| {
        if !byte.is_ascii_uppercase() {
            return None;
        }
        acc.checked_mul(26)?.checked_add(u32::from(byte - b'A') + 1)
    })
}
