/// Inverts one row of interleaved 8-bit samples in place.
///
/// Every byte is complemented (`255 - value`), alpha channels
/// included: a fully opaque pixel comes out fully transparent.
/// Applying the transform twice restores the original bytes.
pub fn invert_row(row: &mut [u8]) {
    for byte in row {
        *byte = 255 - *byte;
    }
}
