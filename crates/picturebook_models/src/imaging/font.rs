//! 3x5 bitmap digits.

/// Glyph width in cells.
pub(crate) const GLYPH_WIDTH: u32 = 3;
/// Glyph height in cells.
pub(crate) const GLYPH_HEIGHT: u32 = 5;

/// One row per entry, most significant of the low three bits is the left cell.
const DIGITS: [[u8; 5]; 10] = [
    [0b111, 0b101, 0b101, 0b101, 0b111],
    [0b010, 0b110, 0b010, 0b010, 0b111],
    [0b111, 0b001, 0b111, 0b100, 0b111],
    [0b111, 0b001, 0b111, 0b001, 0b111],
    [0b101, 0b101, 0b111, 0b001, 0b001],
    [0b111, 0b100, 0b111, 0b001, 0b111],
    [0b111, 0b100, 0b111, 0b101, 0b111],
    [0b111, 0b001, 0b010, 0b010, 0b010],
    [0b111, 0b101, 0b111, 0b101, 0b111],
    [0b111, 0b101, 0b111, 0b001, 0b111],
];

/// Lit cells `(column, row)` of a decimal digit, or `None` for anything else.
pub(crate) fn digit_cells(c: char) -> Option<impl Iterator<Item = (u32, u32)>> {
    let rows = DIGITS[c.to_digit(10)? as usize];
    Some((0..GLYPH_HEIGHT).flat_map(move |row| {
        (0..GLYPH_WIDTH).filter_map(move |col| {
            let bit = (rows[row as usize] >> (GLYPH_WIDTH - 1 - col)) & 1;
            (bit == 1).then_some((col, row))
        })
    }))
}
