//! 14-segment font
//!
//! One glyph per printable ASCII character (`0x20` to `0x7E`). Bit layout
//! matches the HT16K33 quad alphanumeric backpack:
//! ```text
//!  bit:  0 = A, 1 = B, 2 = C, 3 = D, 4 = E, 5 = F,
//!        6 = G1, 7 = G2, 8 = H, 9 = J, 10 = K,
//!        11 = L, 12 = M, 13 = N, 14 = DP
//! ```

/// Decimal point segment
pub const DECIMAL_POINT: u16 = 0x4000;

const FIRST_PRINTABLE: u32 = 0x20;

#[rustfmt::skip]
const GLYPHS: [u16; 95] = [
    0x0000, 0x0006, 0x0220, 0x12CE, 0x12ED, 0x0C24, 0x235D, 0x0400, //  !"#$%&'
    0x2400, 0x0900, 0x3FC0, 0x12C0, 0x0800, 0x00C0, 0x4000, 0x0C00, // ()*+,-./
    0x0C3F, 0x0006, 0x00DB, 0x008F, 0x00E6, 0x2069, 0x00FD, 0x0007, // 01234567
    0x00FF, 0x00EF, 0x1200, 0x0A00, 0x2400, 0x00C8, 0x0900, 0x1083, // 89:;<=>?
    0x02BB, 0x00F7, 0x128F, 0x0039, 0x120F, 0x00F9, 0x0071, 0x00BD, // @ABCDEFG
    0x00F6, 0x1209, 0x001E, 0x2470, 0x0038, 0x0536, 0x2136, 0x003F, // HIJKLMNO
    0x00F3, 0x203F, 0x20F3, 0x00ED, 0x1201, 0x003E, 0x0C30, 0x2836, // PQRSTUVW
    0x2D00, 0x1500, 0x0C09, 0x0039, 0x2100, 0x000F, 0x0C03, 0x0008, // XYZ[\]^_
    0x0100, 0x1058, 0x2078, 0x00D8, 0x088E, 0x0858, 0x0071, 0x048E, // `abcdefg
    0x1070, 0x1000, 0x000E, 0x3600, 0x0030, 0x10D4, 0x1050, 0x00DC, // hijklmno
    0x0170, 0x0486, 0x0050, 0x2088, 0x0078, 0x001C, 0x2004, 0x2814, // pqrstuvw
    0x28C0, 0x200C, 0x0848, 0x0949, 0x1200, 0x2489, 0x0520, // xyz{|}~
];

/// Segment pattern for `ch`; blank for anything unprintable or non-ASCII
pub fn glyph(ch: char) -> u16 {
    (ch as u32)
        .checked_sub(FIRST_PRINTABLE)
        .and_then(|index| GLYPHS.get(index as usize))
        .copied()
        .unwrap_or(0)
}
