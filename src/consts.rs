//! Format constants (tags, special element codes, compression codes).
//!
//! All multi-byte integers in an HDF4 file are big-endian.

// -------- Tags --------
pub const DFTAG_NULL: u16 = 1;
pub const DFTAG_VERSION: u16 = 30;
/// Compressed special element payload (target of a compressed extension).
pub const DFTAG_COMPRESSED: u16 = 40;
pub const DFTAG_CHUNK: u16 = 61;
pub const DFTAG_NT: u16 = 106;
pub const DFTAG_SDD: u16 = 701;
pub const DFTAG_SD: u16 = 702;
pub const DFTAG_NDG: u16 = 720;
pub const DFTAG_VH: u16 = 1962;
pub const DFTAG_VS: u16 = 1963;
pub const DFTAG_VG: u16 = 1965;

/// Bit set on the tag of a special (extended) element in a DD entry.
pub const SPECIAL_TAG_BIT: u16 = 0x4000;

// -------- Special element (extension) codes --------
pub const SPECIAL_LINKED: u16 = 1;
pub const SPECIAL_EXT: u16 = 2;
pub const SPECIAL_COMP: u16 = 3;
pub const SPECIAL_VLINKED: u16 = 4;
pub const SPECIAL_CHUNKED: u16 = 5;

// -------- Compression codes --------
pub const COMP_CODE_NONE: u16 = 0;
pub const COMP_CODE_RLE: u16 = 1;
pub const COMP_CODE_NBIT: u16 = 2;
pub const COMP_CODE_SKPHUFF: u16 = 3;
pub const COMP_CODE_DEFLATE: u16 = 4;
pub const COMP_CODE_SZIP: u16 = 5;

/// Human-readable name of a (base) tag, for diagnostics.
pub fn tag_name(tag: u16) -> &'static str {
    match tag & !SPECIAL_TAG_BIT {
        DFTAG_NULL => "DFTAG_NULL",
        DFTAG_VERSION => "DFTAG_VERSION",
        DFTAG_COMPRESSED => "DFTAG_COMPRESSED",
        DFTAG_CHUNK => "DFTAG_CHUNK",
        DFTAG_NT => "DFTAG_NT",
        DFTAG_SDD => "DFTAG_SDD",
        DFTAG_SD => "DFTAG_SD",
        DFTAG_NDG => "DFTAG_NDG",
        DFTAG_VH => "DFTAG_VH",
        DFTAG_VS => "DFTAG_VS",
        DFTAG_VG => "DFTAG_VG",
        _ => "unknown",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tag_names_ignore_special_bit() {
        assert_eq!(tag_name(DFTAG_COMPRESSED), "DFTAG_COMPRESSED");
        assert_eq!(tag_name(SPECIAL_TAG_BIT | DFTAG_SD), "DFTAG_SD");
        assert_eq!(tag_name(0x7fff), "unknown");
    }
}
