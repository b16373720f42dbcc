use std::ops::RangeInclusive;

pub const ROW_BYTES: usize = 16;
pub const PRINTABLE: RangeInclusive<u8> = 0x20..=0x7e;
pub const PLACEHOLDER: char = '~';
pub const ASCII_LABEL: &str = "ASCII:";
