pub const BITS_PER_BYTE: usize = 8;
pub const MAX_INT_WIDTH: usize = u64::BITS as usize;

/// Characters ignored between digits when parsing textual bit strings.
pub const BIT_SEPARATORS: &[char] = &['_', ','];
