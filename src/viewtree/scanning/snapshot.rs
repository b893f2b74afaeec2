//! Snapshot codec
//!
//!     A snapshot is the scanner state encoded into a small byte buffer, so a runtime can
//!     store it next to a token and later resume scanning from that token without replaying
//!     the input before it.
//!
//! Layout
//!
//!     byte 0              number of stored levels `n` (1..=255)
//!     bytes 1..1+4n       the levels, bottom first, little-endian u32
//!     byte 1+4n           line-start flag (0 or 1)
//!     byte 2+4n           final-line-break-emitted flag (0 or 1)
//!
//!     The buffer never exceeds [MAX_SNAPSHOT_BYTES]. A stack too tall for it is cut down to its
//!     bottom levels. Decoding rejects anything that is not exactly this shape and falls back to
//!     the initial state.

use super::indent_stack::IndentStack;
use super::scanner::ScannerState;

pub const MAX_SNAPSHOT_BYTES: usize = 1024;

const LEVEL_BYTES: usize = std::mem::size_of::<u32>();
const FLAG_BYTES: usize = 2;
/// The tallest stack a snapshot stores without truncation.
pub const MAX_SNAPSHOT_LEVELS: usize = {
    let fit = (MAX_SNAPSHOT_BYTES - 1 - FLAG_BYTES) / LEVEL_BYTES;
    if fit < u8::MAX as usize {
        fit
    } else {
        u8::MAX as usize
    }
};

/// An encoded scanner state.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Snapshot(Vec<u8>);

impl Snapshot {
    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }

    pub fn into_bytes(self) -> Vec<u8> {
        self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl From<Vec<u8>> for Snapshot {
    fn from(bytes: Vec<u8>) -> Self {
        Snapshot(bytes)
    }
}

impl AsRef<[u8]> for Snapshot {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}

pub fn serialize(state: &ScannerState) -> Snapshot {
    let levels = state.stack.levels();
    let stored = &levels[..levels.len().min(MAX_SNAPSHOT_LEVELS)];

    let mut bytes = Vec::with_capacity(1 + stored.len() * LEVEL_BYTES + FLAG_BYTES);
    bytes.push(stored.len() as u8);
    for level in stored {
        bytes.extend_from_slice(&level.to_le_bytes());
    }
    bytes.push(u8::from(state.at_line_start));
    bytes.push(u8::from(state.emitted_final_line_break));
    Snapshot(bytes)
}

/// Decode a snapshot into a state whose stack holds at most `capacity` levels.
///
/// Malformed input (wrong length, unordered levels, flags other than 0 or 1) yields
/// [ScannerState::initial]. Empty input is how a runtime asks for the initial state.
pub fn deserialize(bytes: &[u8], capacity: usize) -> ScannerState {
    decode(bytes, capacity).unwrap_or_else(|| ScannerState::initial(capacity))
}

fn decode(bytes: &[u8], capacity: usize) -> Option<ScannerState> {
    let (&count, rest) = bytes.split_first()?;
    let count = count as usize;
    if count == 0 || rest.len() != count * LEVEL_BYTES + FLAG_BYTES {
        return None;
    }

    let (level_bytes, flags) = rest.split_at(count * LEVEL_BYTES);
    let levels = level_bytes
        .chunks_exact(LEVEL_BYTES)
        .map(|chunk| {
            let mut word = [0u8; LEVEL_BYTES];
            word.copy_from_slice(chunk);
            u32::from_le_bytes(word)
        })
        .collect();
    let stack = IndentStack::from_levels(levels, capacity)?;

    Some(ScannerState {
        stack,
        at_line_start: decode_flag(flags[0])?,
        emitted_final_line_break: decode_flag(flags[1])?,
    })
}

fn decode_flag(byte: u8) -> Option<bool> {
    match byte {
        0 => Some(false),
        1 => Some(true),
        _ => None,
    }
}
