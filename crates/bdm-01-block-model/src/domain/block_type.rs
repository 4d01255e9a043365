use std::fmt;

/// One-byte tag written before every serialized block.
///
/// `Invalid` and `NotABlock` are reserved markers used by message carriers;
/// only the five real variants can be decoded into a block.
#[repr(u8)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum BlockType {
    Invalid = 0,
    NotABlock = 1,
    Send = 2,
    Receive = 3,
    Open = 4,
    Change = 5,
    State = 6,
}

impl BlockType {
    pub fn from_u8(value: u8) -> Option<Self> {
        match value {
            0 => Some(BlockType::Invalid),
            1 => Some(BlockType::NotABlock),
            2 => Some(BlockType::Send),
            3 => Some(BlockType::Receive),
            4 => Some(BlockType::Open),
            5 => Some(BlockType::Change),
            6 => Some(BlockType::State),
            _ => None,
        }
    }

    pub fn as_u8(self) -> u8 {
        self as u8
    }

    /// Serialized body size (excluding the tag) for the real block variants.
    pub fn body_size(self) -> Option<usize> {
        match self {
            BlockType::Send => Some(crate::SendBlock::SIZE),
            BlockType::Receive => Some(crate::ReceiveBlock::SIZE),
            BlockType::Open => Some(crate::OpenBlock::SIZE),
            BlockType::Change => Some(crate::ChangeBlock::SIZE),
            BlockType::State => Some(crate::StateBlock::SIZE),
            BlockType::Invalid | BlockType::NotABlock => None,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            BlockType::Invalid => "invalid",
            BlockType::NotABlock => "not_a_block",
            BlockType::Send => "send",
            BlockType::Receive => "receive",
            BlockType::Open => "open",
            BlockType::Change => "change",
            BlockType::State => "state",
        }
    }
}

impl fmt::Display for BlockType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
