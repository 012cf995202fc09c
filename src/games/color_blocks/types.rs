pub const MIN_FIELD_DIMENSION: usize = 3;
pub const DEFAULT_PALETTE_SIZE: u8 = 5;
pub const DEFAULT_MIN_GROUP_SIZE: usize = 1;

/// Contents of one board cell. Colors are indices into whatever ordered
/// palette the render layer maps them to; a cleared cell never becomes
/// colored again until a full new game.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum Block {
    Untaken,
    Color(u8),
}

impl Block {
    pub fn is_taken(&self) -> bool {
        matches!(self, Block::Color(_))
    }
}
