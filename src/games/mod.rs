mod session_rng;

pub mod color_blocks;
pub mod grid;
pub mod snake;

pub use grid::QuadraticGrid;
pub use session_rng::SessionRng;
