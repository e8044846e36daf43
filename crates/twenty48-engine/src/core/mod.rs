pub use self::{board::*, direction::*, rank::*};

pub(crate) mod board;
pub(crate) mod direction;
pub(crate) mod rank;
