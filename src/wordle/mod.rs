mod bench;
mod cache;
mod color;
mod data;
mod game;
mod index;
mod select;
pub mod prelude;

pub use bench::*;
pub use cache::*;
pub use color::*;
pub use data::*;
pub use game::*;
pub use index::*;
pub use prelude::*;
pub use select::*;
