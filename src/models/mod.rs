pub mod generation;
pub mod media;
pub mod request;

pub use generation::*;
pub use media::*;
pub use request::*;
