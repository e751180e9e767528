pub mod appender;
pub mod piece;

pub use self::appender::*;
pub use self::piece::*;
