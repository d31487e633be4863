mod ready;

pub use self::ready::*;
