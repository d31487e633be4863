mod create;
mod join;
mod quiz;
mod start;
mod status;

pub use self::create::*;
pub use self::join::*;
pub use self::quiz::*;
pub use self::start::*;
pub use self::status::*;
