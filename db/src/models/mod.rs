mod answer;
mod player;
mod question;
mod quiz;
mod room;

pub use self::answer::*;
pub use self::player::*;
pub use self::question::*;
pub use self::quiz::*;
pub use self::room::*;
