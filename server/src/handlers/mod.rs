mod room_snapshot;

pub use self::room_snapshot::*;
