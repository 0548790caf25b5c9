/// Minutes relative to midnight of the service day. Negative values reach
/// into the previous evening, values past 1440 into the following morning.
pub type Mtime = i32;
