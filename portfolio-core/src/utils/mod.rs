pub mod ids;
pub mod time;

pub use self::ids::new_message_id;
pub use self::time::{format_timestamp, now_millis, parse_timestamp};
