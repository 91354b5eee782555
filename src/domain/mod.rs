pub mod channel;

pub use channel::{ChannelLink, ChannelRecord};
