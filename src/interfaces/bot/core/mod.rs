pub mod sessions;

pub use sessions::{ConversationKey, ConversationRegistry};
