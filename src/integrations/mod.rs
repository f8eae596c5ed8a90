//! External service integrations.

pub mod notion_client {
    pub use crate::notion_client::*;
}

pub mod telegram_client {
    pub use crate::telegram_client::*;
}

pub mod notification {
    pub use crate::notification::*;
}
