// Thin namespace wrapper for API-layer components
pub mod handlers {
    pub use crate::handlers::*;
}

pub mod reservation_form {
    pub use crate::reservation_form::*;
}
