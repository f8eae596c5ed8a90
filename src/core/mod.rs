// Domain-layer modules and shared errors/models
pub mod field_policy {
    pub use crate::field_policy::*;
}

pub mod models {
    pub use crate::models::*;
}

pub mod submission {
    pub use crate::submission::*;
}

pub mod timestamps {
    pub use crate::timestamps::*;
}

pub mod errors {
    pub use crate::errors::*;
}
