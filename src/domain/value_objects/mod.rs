pub mod scm_type;
pub mod secret;

pub use scm_type::ScmType;
pub use secret::Secret;
