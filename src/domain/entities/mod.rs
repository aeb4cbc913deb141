pub mod group;
pub mod scm_config;

pub use group::Group;
pub use scm_config::{ConfigId, NewScmConfig, ScmConfig, ScmConfigList};
