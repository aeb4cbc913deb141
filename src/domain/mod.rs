/// Domain layer: the entities exchanged with GitLab and the scanning service.
pub mod entities;
pub mod value_objects;
