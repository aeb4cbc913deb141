/// Command handlers
pub mod init;
pub mod reconcile;

pub use init::InitCommand;
pub use reconcile::ReconcileCommand;
