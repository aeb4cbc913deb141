pub mod reconcile;

pub use reconcile::{ReconcileConfig, ReconcileError, ReconcileReport, ReconcileUseCase};
