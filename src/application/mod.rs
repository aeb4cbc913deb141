/// Application layer: the reconciliation workflow and the pure services it uses
pub mod services;
pub mod use_cases;
