pub mod app;
pub mod domain;
pub mod infra;
pub mod storage;
pub mod transport;

// Convenience re-exports (keeps call-sites clean)
pub use app::database_service::DatabaseService;
pub use domain::model::{
    ColorSort, Entity, GraderMachineOutput, GradingCategory, Humidifier, KeyStrategy,
    MachineGrading, ManualGrading, ManualGradingSample, PeelingMachine, Piece, SizeVariation,
    Stock, StockScoped, WeightType, Worker,
};
pub use infra::config::Config;
pub use storage::{Repository, StoreError};
