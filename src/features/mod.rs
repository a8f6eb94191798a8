pub mod hydrology;
pub mod names;
pub mod orography;
pub mod settlements;

pub use hydrology::{HydrologyPlanner, Lake, LakeShape, lake_at};
pub use names::{NamePool, NameTheme};
pub use orography::{OrographyAnalyzer, Peak};
pub use settlements::{Settlement, SettlementPlanner};
