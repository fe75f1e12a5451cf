mod add_holes;
mod conduits;
mod obstruction;
mod placement;
mod resolve;

pub use add_holes::{AddHoles, CommandResult, PlacementReport};
pub use conduits::{CollectConduits, ConduitKind, ConduitProfile, ConduitSet, LinearConduit, SkippedConduit};
pub use obstruction::ObstructionCollector;
pub use placement::{Opening, OpeningTemplate, PlacementEngine};
pub use resolve::resolve_hits;
