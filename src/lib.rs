pub mod config;
pub mod flush;
pub mod id;
pub mod model;
pub mod scenario;
pub mod sim;
pub mod testutil;

pub use config::ElectoralConfig;
pub use id::IdGenerator;
pub use model::{
    ActionResult, Bill, BillStatus, CampaignAction, CoalitionProposal, Constituency, Event,
    EventKind, GameState, Government, InvariantViolation, Medium, Party, Stance, VoteTally,
};
