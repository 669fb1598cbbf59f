#[macro_use]
mod macros;

pub mod bill;
pub mod campaign;
pub mod coalition;
pub mod constituency;
pub mod event;
pub mod party;
pub mod state;

pub use bill::{Bill, BillEffects, BillStatus, LegislativeRecord, VoteChoice, VoteTally};
pub use campaign::{ActionResult, CampaignAction, CampaignStats, Medium};
pub use coalition::{CoalitionProposal, Government, Minister};
pub use constituency::{Constituency, Demographic, Demographics, Region};
pub use event::{Event, EventKind};
pub use party::{Candidate, Ideology, Language, Party, Stance};
pub use state::{GameState, InvariantViolation, POLLING_TOLERANCE};
