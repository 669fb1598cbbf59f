pub mod ai;
pub mod campaign;
pub mod election;
pub mod events;
pub mod formation;
pub mod friction;
pub mod government;
pub mod legislature;
pub mod polling;
pub mod seats;
pub mod turn;

pub use ai::choose_action;
pub use campaign::{CampaignEffect, CampaignOutcome, apply_campaign_action, effect};
pub use election::{ElectionResult, project_seats, run_election};
pub use events::{RolledEvent, roll_campaign_event};
pub use formation::{CoalitionOption, FormationOutcome, form_government, minimal_winning_coalitions};
pub use government::{GovernmentRejection, adjust_stability, install_government, validate};
pub use legislature::{open_vote, propose_bill, resolve_bill, tally};
pub use polling::{apply_delta, apply_national_delta, national_share};
pub use seats::allocate;
pub use turn::{TurnReport, run_campaign_turn};
