mod address_finder;
mod instruction_builders;
mod lifecycle;
mod state;
mod transaction_builders;

pub use address_finder::{
    title_fingerprint, AddressFinder, CAMPAIGN_SEED_PREFIX, CROWDFUND_PROGRAM_ID,
    RECEIPT_SEED_PREFIX,
};
pub use instruction_builders::*;
pub use lifecycle::*;
pub use state::*;
pub use transaction_builders::*;
