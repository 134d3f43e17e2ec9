pub mod claim;
pub mod retire_round;
pub mod set_max_claim_amount;
pub mod set_root;
pub mod withdraw;

pub use claim::*;
pub use retire_round::*;
pub use set_max_claim_amount::*;
pub use set_root::*;
pub use withdraw::*;
