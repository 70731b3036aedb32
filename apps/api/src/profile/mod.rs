//! Profile operations — the onboarding status read and the
//! profile-and-insight update transaction.

pub mod handlers;
pub mod update;
