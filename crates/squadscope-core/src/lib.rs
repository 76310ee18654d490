// Library root: squad cohort analytics for football rosters.
//
// Players are grouped by age and position, contracts are bucketed by expiry
// year, and each team gets a squad grid, a few insights and a shortlist of
// young players from other leagues.

pub mod aggregate;
pub mod cohort;
pub mod config;
pub mod contract;
pub mod pipeline;
pub mod prospects;
pub mod roster;
