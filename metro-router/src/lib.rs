//! Metro route planner.
//!
//! Answers "how do I get from station A to station B" over a fixed-schedule
//! transit network, optimizing either for distance or for travel time
//! including the cost of changing lines.

pub mod domain;
pub mod feed;
pub mod graph;
pub mod network;
pub mod planner;
