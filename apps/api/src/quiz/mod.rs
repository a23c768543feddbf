// Quiz API: aptitude and personality question banks, and the adapter that
// turns answers into a profile the matching engine can score.

pub mod adapter;
pub mod bank;
pub mod handlers;
pub mod models;
