//! Pairwise Survey - Expert judgment collection for AHP studies
//!
//! Respondents rate pairs of design principles on a signed 1-9 scale. A
//! finished session is compiled into one CSV file per respondent, written
//! once to local storage and then emailed to the research team.

pub mod adapters;
pub mod application;
pub mod config;
pub mod domain;
pub mod ports;
