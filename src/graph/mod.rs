//! Graph construction, ranking, and layout
//!
//! This module builds the weighted co-occurrence graph and derives the
//! frequency-ranked view handed to presentation code.

pub mod builder;
pub mod layout;
pub mod ranking;
