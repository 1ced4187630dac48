//! Stats module - final value ranking

mod ranking;

pub use ranking::FinalValueRanking;
