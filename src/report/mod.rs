//! Output side: the PNG chart and the plain-text export table.

pub mod chart;
pub mod table;
