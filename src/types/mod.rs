pub mod features;
pub mod outcome;
pub mod track;
