pub mod archive;
pub mod batch;
pub mod classify;
pub mod features;
pub mod parse;
