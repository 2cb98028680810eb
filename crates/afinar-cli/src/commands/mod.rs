pub mod cp;
pub mod download;
pub mod recipes;
pub mod run;
pub mod signatures;
pub mod validate;
