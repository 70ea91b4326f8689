pub mod run;
pub mod vendors;
pub mod version;
