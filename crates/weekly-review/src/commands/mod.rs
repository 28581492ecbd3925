pub mod locate;
pub mod run;
pub mod show;
pub mod version;
