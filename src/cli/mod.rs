mod page;
mod root;
mod select;

pub use root::Cli;
