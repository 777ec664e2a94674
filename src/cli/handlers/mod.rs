pub mod serve;

pub use serve::ServeCommandHandler;
