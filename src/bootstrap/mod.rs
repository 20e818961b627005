mod initializer;

pub use initializer::Bootstrap;
pub use initializer::BootstrapError;
