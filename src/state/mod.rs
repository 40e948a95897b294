pub mod touch;

pub use touch::TouchSet;
