mod sweeper;

pub use sweeper::Sweeper;
