pub mod rabbitmqcluster;

pub use rabbitmqcluster::*;
