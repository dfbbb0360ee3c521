pub mod inventory;
pub mod observation;
pub mod queues;
