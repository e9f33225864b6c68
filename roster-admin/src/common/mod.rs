pub mod messages;
pub mod task;

pub use messages::Message;
pub use task::Task;
