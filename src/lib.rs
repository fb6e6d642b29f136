pub mod error;
pub mod pipe;
pub mod queue;
pub mod ring;
pub mod stream;
pub mod stream_configuration;
pub mod worker;

pub use error::{StreamError, StreamResult};
pub use pipe::Pipe;
pub use queue::{Queue, QueueError, QueueStats};
pub use ring::Ring;
pub use stream::{concat, Finisher, Stream};
pub use stream_configuration::{Options, DEFAULT_WORK_SIZE};
pub use worker::{guarded, protect, spawn_guarded};
