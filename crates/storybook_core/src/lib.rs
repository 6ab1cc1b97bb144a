pub mod domain;
pub mod ports;
pub mod prompt;
pub mod service;

pub use domain::{Book, BookStamp, DEFAULT_TITLE_LABEL};
pub use ports::{BookStorage, Clock, PortError, PortResult, SystemClock, TextGenerationService};
pub use service::BookService;
