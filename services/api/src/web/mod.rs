pub mod rest;
pub mod state;

// Re-export the handlers and router builder to make them easily accessible
// to the binary that will build the web server.
pub use rest::{
    generate_book_handler, generate_story_handler, health_handler, latest_book_handler, router,
};
