pub mod fs_store;
pub mod gemini_llm;

pub use fs_store::FsBookStore;
pub use gemini_llm::GeminiTextAdapter;
