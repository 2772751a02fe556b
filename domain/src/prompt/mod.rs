//! Prompt templates shared by the answering providers and the summarizer.

pub mod template;

pub use template::PromptTemplate;
