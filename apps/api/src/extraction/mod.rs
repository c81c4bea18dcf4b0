// Document Segmenter: PDF text extraction, header segmentation and skill tagging.
// Vocabularies are injected at construction; nothing here keeps mutable state.

pub mod pdf_text;
pub mod sections;
pub mod segmenter;
pub mod skills;
pub mod vocabulary;
