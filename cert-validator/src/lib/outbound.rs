pub mod ocr;
pub mod repositories;
