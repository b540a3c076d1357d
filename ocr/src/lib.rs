//! `tessnote-ocr` — the OCR engine adapter behind the `OcrEngine` seam.

pub mod tesseract;

pub use tesseract::TesseractEngine;
