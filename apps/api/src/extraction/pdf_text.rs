//! PDF → plain text.
//!
//! `pdf-extract` handles the common case in one pass. When it rejects the
//! document as a whole, pages are decoded one at a time through `lopdf` so a
//! single bad page costs only that page's text. Both libraries can panic on
//! malformed input; panics are caught and treated like errors.

use std::panic::{self, AssertUnwindSafe};

use tracing::{debug, warn};

/// Extracts text page by page, joined with `\n` in page order.
/// Returns an empty string when nothing in the document can be decoded.
pub fn extract_text(pdf_bytes: &[u8]) -> String {
    if pdf_bytes.is_empty() {
        return String::new();
    }

    match extract_all_pages(pdf_bytes) {
        Ok(pages) => {
            debug!(pages = pages.len(), "PDF text extracted");
            pages.join("\n")
        }
        Err(reason) => {
            debug!("Whole-document extraction failed ({reason}); decoding page by page");
            match extract_page_by_page(pdf_bytes) {
                Ok(pages) => pages.join("\n"),
                Err(reason) => {
                    warn!("Error extracting text from PDF: {reason}");
                    String::new()
                }
            }
        }
    }
}

fn extract_all_pages(pdf_bytes: &[u8]) -> Result<Vec<String>, String> {
    catch_panic(|| {
        pdf_extract::extract_text_from_mem_by_pages(pdf_bytes)
            .map_err(|e| format!("PDF extraction error: {e}"))
    })
}

fn extract_page_by_page(pdf_bytes: &[u8]) -> Result<Vec<String>, String> {
    let doc = catch_panic(|| {
        lopdf::Document::load_mem(pdf_bytes).map_err(|e| format!("PDF load error: {e}"))
    })?;

    let page_numbers: Vec<u32> = doc.get_pages().keys().copied().collect();
    let pages = page_numbers
        .into_iter()
        .map(|page| {
            catch_panic(|| {
                doc.extract_text(&[page])
                    .map_err(|e| format!("page {page}: {e}"))
            })
            .unwrap_or_else(|reason| {
                debug!("Substituting empty text for unreadable {reason}");
                String::new()
            })
        })
        .collect();

    Ok(pages)
}

fn catch_panic<T>(f: impl FnOnce() -> Result<T, String>) -> Result<T, String> {
    panic::catch_unwind(AssertUnwindSafe(f))
        .unwrap_or_else(|_| Err("PDF library panicked".to_string()))
}

/// Small PDFs built with `lopdf` for tests.
#[cfg(test)]
pub(crate) mod fixtures {
    use lopdf::content::{Content, Operation};
    use lopdf::{dictionary, Document, Object, Stream};

    pub(crate) enum Page<'a> {
        Lines(&'a [&'a str]),
        /// A Flate-filtered content stream whose bytes do not inflate.
        Corrupt,
    }

    pub(crate) fn build_pdf(pages: &[Page]) -> Vec<u8> {
        let mut doc = Document::with_version("1.5");
        let pages_id = doc.new_object_id();
        let font_id = doc.add_object(dictionary! {
            "Type" => "Font",
            "Subtype" => "Type1",
            "BaseFont" => "Courier",
        });
        let resources_id = doc.add_object(dictionary! {
            "Font" => dictionary! { "F1" => font_id },
        });

        let kids: Vec<Object> = pages
            .iter()
            .map(|page| {
                let stream = match page {
                    Page::Lines(lines) => Stream::new(dictionary! {}, content_for(lines)),
                    Page::Corrupt => Stream::new(
                        dictionary! { "Filter" => "FlateDecode" },
                        b"\x00\xffnot deflate data".to_vec(),
                    ),
                };
                let content_id = doc.add_object(stream);
                doc.add_object(dictionary! {
                    "Type" => "Page",
                    "Parent" => pages_id,
                    "Contents" => content_id,
                })
                .into()
            })
            .collect();

        doc.objects.insert(
            pages_id,
            Object::Dictionary(dictionary! {
                "Type" => "Pages",
                "Count" => kids.len() as i64,
                "Kids" => kids,
                "Resources" => resources_id,
                "MediaBox" => vec![0.into(), 0.into(), 595.into(), 842.into()],
            }),
        );
        let catalog_id = doc.add_object(dictionary! {
            "Type" => "Catalog",
            "Pages" => pages_id,
        });
        doc.trailer.set("Root", catalog_id);

        let mut bytes = Vec::new();
        doc.save_to(&mut bytes).unwrap();
        bytes
    }

    /// One text object per line, top to bottom.
    fn content_for(lines: &[&str]) -> Vec<u8> {
        let operations: Vec<Operation> = lines
            .iter()
            .enumerate()
            .flat_map(|(i, line)| {
                let y = 800 - 20 * i as i64;
                vec![
                    Operation::new("BT", vec![]),
                    Operation::new("Tf", vec!["F1".into(), 12.into()]),
                    Operation::new("Td", vec![50.into(), y.into()]),
                    Operation::new("Tj", vec![Object::string_literal(*line)]),
                    Operation::new("ET", vec![]),
                ]
            })
            .collect();
        Content { operations }.encode().unwrap()
    }
}
