//! Storybook assembly for Picturebook.
//!
//! Assembly is split in two steps:
//!
//! 1. [`DocumentPlan::build`] turns a story and its per-page illustrations
//!    into an ordered list of [`Block`]s.
//! 2. [`PdfAssembler::render`] lays the plan out on A4 pages.
//!
//! ```no_run
//! use picturebook_assembler::{DocumentPlan, PdfAssembler};
//! # fn example(story: &picturebook_core::StoryDocument) -> Result<(), picturebook_error::AssemblyError> {
//! let plan = DocumentPlan::build(story, &[])?;
//! let pdf = PdfAssembler::new().render(&plan)?;
//! std::fs::write("storybook.pdf", pdf).ok();
//! # Ok(())
//! # }
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod pdf;
mod plan;

pub use pdf::PdfAssembler;
pub use plan::{Block, DocumentPlan, MISSING_IMAGE_MARKER};
