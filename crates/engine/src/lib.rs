//! PDF engine: lays out the CV and cover letter, writes them, reads them back.

pub mod cursor;
pub mod cv;
pub mod document;
pub mod encode;
pub mod fonts;
pub mod geometry;
pub mod inspect;
pub mod letter;
pub mod text;
pub mod winansi;

use std::path::{Path, PathBuf};

use anyhow::Context as _;
use chrono::NaiveDate;
use jobpulse_core::ProfileRecord;

pub use document::{Document, RenderedPdf};
pub use encode::{DocumentInfo, encode_pdf};
pub use inspect::{PdfSummary, inspect_pdf};

#[derive(Debug, Default)]
pub struct Engine;

impl Engine {
    pub fn new() -> Self {
        Self
    }

    pub fn render_cv(
        &self,
        profile: &ProfileRecord,
        target_job_title: &str,
    ) -> anyhow::Result<RenderedPdf> {
        let doc = cv::render_cv(profile, target_job_title);
        let info = DocumentInfo {
            title: format!("CV - {}", profile.full_name),
            author: profile.full_name.clone(),
        };
        finish(doc, cv::cv_file_name(profile), &info)
    }

    pub fn render_letter(
        &self,
        profile: &ProfileRecord,
        company: &str,
        job_title: &str,
        content: &str,
        date: NaiveDate,
    ) -> anyhow::Result<RenderedPdf> {
        let doc = letter::render_letter(profile, company, job_title, content, date);
        let info = DocumentInfo {
            title: format!("Lettre de motivation - {company}"),
            author: profile.full_name.clone(),
        };
        finish(doc, letter::letter_file_name(profile), &info)
    }

    /// Writes `pdf` into `dir` under its file name, creating `dir` if needed.
    pub fn write(&self, dir: &Path, pdf: &RenderedPdf) -> anyhow::Result<PathBuf> {
        std::fs::create_dir_all(dir)
            .with_context(|| format!("create output directory {}", dir.display()))?;
        let path = dir.join(&pdf.file_name);
        std::fs::write(&path, &pdf.bytes).with_context(|| format!("write {}", path.display()))?;
        tracing::info!(path = %path.display(), pages = pdf.page_count, "pdf written");
        Ok(path)
    }

    pub fn inspect(&self, path: &Path) -> anyhow::Result<PdfSummary> {
        inspect_pdf(path)
    }
}

fn finish(doc: Document, file_name: String, info: &DocumentInfo) -> anyhow::Result<RenderedPdf> {
    let bytes = encode_pdf(&doc, info).with_context(|| format!("encode {file_name}"))?;
    Ok(RenderedPdf {
        file_name,
        page_count: doc.page_count(),
        bytes,
    })
}
