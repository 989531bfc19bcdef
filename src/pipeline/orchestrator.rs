// src/pipeline/orchestrator.rs
use super::report::RunReport;
use crate::error::PipelineError;
use labelsheet_layout::{LaidOutSheet, LayoutEngine};
use labelsheet_profile::Profile;
use labelsheet_render_core::{CodeRenderer, LabelCanvas, RenderError, RenderWarning};
use labelsheet_render_lopdf::{CanvasOptions, LopdfLabelCanvas};
use labelsheet_source::{ExportKind, NormalizedRecord, RowSource, adapt};
use std::fmt;
use std::fs;
use std::io::{self, Seek, Write};
use std::path::Path;
use std::sync::Arc;
use tempfile::NamedTempFile;

/// A configured label run: one profile, one export kind, one output format.
///
/// The pipeline is synchronous. Rows are adapted as they are read, the whole
/// batch is laid out, and placements are then drawn in order.
pub struct LabelPipeline {
    profile: Profile,
    export_kind: ExportKind,
    engine: LayoutEngine,
    canvas_options: CanvasOptions,
    code_renderer: Arc<dyn CodeRenderer>,
}

impl fmt::Debug for LabelPipeline {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LabelPipeline")
            .field("profile", &self.profile.name)
            .field("export_kind", &self.export_kind)
            .field("engine", &self.engine)
            .field("canvas_options", &self.canvas_options)
            .finish_non_exhaustive()
    }
}

impl LabelPipeline {
    pub(super) fn new(
        profile: Profile,
        export_kind: ExportKind,
        engine: LayoutEngine,
        canvas_options: CanvasOptions,
        code_renderer: Arc<dyn CodeRenderer>,
    ) -> Self {
        Self {
            profile,
            export_kind,
            engine,
            canvas_options,
            code_renderer,
        }
    }

    pub fn profile(&self) -> &Profile {
        &self.profile
    }

    pub fn export_kind(&self) -> ExportKind {
        self.export_kind
    }

    /// Reads every row from `source` and lays the resulting records out.
    ///
    /// Malformed rows are dropped with a warning. No output is produced here.
    pub fn lay_out<S: RowSource>(
        &self,
        mut source: S,
    ) -> Result<(LaidOutSheet, RunReport), PipelineError> {
        let mut report = RunReport::default();
        let mut records: Vec<NormalizedRecord> = Vec::with_capacity(source.size_hint().unwrap_or(0));

        while let Some(row) = source.next() {
            report.rows_read += 1;
            match row {
                Ok(row) => records.push(adapt(&row, &self.profile.fields, self.export_kind)),
                Err(warning) => {
                    log::warn!("{}", warning);
                    report.source_warnings.push(warning);
                }
            }
        }
        log::info!(
            "Read {} rows ({} usable)",
            report.rows_read,
            records.len()
        );

        let sheet = self.engine.layout(records, &self.profile)?;
        report.labels_placed = sheet.placements.len();
        report.layout_warnings = sheet.warnings.clone();
        Ok((sheet, report))
    }

    /// Generates the label document into `writer`.
    ///
    /// When no record can be placed nothing is written, the report shows zero
    /// pages and `writer` is handed back untouched.
    pub fn generate<S, W>(&self, source: S, writer: W) -> Result<(RunReport, W), PipelineError>
    where
        S: RowSource,
        W: Write + Seek,
    {
        let (sheet, mut report) = self.lay_out(source)?;
        if sheet.is_empty() {
            log::warn!("No labels to print; no document written");
            report.log_summary();
            return Ok((report, writer));
        }
        let writer = self.render(&sheet, writer, &mut report)?;
        report.log_summary();
        Ok((report, writer))
    }

    /// Generates the label document into the file at `path`, creating parent
    /// directories as needed.
    ///
    /// The document is written to a temporary file next to `path` and moved
    /// into place only once it is complete, so a failed run never leaves a
    /// partial PDF behind. Nothing is created when there is no label to print.
    pub fn generate_to_file<S, P>(&self, source: S, path: P) -> Result<RunReport, PipelineError>
    where
        S: RowSource,
        P: AsRef<Path>,
    {
        let output_path = path.as_ref();
        let (sheet, mut report) = self.lay_out(source)?;
        if sheet.is_empty() {
            log::warn!(
                "No labels to print; '{}' was not written",
                output_path.display()
            );
            report.log_summary();
            return Ok(report);
        }

        let parent_dir = match output_path.parent() {
            Some(dir) if !dir.as_os_str().is_empty() => dir,
            _ => Path::new("."),
        };
        fs::create_dir_all(parent_dir)?;
        let temp = NamedTempFile::new_in(parent_dir)?;
        let writer = self.render(&sheet, io::BufWriter::new(temp), &mut report)?;
        let temp = writer.into_inner().map_err(|e| e.into_error())?;
        temp.persist(output_path).map_err(|e| e.error)?;

        log::info!("Wrote {}", output_path.display());
        report.log_summary();
        Ok(report)
    }

    /// Draws every placement and records the page count and any per-record
    /// render warnings in `report`.
    fn render<W: Write + Seek>(
        &self,
        sheet: &LaidOutSheet,
        writer: W,
        report: &mut RunReport,
    ) -> Result<W, PipelineError> {
        let mut canvas = LopdfLabelCanvas::new(self.canvas_options);
        canvas.begin_document(writer, &self.profile, sheet.page_size)?;

        for placement in &sheet.placements {
            let code = if placement.has_code() {
                match self.code_renderer.render(placement.record.identifier.as_str()) {
                    Ok(code) => Some(code),
                    Err(RenderError::Code { message, .. }) => {
                        let warning = RenderWarning::CodeUnrenderable {
                            row: placement.record.row,
                            message,
                        };
                        log::warn!("{}", warning);
                        report.render_warnings.push(warning);
                        None
                    }
                    Err(e) => return Err(e.into()),
                }
            } else {
                None
            };
            canvas.draw_placement(placement, code.as_ref())?;
        }

        let pages = canvas.page_count();
        debug_assert_eq!(pages, sheet.page_count);
        let writer = Box::new(canvas).finish()?;
        log::debug!("Rendered {} placements on {} pages", sheet.placements.len(), pages);
        report.pages = pages;
        Ok(writer)
    }
}
