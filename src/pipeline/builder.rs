// src/pipeline/builder.rs
use super::orchestrator::LabelPipeline;
use crate::error::PipelineError;
use labelsheet_layout::{LayoutConfig, LayoutEngine, LayoutError, MissingIdentifierPolicy};
use labelsheet_profile::{ConfigFile, Profile, resolve_profile};
use labelsheet_render_core::CodeRenderer;
use labelsheet_render_lopdf::{CanvasOptions, QrCodeRenderer};
use labelsheet_source::ExportKind;
use std::fmt;
use std::sync::Arc;

/// A builder for creating a `LabelPipeline`.
#[derive(Clone, Default)]
pub struct PipelineBuilder {
    profile: Option<Profile>,
    export_kind: ExportKind,
    layout_config: LayoutConfig,
    canvas_options: CanvasOptions,
    code_renderer: Option<Arc<dyn CodeRenderer>>,
}

impl fmt::Debug for PipelineBuilder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PipelineBuilder")
            .field("profile", &self.profile)
            .field("export_kind", &self.export_kind)
            .field("layout_config", &self.layout_config)
            .field("canvas_options", &self.canvas_options)
            .field("custom_code_renderer", &self.code_renderer.is_some())
            .finish()
    }
}

impl PipelineBuilder {
    pub fn new() -> Self {
        Default::default()
    }

    /// Uses an already resolved profile.
    pub fn with_profile(mut self, profile: Profile) -> Self {
        self.profile = Some(profile);
        self
    }

    /// Resolves the named profile from a loaded configuration file.
    pub fn with_profile_from_config(
        self,
        name: &str,
        config: &ConfigFile,
    ) -> Result<Self, PipelineError> {
        let profile = resolve_profile(name, config)?;
        Ok(self.with_profile(profile))
    }

    /// Selects how identifiers are read from rows and which URL they map to.
    pub fn with_export_kind(mut self, kind: ExportKind) -> Self {
        self.export_kind = kind;
        self
    }

    pub fn with_missing_identifier(mut self, policy: MissingIdentifierPolicy) -> Self {
        self.layout_config = self.layout_config.with_missing_identifier(policy);
        self
    }

    /// Strokes every cell outline. Useful for checking alignment on a test print.
    pub fn with_cell_outlines(mut self, enabled: bool) -> Self {
        self.canvas_options.cell_outlines = enabled;
        self
    }

    pub fn with_canvas_options(mut self, options: CanvasOptions) -> Self {
        self.canvas_options = options;
        self
    }

    /// Replaces the QR code renderer.
    pub fn with_code_renderer<R: CodeRenderer + 'static>(mut self, renderer: R) -> Self {
        self.code_renderer = Some(Arc::new(renderer));
        self
    }

    /// Consumes the builder and creates the `LabelPipeline`.
    ///
    /// The profile is validated here, so a pipeline that builds can always
    /// lay out its input.
    pub fn build(self) -> Result<LabelPipeline, PipelineError> {
        let profile = self.profile.ok_or_else(|| {
            PipelineError::Config(
                "No profile has been configured. Use `with_profile` or `with_profile_from_config`."
                    .to_string(),
            )
        })?;
        profile.validate().map_err(LayoutError::Configuration)?;

        log::info!(
            "Using profile '{}': {}x{} labels, {} per page, {:?} export",
            profile.name,
            profile.rows,
            profile.columns,
            profile.cells_per_page(),
            self.export_kind
        );

        Ok(LabelPipeline::new(
            profile,
            self.export_kind,
            LayoutEngine::new(self.layout_config),
            self.canvas_options,
            self.code_renderer
                .unwrap_or_else(|| Arc::new(QrCodeRenderer::default())),
        ))
    }
}
