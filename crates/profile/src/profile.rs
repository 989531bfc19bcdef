use labelsheet_types::{PageSize, Size, Unit};

/// Fields printed when a profile does not list any.
pub const DEFAULT_FIELDS: [&str; 2] = ["artist", "title"];

/// Separator between field names in a profile's `fields` value.
pub const FIELD_DELIMITER: char = ':';

/// Share of a label's width given to the code when a profile does not say.
pub const DEFAULT_CODE_FRACTION: f32 = 0.5;

/// Process-wide defaults from the `general` section.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct GeneralDefaults {
    pub swap_columns: bool,
}

/// An immutable description of a physical label sheet.
#[derive(Debug, Clone, PartialEq)]
pub struct Profile {
    pub name: String,
    pub description: String,
    /// Label rows per page.
    pub rows: u32,
    /// Label columns per page.
    pub columns: u32,
    /// Width of one label, in `unit`.
    pub label_width: f32,
    /// Height of one label, in `unit`.
    pub label_height: f32,
    pub unit: Unit,
    /// `None` means the page is exactly the label grid.
    pub page_size: Option<PageSize>,
    /// Record fields printed on each label, in display order.
    pub fields: Vec<String>,
    /// Code on the left and text on the right when set.
    pub swap_columns: bool,
    pub code_fraction: f32,
}

impl Profile {
    /// A profile with the default field list and layout options.
    pub fn new(
        name: impl Into<String>,
        rows: u32,
        columns: u32,
        label_width: f32,
        label_height: f32,
        unit: Unit,
    ) -> Self {
        Self {
            name: name.into(),
            description: String::new(),
            rows,
            columns,
            label_width,
            label_height,
            unit,
            page_size: None,
            fields: DEFAULT_FIELDS.iter().map(|f| f.to_string()).collect(),
            swap_columns: false,
            code_fraction: DEFAULT_CODE_FRACTION,
        }
    }

    pub fn with_page_size(mut self, page_size: PageSize) -> Self {
        self.page_size = Some(page_size);
        self
    }

    pub fn with_fields<I, S>(mut self, fields: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.fields = fields.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_swap_columns(mut self, swap_columns: bool) -> Self {
        self.swap_columns = swap_columns;
        self
    }

    pub fn with_code_fraction(mut self, code_fraction: f32) -> Self {
        self.code_fraction = code_fraction;
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn cells_per_page(&self) -> usize {
        self.rows as usize * self.columns as usize
    }

    /// A 1x1 profile prints each label on its own page.
    pub fn is_single_label(&self) -> bool {
        self.rows == 1 && self.columns == 1
    }

    pub fn label_size_pt(&self) -> Size {
        Size::new(
            self.unit.to_points(self.label_width),
            self.unit.to_points(self.label_height),
        )
    }

    /// The extent of the full label grid, in points.
    pub fn grid_size_pt(&self) -> Size {
        let label = self.label_size_pt();
        Size::new(
            label.width * self.columns as f32,
            label.height * self.rows as f32,
        )
    }

    pub fn page_size_pt(&self) -> Size {
        match &self.page_size {
            Some(size) => size.dimensions_pt(),
            None => self.grid_size_pt(),
        }
    }

    /// Checks the structural invariants of the profile.
    pub fn validate(&self) -> Result<(), String> {
        if self.rows == 0 || self.columns == 0 {
            return Err(format!(
                "grid must have at least one row and column, got {}x{}",
                self.rows, self.columns
            ));
        }
        if !(self.label_width.is_finite() && self.label_width > 0.0) {
            return Err(format!("label width must be positive, got {}", self.label_width));
        }
        if !(self.label_height.is_finite() && self.label_height > 0.0) {
            return Err(format!("label height must be positive, got {}", self.label_height));
        }
        if self.fields.is_empty() {
            return Err("at least one field must be printed".to_string());
        }
        if !(self.code_fraction > 0.0 && self.code_fraction < 1.0) {
            return Err(format!(
                "code fraction must lie strictly between 0 and 1, got {}",
                self.code_fraction
            ));
        }
        Ok(())
    }
}
