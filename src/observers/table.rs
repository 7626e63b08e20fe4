//! Table view for pretty-printing registry logs.
//!
//! This module provides [`TableView`], which renders a [`Registry`]'s logs
//! as a formatted ASCII table using the `tabled` crate: one column per
//! observable (in registration order), one row per update step.
//!
//! # Feature Flag
//!
//! This module requires the `table` feature:
//!
//! ```toml
//! [dependencies]
//! osservabili = { version = "0.2", features = ["table"] }
//! ```
//!
//! # Examples
//!
//! ```rust,ignore
//! use osservabili::observers::table::{TableStyle, TableView};
//!
//! let view = TableView::new()
//!     .with_style(TableStyle::Rounded)
//!     .step_column(true);
//!
//! println!("{}", view.render(&registry));
//! // ╭──────┬────┬─────╮
//! // │ step │ sq │ inc │
//! // ├──────┼────┼─────┤
//! // │ 0    │ 4  │ 3   │
//! // │ 1    │ 9  │ 4   │
//! // │ 2    │ 16 │ 5   │
//! // ╰──────┴────┴─────╯
//! ```
//!
//! Columns of unequal length (the partial-failure hazard of
//! [`Registry::update`](crate::registry::Registry::update)) are padded with
//! a configurable placeholder rather than masked.

use crate::registry::Registry;
use tabled::{builder::Builder, settings::Style, Table};

/// Available table styles for rendering.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum TableStyle {
    /// ASCII table with simple characters: +, -, |
    Ascii,
    /// Modern rounded corners (default)
    #[default]
    Rounded,
    /// Sharp corners with box-drawing characters
    Sharp,
    /// Modern style with clean lines
    Modern,
    /// GitHub-flavored Markdown table
    Markdown,
    /// No borders, just spacing
    Blank,
}

/// Configuration for the table view.
#[derive(Debug, Clone)]
pub struct TableConfig {
    /// The style to use for rendering.
    pub style: TableStyle,
    /// Whether to show the identifier header row.
    pub show_header: bool,
    /// Custom title for the table (optional).
    pub title: Option<String>,
    /// Whether to prepend a step-index column.
    pub step_column: bool,
    /// Render only the last `n` steps, if set.
    pub tail: Option<usize>,
    /// Placeholder for cells of columns shorter than the longest one.
    pub empty_cell: String,
}

impl Default for TableConfig {
    fn default() -> Self {
        Self {
            style: TableStyle::default(),
            show_header: true,
            title: None,
            step_column: false,
            tail: None,
            empty_cell: String::new(),
        }
    }
}

/// A view that renders registry logs as a formatted ASCII table.
///
/// # Examples
///
/// ```rust,ignore
/// use osservabili::observers::table::{TableStyle, TableView};
///
/// // Last ten steps, with step indices, Markdown-formatted.
/// let view = TableView::new()
///     .with_style(TableStyle::Markdown)
///     .step_column(true)
///     .tail(10);
///
/// let output = view.render(&registry);
/// ```
#[derive(Debug, Clone, Default)]
pub struct TableView {
    config: TableConfig,
}

impl TableView {
    /// Creates a new table view with default settings.
    ///
    /// Default style is [`TableStyle::Rounded`], full history, header shown.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a new table view with the specified configuration.
    pub fn with_config(config: TableConfig) -> Self {
        Self { config }
    }

    /// Sets the table style.
    pub fn with_style(mut self, style: TableStyle) -> Self {
        self.config.style = style;
        self
    }

    /// Sets whether to show the identifier header row.
    pub fn with_header(mut self, show: bool) -> Self {
        self.config.show_header = show;
        self
    }

    /// Sets an optional title for the table.
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.config.title = Some(title.into());
        self
    }

    /// Enables or disables the step-index column.
    ///
    /// Step indices count update calls from zero and stay absolute when
    /// combined with [`tail`](TableView::tail).
    pub fn step_column(mut self, enabled: bool) -> Self {
        self.config.step_column = enabled;
        self
    }

    /// Renders only the last `n` update steps.
    ///
    /// Useful for long-running loops where only the recent history matters.
    pub fn tail(mut self, n: usize) -> Self {
        self.config.tail = Some(n);
        self
    }

    /// Sets the placeholder text for cells of short columns.
    ///
    /// Default is an empty string. Columns end up shorter than the longest
    /// one only after a partial update failure.
    pub fn empty_cell(mut self, placeholder: impl Into<String>) -> Self {
        self.config.empty_cell = placeholder.into();
        self
    }

    /// Applies the configured style to a table.
    fn apply_style(&self, table: &mut Table) {
        match self.config.style {
            TableStyle::Ascii => {
                table.with(Style::ascii());
            }
            TableStyle::Rounded => {
                table.with(Style::rounded());
            }
            TableStyle::Sharp => {
                table.with(Style::sharp());
            }
            TableStyle::Modern => {
                table.with(Style::modern());
            }
            TableStyle::Markdown => {
                table.with(Style::markdown());
            }
            TableStyle::Blank => {
                table.with(Style::blank());
            }
        }
    }

    /// Renders the registry's logs as a formatted table string.
    ///
    /// Column order is registration order; rows are update steps. An empty
    /// registry renders as an empty string.
    pub fn render(&self, registry: &Registry) -> String {
        let columns = registry.to_table();
        if columns.is_empty() {
            return String::new();
        }

        let steps = columns
            .iter()
            .map(|column| column.values.len())
            .max()
            .unwrap_or(0);
        let start = match self.config.tail {
            Some(n) => steps.saturating_sub(n),
            None => 0,
        };

        let mut builder = Builder::default();

        if self.config.show_header {
            let mut header: Vec<String> = Vec::new();
            if self.config.step_column {
                header.push("step".to_string());
            }
            header.extend(columns.iter().map(|column| column.identifier.to_string()));
            builder.push_record(header);
        }

        for step in start..steps {
            let mut record: Vec<String> = Vec::new();
            if self.config.step_column {
                record.push(step.to_string());
            }
            for column in &columns {
                record.push(
                    column
                        .values
                        .get(step)
                        .map(|value| value.to_string())
                        .unwrap_or_else(|| self.config.empty_cell.clone()),
                );
            }
            builder.push_record(record);
        }

        let mut table = builder.build();
        self.apply_style(&mut table);

        if let Some(ref title) = self.config.title {
            format!("{}\n{}", title, table)
        } else {
            table.to_string()
        }
    }
}
