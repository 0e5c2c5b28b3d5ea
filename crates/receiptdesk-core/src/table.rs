//! Receipt table controller
//!
//! Holds the rendered rows, a point-in-time snapshot used for filtering, the
//! sort state and the column widths.
//!
//! Filtering reads the snapshot while sorting reads the live cells, so a row
//! edited after `snapshot()` sorts by its new value but filters by its old
//! one until the next snapshot.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::collections::HashMap;
use std::str::FromStr;

use crate::models::DonationTransaction;
use crate::time::{format_row_date, parse_row_date, parse_time_period, SearchFilter};
use crate::types::{Column, SortDirection};
use receiptdesk_utils::format_currency;

/// Stable identity of a rendered row
pub type RowId = u64;

/// A rendered table row
#[derive(Debug, Clone, PartialEq)]
pub struct TableRow {
    pub id: RowId,
    /// Backend transaction the row shows
    pub transaction_id: String,
    /// Cell text, indexed by `Column::index`
    pub cells: [String; 5],
    pub visible: bool,
}

impl TableRow {
    pub fn cell(&self, column: Column) -> &str {
        &self.cells[column.index()]
    }
}

/// Copy of a row's searchable text taken at snapshot time
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RowSnapshot {
    pub row_id: RowId,
    pub date: String,
    pub donor_name: String,
    pub donor_email: String,
    pub amount: String,
    pub qb_docnum: String,
}

impl RowSnapshot {
    fn from_row(row: &TableRow) -> Self {
        Self {
            row_id: row.id,
            date: row.cell(Column::Date).to_string(),
            donor_name: row.cell(Column::DonorName).to_string(),
            donor_email: row.cell(Column::DonorEmail).to_string(),
            amount: row.cell(Column::Amount).to_string(),
            qb_docnum: row.cell(Column::QbDocNum).to_string(),
        }
    }

    /// All fields joined, lowercased, for substring search
    fn haystack(&self) -> String {
        format!(
            "{} {} {} {} {}",
            self.date, self.donor_name, self.donor_email, self.amount, self.qb_docnum
        )
        .to_lowercase()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SortState {
    pub column: Column,
    pub direction: SortDirection,
}

/// Column drag in progress
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct ColumnResize {
    column: Column,
    start_x: i32,
    start_width: u32,
}

/// The receipt table
#[derive(Debug, Clone)]
pub struct ReceiptTable {
    rows: Vec<TableRow>,
    snapshot: Vec<RowSnapshot>,
    filter: Option<SearchFilter>,
    sort: Option<SortState>,
    widths: HashMap<Column, u32>,
    min_column_width: u32,
    resizing: Option<ColumnResize>,
    next_id: RowId,
}

impl ReceiptTable {
    pub fn new(min_column_width: u32) -> Self {
        Self {
            rows: Vec::new(),
            snapshot: Vec::new(),
            filter: None,
            sort: None,
            widths: Column::ALL
                .iter()
                .map(|c| (*c, c.default_width().max(min_column_width)))
                .collect(),
            min_column_width,
            resizing: None,
            next_id: 0,
        }
    }

    /// Add a row; it is not searchable until the next `snapshot()`
    pub fn push_row(&mut self, transaction_id: impl Into<String>, cells: [String; 5]) -> RowId {
        let id = self.next_id;
        self.next_id += 1;
        self.rows.push(TableRow {
            id,
            transaction_id: transaction_id.into(),
            cells,
            visible: true,
        });
        id
    }

    /// Replace every row with the given donations and take a fresh snapshot.
    /// The active filter and sort are applied again.
    pub fn load_transactions(&mut self, transactions: &[DonationTransaction], today: NaiveDate) {
        self.rows.clear();
        for tx in transactions {
            self.push_row(
                tx.id.clone(),
                [
                    format_row_date(tx.date),
                    tx.donor_name.clone(),
                    tx.donor_email.clone(),
                    format_currency(tx.amount),
                    tx.qb_docnum.clone(),
                ],
            );
        }
        self.snapshot();

        if let Some(sort) = self.sort {
            self.sort_rows(sort);
        }
        let query = match &self.filter {
            Some(SearchFilter::Text { query }) => Some(query.clone()),
            Some(SearchFilter::Time(filter)) => Some(filter.period.phrase().to_string()),
            None => None,
        };
        if let Some(query) = query {
            self.search(&query, today);
        }
    }

    /// Capture the current cell text of every row for filtering
    pub fn snapshot(&mut self) {
        self.snapshot = self.rows.iter().map(RowSnapshot::from_row).collect();
        log::debug!("Table snapshot taken: {} rows", self.snapshot.len());
    }

    pub fn snapshot_rows(&self) -> &[RowSnapshot] {
        &self.snapshot
    }

    /// Rows in display order, hidden ones included
    pub fn rows(&self) -> &[TableRow] {
        &self.rows
    }

    pub fn visible_rows(&self) -> impl Iterator<Item = &TableRow> {
        self.rows.iter().filter(|r| r.visible)
    }

    pub fn visible_count(&self) -> usize {
        self.visible_rows().count()
    }

    pub fn row(&self, id: RowId) -> Option<&TableRow> {
        self.rows.iter().find(|r| r.id == id)
    }

    pub fn row_for_transaction(&self, transaction_id: &str) -> Option<&TableRow> {
        self.rows.iter().find(|r| r.transaction_id == transaction_id)
    }

    /// Edit a live cell. The snapshot is not updated.
    pub fn set_cell(&mut self, id: RowId, column: Column, value: impl Into<String>) -> bool {
        match self.rows.iter_mut().find(|r| r.id == id) {
            Some(row) => {
                row.cells[column.index()] = value.into();
                true
            }
            None => false,
        }
    }

    pub fn filter(&self) -> Option<&SearchFilter> {
        self.filter.as_ref()
    }

    // ==================== Search ====================

    /// Show only the rows matching `query` and return how many are visible.
    ///
    /// A recognised time phrase filters on the snapshot date; anything else
    /// is a case-insensitive substring search over all snapshot fields. An
    /// empty query shows every row.
    pub fn search(&mut self, query: &str, today: NaiveDate) -> usize {
        let query = query.trim();
        if query.is_empty() {
            self.clear_filter();
            return self.rows.len();
        }

        let filter = match parse_time_period(query, today) {
            Some(time_filter) => SearchFilter::Time(time_filter),
            None => SearchFilter::Text {
                query: query.to_lowercase(),
            },
        };

        let matching: std::collections::HashSet<RowId> = self
            .snapshot
            .iter()
            .filter(|snap| match &filter {
                SearchFilter::Time(time_filter) => parse_row_date(&snap.date)
                    .map(|date| time_filter.contains(&date))
                    .unwrap_or(false),
                SearchFilter::Text { query } => snap.haystack().contains(query.as_str()),
            })
            .map(|snap| snap.row_id)
            .collect();

        for row in &mut self.rows {
            row.visible = matching.contains(&row.id);
        }

        log::debug!("Search {:?} matched {} rows", filter, matching.len());
        self.filter = Some(filter);
        self.visible_count()
    }

    /// Show every row again
    pub fn clear_filter(&mut self) {
        for row in &mut self.rows {
            row.visible = true;
        }
        self.filter = None;
    }

    // ==================== Sort ====================

    /// Sort by a column header click: the same column toggles direction, a
    /// new column starts ascending.
    pub fn sort(&mut self, column: Column) -> SortState {
        let state = match self.sort {
            Some(current) if current.column == column => SortState {
                column,
                direction: current.direction.toggled(),
            },
            _ => SortState {
                column,
                direction: SortDirection::Ascending,
            },
        };
        self.sort_rows(state);
        self.sort = Some(state);
        state
    }

    pub fn sort_state(&self) -> Option<SortState> {
        self.sort
    }

    fn sort_rows(&mut self, state: SortState) {
        self.rows.sort_by(|a, b| {
            let ordering = compare_cells(state.column, a.cell(state.column), b.cell(state.column));
            match state.direction {
                SortDirection::Ascending => ordering,
                SortDirection::Descending => ordering.reverse(),
            }
        });
    }

    // ==================== Column resize ====================

    pub fn column_width(&self, column: Column) -> u32 {
        self.widths
            .get(&column)
            .copied()
            .unwrap_or_else(|| column.default_width())
    }

    /// Start dragging the right edge of a column header at pointer `x`
    pub fn begin_resize(&mut self, column: Column, x: i32) {
        self.resizing = Some(ColumnResize {
            column,
            start_x: x,
            start_width: self.column_width(column),
        });
    }

    /// Follow the pointer; returns the new width while a drag is active
    pub fn drag_to(&mut self, x: i32) -> Option<u32> {
        let resize = self.resizing?;
        let delta = i64::from(x) - i64::from(resize.start_x);
        let width = (i64::from(resize.start_width) + delta)
            .clamp(i64::from(self.min_column_width), i64::from(u32::MAX)) as u32;
        self.widths.insert(resize.column, width);
        Some(width)
    }

    pub fn end_resize(&mut self) {
        self.resizing = None;
    }

    pub fn is_resizing(&self) -> bool {
        self.resizing.is_some()
    }
}

/// Parse a currency cell such as `$1,200.00`; unparseable text counts as zero
pub fn parse_amount(text: &str) -> Decimal {
    let cleaned: String = text
        .chars()
        .filter(|c| !matches!(c, '$' | ',' | ' '))
        .collect();
    Decimal::from_str(&cleaned).unwrap_or(Decimal::ZERO)
}

/// Type-aware comparison of two cells of the same column
pub fn compare_cells(column: Column, a: &str, b: &str) -> Ordering {
    match column {
        Column::Date => parse_row_date(a).cmp(&parse_row_date(b)),
        Column::Amount => parse_amount(a).cmp(&parse_amount(b)),
        _ => a.to_lowercase().cmp(&b.to_lowercase()),
    }
}

// ==================== Tests ====================
