//! Page segmentation into leaf table fragments.

use scraper::{ElementRef, Html, Selector};

use crate::error::Result;
use crate::extract::{Cell, Fragment, Row, stripped};
use crate::utils::parse_selector;

/// Splits a document into its leaf tables.
///
/// JupiterWeb nests data tables inside layout tables; only tables without a
/// nested table carry record data.
pub struct Segmenter {
    table: Selector,
    row: Selector,
    cell: Selector,
}

impl Segmenter {
    pub fn new() -> Result<Self> {
        Ok(Self {
            table: parse_selector("table")?,
            row: parse_selector("tr")?,
            cell: parse_selector("td")?,
        })
    }

    /// Parse `html` and return its leaf fragments in document order.
    pub fn segment(&self, html: &str) -> Vec<Fragment> {
        let document = Html::parse_document(html);
        self.leaf_fragments(&document)
    }

    /// Leaf fragments of an already parsed document, in document order.
    pub fn leaf_fragments(&self, document: &Html) -> Vec<Fragment> {
        document
            .select(&self.table)
            .filter(|table| is_leaf_table(*table))
            .map(|table| self.fragment(table))
            .collect()
    }

    fn fragment(&self, table: ElementRef<'_>) -> Fragment {
        let rows = table
            .select(&self.row)
            .map(|tr| {
                let cells = tr
                    .select(&self.cell)
                    .map(|td| Cell::from_strings(td.text()))
                    .collect();
                Row::new(cells, stripped(tr.text()).next())
            })
            .collect();

        Fragment::new(rows, stripped(table.text()).collect())
    }
}

/// A table is a leaf when none of its descendants is a table.
fn is_leaf_table(table: ElementRef<'_>) -> bool {
    !table
        .descendants()
        .skip(1)
        .filter_map(ElementRef::wrap)
        .any(|e| e.value().name() == "table")
}
