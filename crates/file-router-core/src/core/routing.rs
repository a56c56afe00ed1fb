// crates/file-router-core/src/core/routing.rs
// ============================================================================
// Module: Routing Table
// Description: Vendor-to-destination mapping parsed from a delimited artifact.
// Purpose: Provide deterministic, case-insensitive rule resolution.
// Dependencies: serde, thiserror
// ============================================================================

//! ## Overview
//! The routing table is an externally maintained delimited-text artifact with
//! a header-defined column schema (`vendor`, `destination_folder`). The table
//! is loaded fresh per invocation and searched linearly; the first rule whose
//! vendor matches case-insensitively (surrounding whitespace trimmed) wins.
//! Duplicate vendors are tolerated; file order is the tie-break.

// ============================================================================
// SECTION: Imports
// ============================================================================

use serde::Deserialize;
use serde::Serialize;
use thiserror::Error;

// ============================================================================
// SECTION: Constants
// ============================================================================

/// Header column naming the vendor identifier.
const VENDOR_COLUMN: &str = "vendor";
/// Header column naming the destination folder.
const DESTINATION_COLUMN: &str = "destination_folder";

// ============================================================================
// SECTION: Errors
// ============================================================================

/// Routing table errors.
///
/// # Invariants
/// - Both variants are system faults; "no rule found" is a business outcome
///   and is expressed as `None` from [`RoutingTable::resolve`].
#[derive(Debug, Error)]
pub enum RoutingTableError {
    /// The config artifact could not be retrieved.
    #[error("routing table fetch error: {0}")]
    Fetch(String),
    /// The config artifact does not conform to the expected schema.
    #[error("routing table parse error: {0}")]
    Parse(String),
}

// ============================================================================
// SECTION: Rules
// ============================================================================

/// One vendor-to-destination routing rule.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoutingRule {
    /// Vendor identifier (matched case-insensitively, trimmed).
    pub vendor: String,
    /// Destination folder inside the processed container.
    pub destination_folder: String,
}

/// Ordered routing rule list.
///
/// # Invariants
/// - Rule order is the artifact's row order; resolution is first-match-wins.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RoutingTable {
    /// Rules in artifact row order.
    rules: Vec<RoutingRule>,
}

impl RoutingTable {
    /// Creates a routing table from pre-parsed rules.
    #[must_use]
    pub const fn new(rules: Vec<RoutingRule>) -> Self {
        Self {
            rules,
        }
    }

    /// Parses a delimited-text routing artifact.
    ///
    /// The first non-empty line is the header; it must name both the
    /// `vendor` and `destination_folder` columns (any column order, extra
    /// columns tolerated). Subsequent non-empty lines become rules.
    ///
    /// # Errors
    ///
    /// Returns [`RoutingTableError::Parse`] when the header is missing a
    /// required column or a row has fewer columns than the header.
    pub fn parse(contents: &str) -> Result<Self, RoutingTableError> {
        let mut lines = contents.lines().filter(|line| !line.trim().is_empty());
        let header = lines
            .next()
            .ok_or_else(|| RoutingTableError::Parse("routing table is empty".to_string()))?;
        let columns: Vec<String> =
            header.split(',').map(|column| column.trim().to_ascii_lowercase()).collect();
        let vendor_index = column_index(&columns, VENDOR_COLUMN)?;
        let destination_index = column_index(&columns, DESTINATION_COLUMN)?;
        let mut rules = Vec::new();
        for (row_number, line) in lines.enumerate() {
            let fields: Vec<&str> = line.split(',').map(str::trim).collect();
            let vendor = fields.get(vendor_index).ok_or_else(|| {
                RoutingTableError::Parse(format!("row {} is missing the vendor column", row_number + 1))
            })?;
            let destination = fields.get(destination_index).ok_or_else(|| {
                RoutingTableError::Parse(format!(
                    "row {} is missing the destination_folder column",
                    row_number + 1
                ))
            })?;
            rules.push(RoutingRule {
                vendor: (*vendor).to_string(),
                destination_folder: (*destination).to_string(),
            });
        }
        Ok(Self {
            rules,
        })
    }

    /// Resolves a vendor to the first matching rule.
    ///
    /// Matching folds case and trims surrounding whitespace on both sides.
    #[must_use]
    pub fn resolve(&self, vendor: &str) -> Option<&RoutingRule> {
        let needle = vendor.trim().to_lowercase();
        self.rules.iter().find(|rule| rule.vendor.trim().to_lowercase() == needle)
    }

    /// Returns the number of rules in the table.
    #[must_use]
    pub fn len(&self) -> usize {
        self.rules.len()
    }

    /// Returns true when the table has no rules.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }
}

/// Finds a required column in the header, case-insensitively.
fn column_index(columns: &[String], name: &str) -> Result<usize, RoutingTableError> {
    columns.iter().position(|column| column == name).ok_or_else(|| {
        RoutingTableError::Parse(format!("routing table header is missing the {name} column"))
    })
}

// ============================================================================
// SECTION: Tests
// ============================================================================
