//! Opaque handles into a sink's document.

use serde::Serialize;

macro_rules! handle {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
        #[serde(transparent)]
        pub struct $name(pub(crate) usize);

        impl $name {
            /// Index of the element inside its sink.
            #[must_use]
            pub fn index(self) -> usize {
                self.0
            }
        }
    };
}

handle!(
    /// Handle to a paragraph.
    ParagraphId
);
handle!(
    /// Handle to a run inside a paragraph.
    RunId
);
handle!(
    /// Handle to a table.
    TableId
);
handle!(
    /// Handle to a table row.
    RowId
);
handle!(
    /// Handle to a table cell.
    CellId
);

/// Container that block content is appended to.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Location {
    /// Top-level document body.
    Body,
    /// A specific table cell.
    Cell(CellId),
}

impl Location {
    /// The cell, if this location is one.
    #[must_use]
    pub fn cell(self) -> Option<CellId> {
        match self {
            Self::Body => None,
            Self::Cell(cell) => Some(cell),
        }
    }
}

/// Where a picture is placed.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PictureTarget {
    /// In a new paragraph of its own at a location.
    Location(Location),
    /// Inside an existing run.
    Run(RunId),
}
