//! Basic enumerations shared across the page

use serde::{Deserialize, Serialize};

/// Where the organization logo is printed on a receipt
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "kebab-case")]
pub enum LogoPosition {
    #[default]
    TopLeft,
    TopCenter,
    TopRight,
}

impl std::str::FromStr for LogoPosition {
    type Err = String;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "top-left" | "left" => Ok(LogoPosition::TopLeft),
            "top-center" | "center" => Ok(LogoPosition::TopCenter),
            "top-right" | "right" => Ok(LogoPosition::TopRight),
            _ => Err(format!("Invalid logo position: {}", s)),
        }
    }
}

impl std::fmt::Display for LogoPosition {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LogoPosition::TopLeft => write!(f, "top-left"),
            LogoPosition::TopCenter => write!(f, "top-center"),
            LogoPosition::TopRight => write!(f, "top-right"),
        }
    }
}

/// Receipt table columns, in display order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Column {
    Date,
    DonorName,
    DonorEmail,
    Amount,
    QbDocNum,
}

impl Column {
    pub const ALL: [Column; 5] = [
        Column::Date,
        Column::DonorName,
        Column::DonorEmail,
        Column::Amount,
        Column::QbDocNum,
    ];

    /// Position of the column's cell within a row
    pub fn index(self) -> usize {
        match self {
            Column::Date => 0,
            Column::DonorName => 1,
            Column::DonorEmail => 2,
            Column::Amount => 3,
            Column::QbDocNum => 4,
        }
    }

    /// Default width in pixels
    pub fn default_width(self) -> u32 {
        match self {
            Column::Date => 100,
            Column::DonorName => 200,
            Column::DonorEmail => 220,
            Column::Amount => 110,
            Column::QbDocNum => 120,
        }
    }
}

impl std::str::FromStr for Column {
    type Err = String;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().replace('-', "_").as_str() {
            "date" => Ok(Column::Date),
            "donor_name" | "name" | "donor" => Ok(Column::DonorName),
            "donor_email" | "email" => Ok(Column::DonorEmail),
            "amount" => Ok(Column::Amount),
            "qb_docnum" | "docnum" | "doc" => Ok(Column::QbDocNum),
            _ => Err(format!("Invalid column: {}", s)),
        }
    }
}

impl std::fmt::Display for Column {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Column::Date => write!(f, "date"),
            Column::DonorName => write!(f, "donor_name"),
            Column::DonorEmail => write!(f, "donor_email"),
            Column::Amount => write!(f, "amount"),
            Column::QbDocNum => write!(f, "qb_docnum"),
        }
    }
}

/// Sort direction of the active column
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum SortDirection {
    #[default]
    Ascending,
    Descending,
}

impl SortDirection {
    pub fn toggled(self) -> Self {
        match self {
            SortDirection::Ascending => SortDirection::Descending,
            SortDirection::Descending => SortDirection::Ascending,
        }
    }
}

/// What the page should do after a handler finishes
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum PageAction {
    #[default]
    None,
    /// Re-fetch everything from the server
    Reload,
    /// Leave the page, e.g. for the QuickBooks consent screen
    Redirect(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_logo_position_round_trip_names() {
        assert_eq!("top-right".parse::<LogoPosition>().unwrap(), LogoPosition::TopRight);
        assert_eq!("center".parse::<LogoPosition>().unwrap(), LogoPosition::TopCenter);
        assert_eq!(LogoPosition::TopLeft.to_string(), "top-left");
        assert!("bottom".parse::<LogoPosition>().is_err());
    }

    #[test]
    fn test_logo_position_serde_matches_display() {
        let json = serde_json::to_string(&LogoPosition::TopCenter).unwrap();
        assert_eq!(json, "\"top-center\"");
    }

    #[test]
    fn test_column_parse() {
        assert_eq!("amount".parse::<Column>().unwrap(), Column::Amount);
        assert_eq!("donor-name".parse::<Column>().unwrap(), Column::DonorName);
        assert_eq!(Column::QbDocNum.index(), 4);
    }

    #[test]
    fn test_sort_direction_toggle() {
        assert_eq!(SortDirection::Ascending.toggled(), SortDirection::Descending);
        assert_eq!(SortDirection::Descending.toggled(), SortDirection::Ascending);
    }
}
