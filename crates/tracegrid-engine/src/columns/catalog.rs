//! Named column choices, so a table can be described by a list of strings
//! (CLI flags, config files).

use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

use super::{
    Column, DurationMode, TimeField, aggregated_feedback_column, cost_column, duration_column,
    enrichment_column, feedback_column, input_column, name_column, output_column, status_column,
    tags_column, template_column, time_column, user_column,
};
use crate::error::TableError;
use crate::related::RelatedRuns;
use crate::table::Table;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ColumnChoice {
    Name,
    Time,
    EndedAt,
    Duration,
    Status,
    Tags,
    Input,
    Output,
    Template,
    User,
    Cost,
    Feedback,
    Enrichment(String),
}

impl ColumnChoice {
    /// Every fixed choice, in listing order
    pub const FIXED: [ColumnChoice; 12] = [
        ColumnChoice::Name,
        ColumnChoice::Time,
        ColumnChoice::EndedAt,
        ColumnChoice::Duration,
        ColumnChoice::Status,
        ColumnChoice::Tags,
        ColumnChoice::Input,
        ColumnChoice::Output,
        ColumnChoice::Template,
        ColumnChoice::User,
        ColumnChoice::Cost,
        ColumnChoice::Feedback,
    ];

    pub fn description(&self) -> String {
        match self {
            ColumnChoice::Name => "Run name, falling back to its type".to_string(),
            ColumnChoice::Time => "Creation time (time only for today)".to_string(),
            ColumnChoice::EndedAt => "End time".to_string(),
            ColumnChoice::Duration => "Time between creation and end".to_string(),
            ColumnChoice::Status => "success / error badge".to_string(),
            ColumnChoice::Tags => "Run tags".to_string(),
            ColumnChoice::Input => "Input preview".to_string(),
            ColumnChoice::Output => "Output (or error) preview".to_string(),
            ColumnChoice::Template => "Prompt template link".to_string(),
            ColumnChoice::User => "End user".to_string(),
            ColumnChoice::Cost => "Cost in USD".to_string(),
            ColumnChoice::Feedback => "User feedback".to_string(),
            ColumnChoice::Enrichment(kind) => format!("Enrichment result `{kind}`"),
        }
    }
}

impl fmt::Display for ColumnChoice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ColumnChoice::Name => f.write_str("name"),
            ColumnChoice::Time => f.write_str("time"),
            ColumnChoice::EndedAt => f.write_str("ended"),
            ColumnChoice::Duration => f.write_str("duration"),
            ColumnChoice::Status => f.write_str("status"),
            ColumnChoice::Tags => f.write_str("tags"),
            ColumnChoice::Input => f.write_str("input"),
            ColumnChoice::Output => f.write_str("output"),
            ColumnChoice::Template => f.write_str("template"),
            ColumnChoice::User => f.write_str("user"),
            ColumnChoice::Cost => f.write_str("cost"),
            ColumnChoice::Feedback => f.write_str("feedback"),
            ColumnChoice::Enrichment(kind) => write!(f, "enrichment:{kind}"),
        }
    }
}

impl FromStr for ColumnChoice {
    type Err = TableError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if let Some(kind) = s.strip_prefix("enrichment:") {
            let kind = kind.trim();
            if kind.is_empty() {
                return Err(TableError::UnknownColumn(s.to_string()));
            }
            return Ok(ColumnChoice::Enrichment(kind.to_string()));
        }

        ColumnChoice::FIXED
            .iter()
            .find(|choice| choice.to_string().eq_ignore_ascii_case(s))
            .cloned()
            .ok_or_else(|| TableError::UnknownColumn(s.to_string()))
    }
}

/// Construction-time switches shared by every column of a table
#[derive(Clone, Default)]
pub struct TableOptions {
    pub duration_mode: DurationMode,
    /// When set, the feedback column aggregates related runs
    pub related: Option<Arc<dyn RelatedRuns>>,
    pub input_label: Option<String>,
    pub output_label: Option<String>,
}

/// Columns shown when the caller asks for none in particular
pub fn default_choices() -> Vec<ColumnChoice> {
    vec![
        ColumnChoice::Name,
        ColumnChoice::Time,
        ColumnChoice::Duration,
        ColumnChoice::Status,
        ColumnChoice::User,
        ColumnChoice::Tags,
        ColumnChoice::Cost,
        ColumnChoice::Feedback,
        ColumnChoice::Template,
        ColumnChoice::Input,
        ColumnChoice::Output,
    ]
}

pub fn build_column(choice: &ColumnChoice, options: &TableOptions) -> Box<dyn Column> {
    match choice {
        ColumnChoice::Name => Box::new(name_column("Name")),
        ColumnChoice::Time => Box::new(time_column(TimeField::CreatedAt, "Time")),
        ColumnChoice::EndedAt => Box::new(time_column(TimeField::EndedAt, "Ended")),
        ColumnChoice::Duration => Box::new(duration_column(options.duration_mode)),
        ColumnChoice::Status => Box::new(status_column()),
        ColumnChoice::Tags => Box::new(tags_column()),
        ColumnChoice::Input => Box::new(input_column(
            options.input_label.as_deref().unwrap_or("input"),
        )),
        ColumnChoice::Output => Box::new(output_column(
            options.output_label.as_deref().unwrap_or("Response"),
        )),
        ColumnChoice::Template => Box::new(template_column()),
        ColumnChoice::User => Box::new(user_column()),
        ColumnChoice::Cost => Box::new(cost_column()),
        ColumnChoice::Feedback => match &options.related {
            Some(related) => Box::new(aggregated_feedback_column(related.clone())),
            None => Box::new(feedback_column()),
        },
        ColumnChoice::Enrichment(kind) => Box::new(enrichment_column(kind)),
    }
}

pub fn build_table(choices: &[ColumnChoice], options: &TableOptions) -> Result<Table, TableError> {
    choices
        .iter()
        .fold(Table::builder(), |builder, choice| {
            builder.boxed(build_column(choice, options))
        })
        .build()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_choices() {
        assert_eq!("name".parse::<ColumnChoice>(), Ok(ColumnChoice::Name));
        assert_eq!("Duration".parse::<ColumnChoice>(), Ok(ColumnChoice::Duration));
        assert_eq!(
            "enrichment:topics".parse::<ColumnChoice>(),
            Ok(ColumnChoice::Enrichment("topics".to_string()))
        );
        assert_eq!(
            "colour".parse::<ColumnChoice>(),
            Err(TableError::UnknownColumn("colour".to_string()))
        );
        assert!("enrichment:".parse::<ColumnChoice>().is_err());
    }

    #[test]
    fn test_display_roundtrips() {
        for choice in ColumnChoice::FIXED {
            assert_eq!(choice.to_string().parse::<ColumnChoice>(), Ok(choice));
        }
    }

    #[test]
    fn test_build_default_table() {
        let table = build_table(&default_choices(), &TableOptions::default()).unwrap();
        assert_eq!(
            table.headers(),
            vec![
                "Name", "Time", "Duration", "Status", "User", "Tags", "Cost", "Feedback",
                "Template", "input", "Response"
            ]
        );
    }

    #[test]
    fn test_duplicate_choice_is_rejected() {
        let err = build_table(
            &[ColumnChoice::Cost, ColumnChoice::Cost],
            &TableOptions::default(),
        )
        .unwrap_err();
        assert_eq!(err, TableError::DuplicateColumn("cost".to_string()));
    }
}
