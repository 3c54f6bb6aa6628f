use anyhow::Result;

use crate::presentation::{ColumnListEntry, ColumnListView};
use crate::types::OutputFormat;

pub fn handle(format: OutputFormat) -> Result<()> {
    let entries = ColumnListEntry::all();
    match format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&entries)?),
        OutputFormat::Plain | OutputFormat::Color => print!("{}", ColumnListView::new(&entries)),
    }
    Ok(())
}
