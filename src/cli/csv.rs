use bgpview::{NormalizedRecord, Result};
use std::path::Path;

/*-------------------------------------------------------------------------------------------------
  Save Lookup Results to CSV File
-------------------------------------------------------------------------------------------------*/

pub fn save(records: &[NormalizedRecord], path: &Path) -> Result<()> {
    let mut writer = csv::Writer::from_path(path)?;

    // Write header
    writer.serialize(["Section", "Line"])?;

    // Write one row per rendered line
    for block in records.iter().flat_map(NormalizedRecord::blocks) {
        for line in &block.lines {
            writer.serialize((&block.title, line))?;
        }
    }

    writer.flush()?;

    Ok(())
}
