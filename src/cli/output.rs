use bgpview::{NormalizedRecord, Result};
use comfy_table::modifiers::UTF8_ROUND_CORNERS;
use comfy_table::presets::UTF8_FULL;
use comfy_table::*;

/*-------------------------------------------------------------------------------------------------
  Output Functions
-------------------------------------------------------------------------------------------------*/

/*--------------------------------------------------------------------------------------
  Lines
--------------------------------------------------------------------------------------*/

pub fn lines(records: &[NormalizedRecord]) {
    for line in records.iter().flat_map(NormalizedRecord::lines) {
        println!("{line}");
    }
}

/*--------------------------------------------------------------------------------------
  Record Table
--------------------------------------------------------------------------------------*/

pub fn record_table(records: &[NormalizedRecord]) {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_content_arrangement(ContentArrangement::Dynamic);

    table.set_header(vec![
        Cell::new("Section")
            .add_attribute(Attribute::Bold)
            .fg(Color::Green),
        Cell::new("Details")
            .add_attribute(Attribute::Bold)
            .fg(Color::Green),
    ]);

    for block in records.iter().flat_map(NormalizedRecord::blocks) {
        for (index, line) in block.lines.iter().enumerate() {
            // Only the first row of a block carries its title
            let title = if index == 0 { block.title.as_str() } else { "" };
            let line = if block.empty {
                Cell::new(line).fg(Color::DarkYellow)
            } else {
                Cell::new(line)
            };
            table.add_row(vec![Cell::new(title).add_attribute(Attribute::Bold), line]);
        }
    }

    println!("{table}");
}

/*--------------------------------------------------------------------------------------
  JSON
--------------------------------------------------------------------------------------*/

/// A single record prints as an object; several print as an array.
pub fn json(records: &[NormalizedRecord]) -> Result<()> {
    let json = match records {
        [record] => serde_json::to_string_pretty(record)?,
        records => serde_json::to_string_pretty(records)?,
    };
    println!("{json}");
    Ok(())
}
