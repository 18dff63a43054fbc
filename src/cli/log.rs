use bgpview::{LookupRequest, NormalizedRecord};
use log::info;

/*-------------------------------------------------------------------------------------------------
  Logging Functions
-------------------------------------------------------------------------------------------------*/

/*--------------------------------------------------------------------------------------
  Lookup Summary
--------------------------------------------------------------------------------------*/

pub fn lookup_summary(request: &LookupRequest, record: &NormalizedRecord) {
    let blocks = record.blocks();

    let count_lines: usize = blocks.iter().map(|block| block.lines.len()).sum();
    info!(
        "{} lookup for `{}` returned {count_lines} line(s)",
        request.kind(),
        request.value()
    );

    let empty_sections: Vec<&str> = blocks
        .iter()
        .filter(|block| block.empty)
        .map(|block| block.title.as_str())
        .collect();
    if !empty_sections.is_empty() {
        info!("No data for: {}", empty_sections.join(", "));
    };
}
