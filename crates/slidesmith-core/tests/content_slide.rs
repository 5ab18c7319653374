use slidesmith_core::requests::{self, SlideLayout};
use slidesmith_core::text::compute_bullet_ranges;
use slidesmith_core::{ids, table};

#[test]
fn content_block_becomes_ordered_bullet_edits() {
    let content = "Overview\n\tGoals\n\tRisks\nTimeline";
    let ranges = compute_bullet_ranges(content);
    assert_eq!(ranges.len(), 4);

    // Monotonic, non-overlapping, non-empty.
    for window in ranges.windows(2) {
        assert!(window[0].end <= window[1].start);
    }
    assert!(ranges.iter().all(|range| range.end > range.start));
    assert_eq!(ranges[1].level, 1);
    assert_eq!(ranges[3].level, 0);

    let batch: Vec<_> = ranges
        .iter()
        .map(|range| requests::create_paragraph_bullets("body_1", range))
        .collect();
    assert_eq!(batch.len(), 4);
    assert_eq!(
        batch[0]["createParagraphBullets"]["textRange"]["startIndex"],
        0
    );
}

#[test]
fn table_slide_request_sequence_is_complete() {
    let headers = vec!["Region".to_string(), "Sales".to_string()];
    let rows = vec![
        vec!["EMEA".to_string(), "120".to_string()],
        vec!["APAC".to_string(), "95".to_string()],
    ];
    table::validate_table(&headers, &rows).expect("valid");

    let slide_id = ids::slide_id("table", "Sales by Region");
    let table_id = ids::table_id(&slide_id);

    let create = requests::create_table(&table_id, &slide_id, rows.len() + 1, headers.len());
    assert_eq!(create["createTable"]["rows"], 3);
    assert_eq!(create["createTable"]["columns"], 2);

    let header_batch = table::header_requests(&table_id, &headers);
    let data_batch = table::data_requests(&table_id, &rows);
    assert_eq!(header_batch.len(), 4);
    assert_eq!(data_batch.len(), 4);
}

#[test]
fn slide_layouts_map_to_api_names() {
    assert_eq!(SlideLayout::Title.as_str(), "TITLE");
    assert_eq!(SlideLayout::TitleAndBody.as_str(), "TITLE_AND_BODY");
    assert_eq!(
        SlideLayout::TitleAndTwoColumns.as_str(),
        "TITLE_AND_TWO_COLUMNS"
    );
}
