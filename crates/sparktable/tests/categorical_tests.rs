use pretty_assertions::assert_eq;
use serde_json::json;
use sparktable::{
    CategoricalSeriesMode, CellValue, DataView, SelectionId, SelectionIdBuilder, SeriesPoint,
    SourceShape, TransformOptions, Transformer,
};

struct CategoryIds;

impl SelectionIdBuilder for CategoryIds {
    fn table_row(&self, row_index: usize) -> SelectionId {
        SelectionId::new(format!("row:{row_index}"))
    }

    fn category_row(&self, category_index: usize) -> SelectionId {
        SelectionId::new(format!("category:{category_index}"))
    }
}

fn quarters_view(series: serde_json::Value) -> DataView {
    serde_json::from_value(json!({
        "metadata": {"columns": []},
        "categorical": {
            "categories": [
                {"source": {"queryName": "t.quarter", "displayName": "Quarter", "roles": {"category": true}},
                 "values": ["Q1", "Q2"]},
            ],
            "values": [
                {"source": {"queryName": "t.total", "displayName": "Total", "roles": {"value": true}},
                 "values": [100, 200]},
                {"source": {"queryName": "t.trend", "displayName": "Trend", "roles": {"sparklineSeries": true}},
                 "values": series},
            ],
        },
    }))
    .unwrap()
}

#[test]
fn categorical_payloads_are_detected_without_a_hint() {
    let data = quarters_view(json!([1, 2, 3, 4]));
    assert_eq!(data.shape(), Some(SourceShape::Categorical));
    assert_eq!(DataView::default().shape(), None);
}

#[test]
fn every_category_receives_the_full_series_vector() {
    let data = quarters_view(json!([1, 2, 3, 4]));
    let vm = Transformer::default().transform(&data).unwrap();

    assert_eq!(vm.rows.len(), 2);
    let expected = vec![
        SeriesPoint::at_index(0, 1.0),
        SeriesPoint::at_index(1, 2.0),
        SeriesPoint::at_index(2, 3.0),
        SeriesPoint::at_index(3, 4.0),
    ];
    for row in &vm.rows {
        assert_eq!(row.series_for("t.trend").unwrap().points, expected);
    }

    assert_eq!(vm.rows[0].cell_for("t.quarter"), Some(&CellValue::from("Q1")));
    assert_eq!(vm.rows[0].cell_for("t.total"), Some(&CellValue::Number(100.0)));
    assert_eq!(vm.rows[1].cell_for("t.quarter"), Some(&CellValue::from("Q2")));
    assert_eq!(vm.rows[1].cell_for("t.total"), Some(&CellValue::Number(200.0)));
}

#[test]
fn per_category_slicing_splits_the_vector() {
    let data = quarters_view(json!([1, 2, null, 4]));
    let mut transformer = Transformer::new(TransformOptions {
        categorical_series_mode: CategoricalSeriesMode::PerCategorySlice,
        ..TransformOptions::default()
    });
    let vm = transformer.transform(&data).unwrap();
    assert_eq!(
        vm.rows[0].series_for("t.trend").unwrap().points,
        vec![SeriesPoint::at_index(0, 1.0), SeriesPoint::at_index(1, 2.0)]
    );
    assert_eq!(
        vm.rows[1].series_for("t.trend").unwrap().points,
        vec![SeriesPoint::at_index(3, 4.0)]
    );
}

#[test]
fn x_axis_category_supplies_point_positions() {
    let data: DataView = serde_json::from_value(json!({
        "categorical": {
            "categories": [
                {"source": {"queryName": "t.product", "displayName": "Product", "roles": {"category": true}},
                 "values": ["Tea"]},
                {"source": {"queryName": "t.month", "displayName": "Month", "roles": {"xAxis": true}},
                 "values": ["Jan", "Feb", "Mar"]},
            ],
            "values": [
                {"source": {"queryName": "t.units", "displayName": "Units", "roles": {"sparklineSeries": true}},
                 "values": [3, "bad", 5]},
            ],
        },
    }))
    .unwrap();
    let vm = Transformer::default().transform(&data).unwrap();
    assert_eq!(vm.rows.len(), 1);
    assert_eq!(
        vm.rows[0].series_for("t.units").unwrap().points,
        vec![SeriesPoint::new("Jan", 3.0), SeriesPoint::new("Mar", 5.0)]
    );
    assert_eq!(vm.x_axis_columns[0].key(), "t.month");
}

#[test]
fn selection_ids_follow_category_positions_when_a_host_is_present() {
    let data = quarters_view(json!([1, 2]));
    let vm = Transformer::default()
        .with_host(CategoryIds)
        .transform(&data)
        .unwrap();
    let ids: Vec<&str> = vm
        .rows
        .iter()
        .filter_map(|row| row.selection_id.as_ref().map(SelectionId::as_str))
        .collect();
    assert_eq!(ids, vec!["category:0", "category:1"]);
    assert_eq!(vm.rows[1].source_rows, vec![1]);

    let headless = Transformer::default().transform(&data).unwrap();
    assert!(headless.rows.iter().all(|row| row.selection_id.is_none()));
}

#[test]
fn empty_series_vectors_fall_back_to_placeholders() {
    let data = quarters_view(json!([]));
    let vm = Transformer::default().transform(&data).unwrap();
    for row in &vm.rows {
        let series = row.series_for("t.trend").unwrap();
        assert!(series.is_placeholder());
        assert_eq!(series.len(), 8);
    }
}

#[test]
fn table_rows_take_precedence_over_categorical_data() {
    let mut data = quarters_view(json!([1, 2]));
    data.metadata = serde_json::from_value(json!({"columns": [
        {"queryName": "t.total", "displayName": "Total", "roles": {"value": true}},
    ]}))
    .unwrap();
    data.table = Some(serde_json::from_value(json!({"rows": [[7]]})).unwrap());
    assert_eq!(data.shape(), Some(SourceShape::Table));

    let vm = Transformer::default().transform(&data).unwrap();
    assert_eq!(vm.rows.len(), 1);
    assert_eq!(vm.rows[0].cell_for("t.total"), Some(&CellValue::Number(7.0)));
}

#[test]
fn grouped_series_sharing_a_metadata_index_keep_their_own_vectors() {
    let data: DataView = serde_json::from_value(json!({
        "categorical": {
            "categories": [
                {"source": {"queryName": "t.quarter", "displayName": "Quarter",
                            "roles": {"category": true}, "index": 0},
                 "values": ["Q1", "Q2"]},
            ],
            "values": [
                {"source": {"queryName": "t.east", "displayName": "East",
                            "roles": {"sparklineSeries": true}, "index": 1},
                 "values": [1, 2]},
                {"source": {"queryName": "t.west", "displayName": "West",
                            "roles": {"sparklineSeries": true}, "index": 1},
                 "values": [50, 60]},
            ],
        },
    }))
    .unwrap();
    let vm = Transformer::default().transform(&data).unwrap();

    assert_eq!(vm.sparkline_columns.len(), 2);
    for row in &vm.rows {
        assert_eq!(
            row.series_for("t.east").unwrap().points,
            vec![SeriesPoint::at_index(0, 1.0), SeriesPoint::at_index(1, 2.0)]
        );
        assert_eq!(
            row.series_for("t.west").unwrap().points,
            vec![SeriesPoint::at_index(0, 50.0), SeriesPoint::at_index(1, 60.0)]
        );
    }
}

#[test]
fn explicit_value_index_does_not_shadow_an_unindexed_category() {
    let data: DataView = serde_json::from_value(json!({
        "categorical": {
            "categories": [
                {"source": {"queryName": "t.quarter", "displayName": "Quarter",
                            "roles": {"category": true}},
                 "values": ["Q1", "Q2"]},
            ],
            "values": [
                {"source": {"queryName": "t.trend", "displayName": "Trend",
                            "roles": {"sparklineSeries": true}, "index": 0},
                 "values": [1, 2, 3]},
            ],
        },
    }))
    .unwrap();
    let vm = Transformer::default().transform(&data).unwrap();

    assert_eq!(vm.rows.len(), 2);
    assert_eq!(vm.rows[0].cell_for("t.quarter"), Some(&CellValue::from("Q1")));
    assert_eq!(vm.rows[1].cell_for("t.quarter"), Some(&CellValue::from("Q2")));
    assert_eq!(vm.rows[1].series_for("t.trend").unwrap().len(), 3);
}
