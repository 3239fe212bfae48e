// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

use civic_table::{ColumnDef, Record, RowId, TableRow, TableView};
use proptest::prelude::*;

fn columns() -> Vec<ColumnDef> {
    vec![
        ColumnDef::new("id", "ID").sortable().always_visible(),
        ColumnDef::new("name", "Name").sortable(),
        ColumnDef::new("score", "Score").sortable(),
        ColumnDef::new("tag", "Tag"),
    ]
}

fn build_rows(specs: Vec<(String, i64, String)>) -> Vec<Record> {
    specs
        .into_iter()
        .enumerate()
        .map(|(index, (name, score, tag))| {
            let id = index as i64 + 1;
            Record::new(id)
                .with("id", id)
                .with("name", name)
                .with("score", score)
                .with("tag", tag)
        })
        .collect()
}

fn arb_rows() -> impl Strategy<Value = Vec<Record>> {
    prop::collection::vec(("[a-cA-C]{0,4}", 0_i64..8, "[x-z]{1,3}"), 0..40).prop_map(build_rows)
}

fn visible_match(view: &TableView<Record>, row: &Record, query: &str) -> bool {
    let needle = query.to_lowercase();
    view.visible_columns()
        .any(|column| {
            column
                .search_text(&row.cell(column.key))
                .to_lowercase()
                .contains(&needle)
        })
}

fn ids<'a>(rows: impl Iterator<Item = &'a Record>) -> Vec<RowId> {
    rows.map(TableRow::row_id).collect()
}

proptest! {
    #[test]
    fn filtered_rows_are_exactly_the_matching_subset(
        rows in arb_rows(),
        query in "[a-cA-C]{1,2}",
        hide_tag in any::<bool>(),
    ) {
        let mut view = TableView::new(columns(), rows.clone()).expect("valid schema");
        if hide_tag {
            view.toggle_column_visibility("tag")
                .expect("tag is hideable");
        }
        view.set_global_filter(query.clone());

        let kept = ids(view.filtered_rows());
        for row in &rows {
            let matches = visible_match(&view, row, &query);
            prop_assert_eq!(kept.contains(&row.row_id()), matches);
        }
        prop_assert!(kept.len() <= rows.len());
    }

    #[test]
    fn ascending_sort_is_ordered_and_stable(rows in arb_rows()) {
        let mut view = TableView::new(columns(), rows).expect("valid schema");
        view.toggle_sort("score").expect("score is sortable");

        let sorted = view.filtered_rows().collect::<Vec<_>>();
        for pair in sorted.windows(2) {
            let (left, right) = (pair[0], pair[1]);
            let left_score = left.cell("score");
            let right_score = right.cell("score");
            prop_assert!(left_score.cmp_value(&right_score).is_le());
            if left_score == right_score {
                // ids follow input order, so equal keys must keep ascending ids
                prop_assert!(left.row_id() < right.row_id());
            }
        }
    }

    #[test]
    fn pages_concatenate_to_the_filtered_sequence(
        rows in arb_rows(),
        page_size in 1_usize..7,
        query in "[a-c]{0,1}",
        sort_twice in any::<bool>(),
    ) {
        let mut view = TableView::new(columns(), rows)
            .expect("valid schema")
            .with_page_size(page_size)
            .expect("positive page size");
        view.toggle_sort("name").expect("name is sortable");
        if sort_twice {
            view.toggle_sort("name").expect("name is sortable");
        }
        view.set_global_filter(query);

        let expected = ids(view.filtered_rows());
        let mut collected = Vec::new();
        for page in 0..view.page_count() {
            prop_assert_eq!(view.set_page_index(page), page);
            let remaining = expected.len() - page * page_size;
            let page_ids = ids(view.page_rows());
            prop_assert_eq!(page_ids.len(), page_size.min(remaining));
            collected.extend(page_ids);
        }
        prop_assert_eq!(collected, expected);
    }

    #[test]
    fn query_matching_only_a_hidden_column_finds_nothing(rows in arb_rows()) {
        prop_assume!(!rows.is_empty());
        let tag = rows[0].cell("tag").to_string();

        let mut view = TableView::new(columns(), rows).expect("valid schema");
        view.set_global_filter(tag.clone());
        prop_assert!(view.filtered_len() >= 1);

        view.toggle_column_visibility("tag")
            .expect("tag is hideable");
        prop_assert_eq!(view.filtered_len(), 0);
    }

    #[test]
    fn three_sort_toggles_restore_input_order(rows in arb_rows()) {
        let mut view = TableView::new(columns(), rows).expect("valid schema");
        let original = ids(view.filtered_rows());
        for _ in 0..3 {
            view.toggle_sort("name").expect("name is sortable");
        }
        prop_assert_eq!(view.state().sort, None);
        prop_assert_eq!(ids(view.filtered_rows()), original);
    }
}
