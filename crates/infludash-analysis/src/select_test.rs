use infludash_data::prepare_from_reader;

use super::*;

const HEADER: &str = "Influencer_ID,Name,Category,Followers,Likes,Comments,Shares,Post_Timestamp,Sentiment_Score,Collaboration";

fn dataset(rows: &[&str]) -> Dataset {
    let mut body = String::from(HEADER);
    for row in rows {
        body.push('\n');
        body.push_str(row);
    }
    prepare_from_reader(body.as_bytes())
        .expect("prepare fixture")
        .dataset
}

fn sample() -> Dataset {
    dataset(&[
        "1,Ana,Fashion,1000,50,20,10,2024-01-05 10:00:00,Positive,Yes",
        "2,Ben,Tech,1000,100,50,50,2024-01-06 10:00:00,Neutral,No",
        "3,Cy,Fashion,1000,10,5,5,2024-01-07 10:00:00,Negative,No",
        "4,Ana,Fashion,1000,150,30,20,2024-01-08 10:00:00,Positive,Yes",
        "5,Di,Food,1000,300,100,100,2024-01-09 10:00:00,Positive,No",
    ])
}

/// Twelve influencers with distinct engagement rates 0.01..=0.12.
fn many_influencers() -> Dataset {
    let rows: Vec<String> = (1..=12)
        .map(|i| format!("{i},Inf{i:02},Tech,100,{i},0,0,2024-01-01,Neutral,No"))
        .collect();
    let refs: Vec<&str> = rows.iter().map(String::as_str).collect();
    dataset(&refs)
}

fn bars(spec: &ChartSpec) -> &[BarPoint] {
    match spec {
        ChartSpec::Bar { bars, .. } => bars,
        other => panic!("expected bar chart, got {other:?}"),
    }
}

#[test]
fn every_valid_key_yields_a_real_chart() {
    let ds = sample();
    for key in AnalysisKey::ALL {
        let spec = select(key.as_str(), &ds);
        assert!(!spec.is_invalid(), "{key} produced the invalid placeholder");
        assert!(!spec.title().is_empty());
    }
}

#[test]
fn unknown_keys_yield_the_invalid_placeholder() {
    let ds = sample();
    for key in ["", "stats", "ENGAGEMENT", "top-influencers"] {
        let spec = select(key, &ds);
        assert!(spec.is_invalid(), "{key:?} should be invalid");
        assert_eq!(spec.title(), "Invalid Analysis Type");
    }
}

#[test]
fn statistics_prompt_lists_columns_with_default() {
    let spec = select("statistics", &sample());
    let ChartSpec::StatisticsPrompt {
        columns,
        default_column,
        ..
    } = spec
    else {
        panic!("expected statistics prompt");
    };
    assert_eq!(default_column, "Influencer_ID");
    assert_eq!(columns.first().map(String::as_str), Some("Influencer_ID"));
    assert!(columns.iter().any(|c| c == "Engagement_Rate"));
}

#[test]
fn engagement_histogram_has_fixed_bucket_count_covering_all_rows() {
    let ds = sample();
    let ChartSpec::Histogram { bins, labels } = select("engagement", &ds) else {
        panic!("expected histogram");
    };
    assert_eq!(bins.len(), HISTOGRAM_BINS);
    assert_eq!(bins.iter().map(|b| b.count).sum::<usize>(), ds.len());
    assert_eq!(labels.x_label, "Engagement Rate");
    assert_eq!(labels.y_label, "Frequency");
    // Max value (0.5) lands in the closed last bucket.
    assert!(bins.last().expect("bins").count >= 1);
}

#[test]
fn engagement_histogram_widens_a_degenerate_range() {
    let ds = dataset(&[
        "1,Ana,Fashion,100,1,0,0,2024-01-01,Positive,Yes",
        "2,Ben,Fashion,100,1,0,0,2024-01-01,Positive,Yes",
    ]);
    let ChartSpec::Histogram { bins, .. } = select("engagement", &ds) else {
        panic!("expected histogram");
    };
    assert_eq!(bins.len(), HISTOGRAM_BINS);
    assert_eq!(bins.iter().map(|b| b.count).sum::<usize>(), 2);
    assert!(bins[0].start < 0.01 && bins[HISTOGRAM_BINS - 1].end > 0.01);
}

#[test]
fn engagement_histogram_on_empty_dataset_has_no_bins() {
    let ds = dataset(&[]);
    let ChartSpec::Histogram { bins, .. } = select("engagement", &ds) else {
        panic!("expected histogram");
    };
    assert!(bins.is_empty());
}

#[test]
fn sentiment_proportions_are_ordered_by_frequency() {
    let spec = select("sentiment", &sample());
    let bars = bars(&spec);
    assert_eq!(bars.len(), 3);
    assert_eq!(bars[0].label, "Positive");
    assert!((bars[0].value - 0.6).abs() < 1e-12);
    // Neutral was seen before Negative, both once.
    assert_eq!(bars[1].label, "Neutral");
    assert_eq!(bars[2].label, "Negative");
    let total: f64 = bars.iter().map(|b| b.value).sum();
    assert!((total - 1.0).abs() < 1e-9);
}

#[test]
fn collaboration_means_are_grouped_by_flag() {
    let spec = select("collaboration", &sample());
    let bars = bars(&spec);
    assert_eq!(bars.len(), 2);
    assert_eq!(bars[0].label, "No");
    assert_eq!(bars[1].label, "Yes");
    // Yes: Ana 0.08 and Ana 0.2.
    assert!((bars[1].value - 0.14).abs() < 1e-12);
    // No: 0.2, 0.02, 0.5.
    assert!((bars[0].value - 0.24).abs() < 1e-12);
}

#[test]
fn top_influencers_is_capped_and_sorted_descending() {
    let spec = select("top_influencers", &many_influencers());
    let ChartSpec::Bar {
        bars, orientation, ..
    } = &spec
    else {
        panic!("expected bar chart");
    };
    assert_eq!(*orientation, Orientation::Horizontal);
    assert_eq!(bars.len(), TOP_INFLUENCERS);
    assert!(bars.windows(2).all(|w| w[0].value >= w[1].value));
    assert_eq!(bars[0].label, "Inf12");
    assert!(bars.iter().all(|b| b.label != "Inf01" && b.label != "Inf02"));
}

#[test]
fn top_influencers_averages_repeated_names() {
    let spec = select("top_influencers", &sample());
    let bars = bars(&spec);
    assert_eq!(bars.len(), 4);
    let ana = bars.iter().find(|b| b.label == "Ana").expect("Ana present");
    assert!((ana.value - 0.14).abs() < 1e-12);
    assert_eq!(bars[0].label, "Di");
}

#[test]
fn category_engagement_is_sorted_by_category() {
    let spec = select("category_engagement", &sample());
    let labels: Vec<&str> = bars(&spec).iter().map(|b| b.label.as_str()).collect();
    assert_eq!(labels, vec!["Fashion", "Food", "Tech"]);
}

#[test]
fn category_sentiment_proportions_sum_to_one_per_category() {
    let spec = select("category_sentiment", &sample());
    let ChartSpec::StackedBar {
        categories, series, ..
    } = spec
    else {
        panic!("expected stacked bar");
    };
    assert_eq!(categories, vec!["Fashion", "Food", "Tech"]);
    let names: Vec<&str> = series.iter().map(|s| s.name.as_str()).collect();
    assert_eq!(names, vec!["Negative", "Neutral", "Positive"]);

    for (i, category) in categories.iter().enumerate() {
        let sum: f64 = series.iter().map(|s| s.values[i]).sum();
        assert!((sum - 1.0).abs() < 1e-9, "{category} sums to {sum}");
    }

    // Fashion: 2 Positive, 1 Negative; Neutral absent -> 0.
    let neutral = &series[1];
    assert!(neutral.values[0].abs() < f64::EPSILON);
    let positive = &series[2];
    assert!((positive.values[0] - 2.0 / 3.0).abs() < 1e-12);
}

fn numeric_sentiments() -> Dataset {
    dataset(&[
        "1,Ana,Fashion,1000,50,20,10,2024-01-05,0.5,Yes",
        "2,Ben,Fashion,1000,50,20,10,2024-01-05,0.50,No",
        "3,Cy,Tech,1000,50,20,10,2024-01-05,10,No",
        "4,Di,Tech,1000,50,20,10,2024-01-05,9,No",
        "5,Ed,Food,1000,50,20,10,2024-01-05,-0.2,Yes",
        "6,Flo,Food,1000,50,20,10,2024-01-05,-0.5,No",
    ])
}

#[test]
fn numeric_sentiment_spellings_share_a_group() {
    let spec = select("sentiment", &numeric_sentiments());
    let bars = bars(&spec);
    assert_eq!(bars.len(), 5);
    assert_eq!(bars[0].label, "0.5");
    assert!((bars[0].value - 2.0 / 6.0).abs() < 1e-12);
    // Singletons keep first-seen order.
    let rest: Vec<&str> = bars[1..].iter().map(|b| b.label.as_str()).collect();
    assert_eq!(rest, vec!["10", "9", "-0.2", "-0.5"]);
}

#[test]
fn numeric_sentiment_series_are_in_numeric_order() {
    let ChartSpec::StackedBar {
        categories, series, ..
    } = select("category_sentiment", &numeric_sentiments())
    else {
        panic!("expected stacked bar");
    };
    assert_eq!(categories, vec!["Fashion", "Food", "Tech"]);
    let names: Vec<&str> = series.iter().map(|s| s.name.as_str()).collect();
    assert_eq!(names, vec!["-0.5", "-0.2", "0.5", "9", "10"]);

    // Fashion holds both spellings of 0.5.
    assert!((series[2].values[0] - 1.0).abs() < f64::EPSILON);
    for (i, category) in categories.iter().enumerate() {
        let sum: f64 = series.iter().map(|s| s.values[i]).sum();
        assert!((sum - 1.0).abs() < 1e-9, "{category} sums to {sum}");
    }
}

#[test]
fn mixed_sentiment_column_groups_by_text() {
    let ds = dataset(&[
        "1,Ana,Fashion,1000,50,20,10,2024-01-05,0.5,Yes",
        "2,Ben,Fashion,1000,50,20,10,2024-01-05,0.50,No",
        "3,Cy,Tech,1000,50,20,10,2024-01-05,Positive,No",
    ]);
    let spec = select("sentiment", &ds);
    let labels: Vec<&str> = bars(&spec).iter().map(|b| b.label.as_str()).collect();
    assert_eq!(labels, vec!["0.5", "0.50", "Positive"]);
}
