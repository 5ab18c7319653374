use slidesmith_core::chart::{self, RenderOptions};
use slidesmith_core::sample::{self, SampleKind, SampleSeries};

const PNG_MAGIC: [u8; 8] = [0x89, b'P', b'N', b'G', 0x0D, 0x0A, 0x1A, 0x0A];

fn small() -> RenderOptions {
    RenderOptions {
        title: "Chart".to_string(),
        x_label: "X".to_string(),
        y_label: "Y".to_string(),
        width: 320,
        height: 240,
    }
}

#[test]
fn every_chart_kind_renders_a_png() {
    let opts = small();
    let categories = vec!["A".to_string(), "B".to_string(), "C".to_string()];
    let values = vec![3.0, 1.5, 4.25];
    let x = vec![0.0, 1.0, 2.0, 3.0];
    let y = vec![1.0, 0.5, 2.5, 2.0];

    let outputs = vec![
        chart::render_bar(&categories, &values, &opts).expect("bar"),
        chart::render_line(&x, &y, &opts).expect("line"),
        chart::render_scatter(&x, &y, &opts).expect("scatter"),
        chart::render_pie(&categories, &values, &opts).expect("pie"),
        chart::render_heatmap(
            &[vec![1.0, 2.0], vec![3.0, 4.0]],
            Some(&categories[..2]),
            None,
            &opts,
        )
        .expect("heatmap"),
        chart::render_histogram(&y, Some(4), &opts).expect("histogram"),
        chart::render_scatter_matrix(
            &[("x".to_string(), x.clone()), ("y".to_string(), y.clone())],
            &opts,
        )
        .expect("scatter matrix"),
    ];

    for png in outputs {
        assert_eq!(&png[..8], &PNG_MAGIC);
    }
}

#[test]
fn generated_series_feed_straight_into_charts() {
    let opts = small();
    match sample::generate(SampleKind::SineWave, 32, Some(11)) {
        SampleSeries::Xy { x, y } => {
            let png = chart::render_line(&x, &y, &opts).expect("line from sample");
            assert_eq!(&png[..8], &PNG_MAGIC);
        }
        other => panic!("unexpected series: {other:?}"),
    }
    match sample::generate(SampleKind::Categories, 4, Some(11)) {
        SampleSeries::Categorical { categories, values } => {
            let png = chart::render_bar(&categories, &values, &opts).expect("bar from sample");
            assert_eq!(&png[..8], &PNG_MAGIC);
        }
        other => panic!("unexpected series: {other:?}"),
    }
}

#[test]
fn constant_series_still_render() {
    let opts = small();
    let png = chart::render_line(&[1.0, 2.0, 3.0], &[5.0, 5.0, 5.0], &opts).expect("flat line");
    assert_eq!(&png[..8], &PNG_MAGIC);
}
