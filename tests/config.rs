use price_chart_annotate::domain::chart::ChartConfig;

#[test]
fn partial_json_keeps_defaults() {
    let config = ChartConfig::from_json(r#"{"x_ticks":6,"zoom":{"max_scale":4.0}}"#).expect("valid config");
    let defaults = ChartConfig::default();

    assert_eq!(config.x_ticks, 6);
    assert_eq!(config.y_ticks, defaults.y_ticks);
    assert_eq!(config.zoom.max_scale, 4.0);
    assert_eq!(config.zoom.min_scale, defaults.zoom.min_scale);
    assert_eq!(config.margin, defaults.margin);
    assert_eq!(config.palette, defaults.palette);
}

#[test]
fn empty_object_is_the_default() {
    assert_eq!(ChartConfig::from_json("{}").expect("valid config"), ChartConfig::default());
}

#[test]
fn inverted_zoom_bounds_are_rejected() {
    assert!(ChartConfig::from_json(r#"{"zoom":{"min_scale":5.0,"max_scale":2.0}}"#).is_err());
    assert!(ChartConfig::from_json(r#"{"zoom":{"min_scale":0.0}}"#).is_err());
    assert!(ChartConfig::from_json(r#"{"zoom":{"zoom_in_factor":-1.0}}"#).is_err());
}

#[test]
fn malformed_json_is_an_error() {
    assert!(ChartConfig::from_json("{x_ticks:").is_err());
}
