//! Field table and construction behavior shared by every entity.

use chartjs_schema::model::{to_camel_case, FieldDefault, FieldSpec};
use chartjs_schema::{
    from_value, serialize_with_options, value, Chart, Data, Dataset, DatasetData, Defaults,
    Error, Exclude, FromValue, Layout, Legend, LegendLabel, Model, Options, Plugins, Point,
    SerializeOptions, Title, ToValue, Value, XValue,
};

fn tables() -> Vec<(&'static str, &'static [FieldSpec])> {
    vec![
        (Title::NAME, Title::FIELDS),
        (Layout::NAME, Layout::FIELDS),
        (Legend::NAME, Legend::FIELDS),
        (LegendLabel::NAME, LegendLabel::FIELDS),
        (Dataset::NAME, Dataset::FIELDS),
        (Data::NAME, Data::FIELDS),
        (Options::NAME, Options::FIELDS),
        (Defaults::NAME, Defaults::FIELDS),
        (Chart::NAME, Chart::FIELDS),
    ]
}

#[test]
fn test_aliases_are_camel_case_names() {
    for (model, fields) in tables() {
        for field in fields {
            assert_eq!(field.alias, to_camel_case(field.name), "{}.{}", model, field.name);
        }
    }
}

#[test]
fn test_only_the_callback_is_skipped() {
    let skipped: Vec<_> = tables()
        .into_iter()
        .flat_map(|(model, fields)| {
            fields
                .iter()
                .filter(|f| !f.serializable)
                .map(move |f| (model, f.name))
        })
        .collect();
    assert_eq!(skipped, vec![("Options", "on_resize")]);
}

#[test]
fn test_required_fields() {
    let required: Vec<_> = tables()
        .into_iter()
        .flat_map(|(model, fields)| {
            fields
                .iter()
                .filter(|f| f.is_required())
                .map(move |f| (model, f.name))
        })
        .collect();
    assert_eq!(
        required,
        vec![
            ("Dataset", "data"),
            ("Data", "datasets"),
            ("Options", "plugins"),
            ("Chart", "data"),
        ]
    );
}

#[test]
fn test_table_defaults_match_constructed_defaults() {
    let options = SerializeOptions::all_fields();
    let check = |name: &str, fields: &[FieldSpec], dumped: Value| {
        for field in fields {
            let Some(default) = field.default.to_value() else {
                continue;
            };
            assert_eq!(dumped.get(field.alias), Some(&default), "{}.{}", name, field.name);
        }
    };
    check("Title", Title::FIELDS, Title::new().to_value(&options).unwrap());
    check("Layout", Layout::FIELDS, Layout::new().to_value(&options).unwrap());
    check("Legend", Legend::FIELDS, Legend::new().to_value(&options).unwrap());
    check(
        "LegendLabel",
        LegendLabel::FIELDS,
        LegendLabel::new().to_value(&options).unwrap(),
    );
    check(
        "Dataset",
        Dataset::FIELDS,
        Dataset::new(vec![1]).to_value(&options).unwrap(),
    );
    check(
        "Options",
        Options::FIELDS,
        Options::new(Plugins::new()).to_value(&options).unwrap(),
    );
    check("Defaults", Defaults::FIELDS, Defaults::new().to_value(&options).unwrap());
}

#[test]
fn test_default_kinds() {
    assert_eq!(FieldDefault::Required.to_value(), None);
    assert_eq!(FieldDefault::Absent.to_value(), None);
    assert_eq!(FieldDefault::EmptyList.to_value(), Some(value!([])));
    assert_eq!(FieldDefault::Str("butt").to_value(), Some(Value::from("butt")));
}

#[test]
fn test_exclusion_policies() {
    let dataset = Dataset::new(vec![1])
        .with_label("Sleep")
        .with_tension(0.0)
        .with_border_cap_style("round");

    let defaults = serialize_with_options(&dataset, &SerializeOptions::new()).unwrap();
    assert_eq!(
        defaults,
        value!({ "label": "Sleep", "borderCapStyle": "round", "data": [1] })
    );

    let unset = serialize_with_options(
        &dataset,
        &SerializeOptions::new().with_exclude(Exclude::Unset),
    )
    .unwrap();
    assert_eq!(
        unset,
        value!({ "label": "Sleep", "borderCapStyle": "round", "data": [1], "tension": 0.0 })
    );

    let all = serialize_with_options(&dataset, &SerializeOptions::all_fields()).unwrap();
    let keys: Vec<&str> = all.as_object().unwrap().keys().map(String::as_str).collect();
    // fill is optional and unset, so it stays out even here
    assert_eq!(
        keys,
        vec![
            "label",
            "borderColor",
            "borderCapStyle",
            "backgroundColor",
            "borderDash",
            "borderDashOffset",
            "data",
            "tension"
        ]
    );
}

#[test]
fn test_scalar_coercion() {
    let title: Title = from_value(&value!({ "padding": 12.0 })).unwrap();
    assert_eq!(title.padding(), 12);

    let err = from_value::<Title>(&value!({ "padding": 12.5 })).unwrap_err();
    assert_eq!(
        err.to_string(),
        "Invalid value for field 'padding': expected integer, found number 12.5"
    );

    let err = from_value::<Title>(&value!({ "padding": "12" })).unwrap_err();
    assert!(matches!(err, Error::SchemaValidation { .. }));

    let err = from_value::<Legend>(&value!({ "display": 1 })).unwrap_err();
    assert!(matches!(err, Error::SchemaValidation { ref expected, .. } if expected == "boolean"));
}

#[test]
fn test_enum_fields_reject_unknown_tags() {
    let err = from_value::<Chart>(&value!({ "type": "scatter", "data": { "datasets": [] } }))
        .unwrap_err();
    assert_eq!(err, Error::unknown_enum_value("ChartType", "scatter"));

    let title: Title = from_value(&value!({ "position": "LEFT" })).unwrap();
    assert_eq!(title.position().as_str(), "left");
}

#[test]
fn test_color_fields_accept_every_spelling() {
    for input in [
        value!("#ff000080"),
        value!("rgba(255, 0, 0, 0.5)"),
        value!([255, 0, 0, 0.5]),
    ] {
        let defaults: Defaults = from_value(&value!({ "color": input })).unwrap();
        assert_eq!(defaults.color().as_hex(), "#ff000080");
    }

    let err = from_value::<Defaults>(&value!({ "color": "blurple" })).unwrap_err();
    assert!(matches!(err, Error::InvalidColor { .. }));
}

#[test]
fn test_dataset_shapes_from_input() {
    let cases = [
        (value!([1, 2.5]), "primitive"),
        (value!([[0, 1], [1, null]]), "indexed"),
        (value!([{ "x": 1, "y": null }]), "objects"),
        (value!([{ "x": 1, "y": 2, "r": 3 }]), "generic"),
        (value!([]), "primitive"),
    ];
    for (input, shape) in cases {
        let data = DatasetData::from_value(&input).unwrap();
        assert_eq!(data.shape_name(), shape, "input {}", input);
    }
}

#[test]
fn test_points_built_in_code() {
    let date = chrono::NaiveDate::from_ymd_opt(2025, 8, 11).unwrap();
    let data = DatasetData::points([Point::new(date, 2), Point::at("later")]);
    assert_eq!(
        data.to_value(&SerializeOptions::new()).unwrap(),
        value!([{ "x": "2025-08-11", "y": 2 }, { "x": "later", "y": null }])
    );
    assert_eq!(Point::new(1.5, 2).x, XValue::from(1.5));
}

#[test]
fn test_bad_dataset_reports_field() {
    let err = from_value::<Data>(&value!({ "datasets": [{ "data": [true] }] })).unwrap_err();
    assert!(matches!(err, Error::ElementValidation { .. }));
    assert!(err.to_string().contains("'datasets'"));
}
