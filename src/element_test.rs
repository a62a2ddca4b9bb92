use serde_json::json;

use super::*;

fn option(id: &str, label: &str) -> ChoiceOption {
    ChoiceOption { id: id.to_owned(), label: label.to_owned(), value: label.to_lowercase(), is_correct: false }
}

fn choice_column(id: &str) -> ColumnElement {
    Element {
        id: id.to_owned(),
        label: "Pick one".to_owned(),
        required: false,
        body: Field::MultipleChoice { options: vec![option(&format!("{id}-a"), "A"), option(&format!("{id}-b"), "B")] },
    }
}

fn container(id: &str, columns: Vec<ColumnElement>) -> FormElement {
    Element { id: id.to_owned(), label: "Two Columns".to_owned(), required: false, body: Body::Columns(Columns::Two { columns }) }
}

// =============================================================
// ElementType
// =============================================================

#[test]
fn element_type_wire_names() {
    let cases = [
        (ElementType::TextInput, "\"text-input\""),
        (ElementType::NumberInput, "\"number-input\""),
        (ElementType::DateInput, "\"date-input\""),
        (ElementType::MultipleChoice, "\"multiple-choice\""),
        (ElementType::CheckboxGroup, "\"checkbox-group\""),
        (ElementType::ImageInput, "\"image-input\""),
        (ElementType::ImageDisplay, "\"image-display\""),
        (ElementType::Header, "\"header\""),
        (ElementType::Columns2, "\"columns-2\""),
        (ElementType::Columns3, "\"columns-3\""),
        (ElementType::Columns4, "\"columns-4\""),
    ];
    for (ty, expected) in cases {
        assert_eq!(serde_json::to_string(&ty).unwrap(), expected);
        assert_eq!(format!("\"{ty}\""), expected);
    }
}

#[test]
fn element_type_from_str_matches_as_str() {
    for ty in ElementType::ALL {
        assert_eq!(ty.as_str().parse::<ElementType>().unwrap(), ty);
    }
}

#[test]
fn element_type_from_str_rejects_unknown() {
    let err = "signature-pad".parse::<ElementType>().unwrap_err();
    assert!(matches!(err, FormError::UnknownElementType(ref name) if name == "signature-pad"));
}

#[test]
fn element_type_column_counts() {
    assert_eq!(ElementType::Columns2.column_count(), Some(2));
    assert_eq!(ElementType::Columns3.column_count(), Some(3));
    assert_eq!(ElementType::Columns4.column_count(), Some(4));
    assert_eq!(ElementType::Header.column_count(), None);
    assert!(ElementType::Columns4.is_container());
    assert!(!ElementType::CheckboxGroup.is_container());
}

// =============================================================
// Serde shape
// =============================================================

#[test]
fn field_element_serializes_flat_with_type_tag() {
    let element: FormElement = Element {
        id: "e1".to_owned(),
        label: "Name".to_owned(),
        required: true,
        body: Body::Field(Field::TextInput { placeholder: Some("Enter text...".to_owned()) }),
    };
    let value = serde_json::to_value(&element).unwrap();
    assert_eq!(
        value,
        json!({
            "id": "e1",
            "label": "Name",
            "required": true,
            "type": "text-input",
            "placeholder": "Enter text...",
        })
    );
}

#[test]
fn image_display_uses_camel_case_url() {
    let element: FormElement = Element {
        id: "img".to_owned(),
        label: "Image".to_owned(),
        required: false,
        body: Body::Field(Field::ImageDisplay { image_url: Some("https://example.test/a.png".to_owned()) }),
    };
    let value = serde_json::to_value(&element).unwrap();
    assert_eq!(value["imageUrl"], "https://example.test/a.png");
    assert_eq!(value["type"], "image-display");
}

#[test]
fn option_is_correct_uses_camel_case() {
    let value = serde_json::to_value(option("o1", "A")).unwrap();
    assert_eq!(value, json!({"id": "o1", "label": "A", "value": "a", "isCorrect": false}));
}

#[test]
fn container_deserializes_nested_columns() {
    let raw = json!({
        "id": "row",
        "label": "Three Columns",
        "required": false,
        "type": "columns-3",
        "columns": [
            {"id": "c1", "label": "Date", "required": false, "type": "date-input"},
            {"id": "c2", "label": "Header", "required": false, "type": "header"},
        ],
    });
    let element: FormElement = serde_json::from_value(raw).unwrap();
    assert_eq!(element.element_type(), ElementType::Columns3);
    let columns = element.columns().unwrap();
    assert_eq!(columns.len(), 2);
    assert_eq!(columns[0].element_type(), ElementType::DateInput);
    assert_eq!(columns[1].id, "c2");
}

#[test]
fn nested_container_is_rejected() {
    let raw = json!({
        "id": "row",
        "label": "Two Columns",
        "type": "columns-2",
        "columns": [
            {"id": "inner", "label": "Two Columns", "type": "columns-2", "columns": []},
        ],
    });
    assert!(serde_json::from_value::<FormElement>(raw).is_err());
}

#[test]
fn columns_key_on_field_is_dropped() {
    let raw = json!({
        "id": "t",
        "label": "Text",
        "type": "text-input",
        "columns": [{"id": "x", "label": "Date", "type": "date-input"}],
    });
    let element: FormElement = serde_json::from_value(raw).unwrap();
    assert!(element.columns().is_none());
    assert!(serde_json::to_value(&element).unwrap().get("columns").is_none());
}

#[test]
fn unknown_type_is_rejected() {
    let raw = json!({"id": "x", "label": "?", "type": "signature-pad"});
    assert!(serde_json::from_value::<FormElement>(raw).is_err());
}

#[test]
fn required_defaults_to_false() {
    let raw = json!({"id": "h", "label": "Section Header", "type": "header"});
    let element: FormElement = serde_json::from_value(raw).unwrap();
    assert!(!element.required);
}

#[test]
fn container_roundtrip_preserves_tree() {
    let element = container("row", vec![choice_column("c1")]);
    let json = serde_json::to_string(&element).unwrap();
    let back: FormElement = serde_json::from_str(&json).unwrap();
    assert_eq!(back, element);
}

// =============================================================
// Patches
// =============================================================

#[test]
fn patch_updates_common_fields() {
    let mut element = choice_column("c1");
    let patch = ElementPatch { label: Some("Favourite".to_owned()), required: Some(true), ..Default::default() };
    assert!(element.apply_patch(&patch));
    assert_eq!(element.label, "Favourite");
    assert!(element.required);
}

#[test]
fn patch_ignores_fields_the_type_does_not_own() {
    let mut element = choice_column("c1");
    let before = element.clone();
    let patch = ElementPatch {
        placeholder: Some("nope".to_owned()),
        image_url: Some("https://example.test".to_owned()),
        columns: Some(vec![]),
        ..Default::default()
    };
    assert!(!element.apply_patch(&patch));
    assert_eq!(element, before);
}

#[test]
fn patch_replaces_options_wholesale() {
    let mut element = choice_column("c1");
    let patch = ElementPatch { options: Some(vec![option("z", "Z")]), ..Default::default() };
    assert!(element.apply_patch(&patch));
    assert_eq!(element.options().unwrap(), &[option("z", "Z")]);
}

#[test]
fn patch_replaces_container_columns() {
    let mut element = container("row", vec![]);
    let patch = ElementPatch { columns: Some(vec![choice_column("c9")]), ..Default::default() };
    assert!(element.apply_patch(&patch));
    assert_eq!(element.columns().unwrap()[0].id, "c9");
}

#[test]
fn patch_deserializes_camel_case() {
    let patch: ElementPatch = serde_json::from_value(json!({"imageUrl": "u", "required": true})).unwrap();
    assert_eq!(patch.image_url.as_deref(), Some("u"));
    assert_eq!(patch.required, Some(true));
    assert!(patch.label.is_none());
}

#[test]
fn empty_patch_touches_nothing() {
    let mut element = choice_column("c1");
    assert!(!element.apply_patch(&ElementPatch::default()));
}

// =============================================================
// Duplicate and keys
// =============================================================

#[test]
fn keys_walk_options_and_columns() {
    let element = container("row", vec![choice_column("c1")]);
    assert_eq!(element.keys(), vec!["row", "c1", "c1-a", "c1-b"]);
}

#[test]
fn duplicate_rekeys_every_descendant() {
    let element = container("row", vec![choice_column("c1"), choice_column("c2")]);
    let copy = element.duplicate();

    let original_keys = element.keys();
    for key in copy.keys() {
        assert!(!original_keys.contains(&key), "key {key} shared with original");
    }
    assert_eq!(copy.label, "Two Columns (Copy)");
}

#[test]
fn duplicate_keeps_nested_labels() {
    let element = container("row", vec![choice_column("c1")]);
    let copy = element.duplicate();
    let column = &copy.columns().unwrap()[0];
    assert_eq!(column.label, "Pick one");
    assert_eq!(column.options().unwrap()[0].label, "A");
}

#[test]
fn duplicate_keeps_option_values_and_flags() {
    let mut element = choice_column("c1");
    if let Field::MultipleChoice { options } = &mut element.body {
        options[1].is_correct = true;
    }
    let copy = element.duplicate();
    let copied = copy.options().unwrap();
    assert_eq!(copied[0].value, "a");
    assert!(copied[1].is_correct);
}
