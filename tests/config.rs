//! Declarative serializer configs resolved into working serializers.

use crud_starter::sample::{sample_calculations, thing_show_serializer};
use crud_starter::{load_from_path, resolve, CalculationRegistry, ConfigError, SerializerConfig};
use serde_json::json;

fn sample_path() -> std::path::PathBuf {
    std::path::Path::new(env!("CARGO_MANIFEST_DIR")).join("config/serializers.sample.json")
}

#[test]
fn sample_configs_match_hand_built_serializers() {
    let configs = load_from_path(sample_path()).unwrap();
    let set = resolve(&configs, &sample_calculations()).unwrap();
    assert_eq!(set.len(), 3);

    let input = json!({
        "name": "t_1",
        "category": { "name": "c_1", "things": [{ "name": "t_2" }] }
    });
    let from_config = set.get("thing_show").unwrap().serialize(&input);
    let by_hand = thing_show_serializer().unwrap().serialize(&input);
    assert_eq!(from_config, by_hand);
    assert_eq!(from_config["category"]["things"][0]["reverseName"], json!("2_t"));
}

#[test]
fn missing_function_registry_fails_resolution() {
    let configs = load_from_path(sample_path()).unwrap();
    let err = resolve(&configs, &CalculationRegistry::new()).unwrap_err();
    assert!(matches!(err, ConfigError::MissingReference { kind: "function", ref id } if id == "reverse_name"));
}

#[test]
fn transitive_cycle_is_rejected() {
    let configs: Vec<SerializerConfig> = serde_json::from_value(json!([
        { "id": "a", "collection_name": "as",
          "meta": [{ "key": "b", "kind": "nested", "source": "b", "serializer": "b" }] },
        { "id": "b", "collection_name": "bs",
          "meta": [{ "key": "a", "kind": "nested", "source": "a", "serializer": "a" }] }
    ]))
    .unwrap();
    let err = resolve(&configs, &CalculationRegistry::new()).unwrap_err();
    assert!(matches!(err, ConfigError::CyclicReference(_)));
}

#[test]
fn nested_without_source_is_rejected() {
    let configs: Vec<SerializerConfig> = serde_json::from_value(json!([
        { "id": "a", "collection_name": "as",
          "meta": [{ "key": "b", "kind": "nested", "serializer": "a" }] }
    ]))
    .unwrap();
    let err = resolve(&configs, &CalculationRegistry::new()).unwrap_err();
    assert!(matches!(err, ConfigError::MissingField { field: "source", .. }));
}

#[test]
fn unreadable_file_is_a_load_error() {
    let err = load_from_path("does/not/exist.json").unwrap_err();
    assert!(matches!(err, ConfigError::Load(_)));
}

#[test]
fn settings_choose_the_config_file() {
    let settings = crud_starter::Settings {
        serializers_path: Some(sample_path()),
        ..Default::default()
    };
    let set = crud_starter::load_configured(&settings, &sample_calculations()).unwrap();
    assert!(set.get("category").is_some());

    let empty = crud_starter::load_configured(&crud_starter::Settings::default(), &sample_calculations()).unwrap();
    assert!(empty.is_empty());
}
