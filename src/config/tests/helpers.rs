//! Shared test helpers for configuration tests.

use ortho_config::MergeComposer;
use serde_json::Value;

use crate::PrBotConfig;

/// Every unprefixed variable `resolve` consults.
pub const LEGACY_VARIABLES: [&str; 6] = [
    "GITHUB_APP_CLIENT_ID",
    "GITHUB_APP_PRIVATE_KEY_PATH",
    "MESSAGE_PATH",
    "STATUS_FILE",
    "REPO_NAME",
    "AUTO_CLOSE",
];

/// Applies a configuration layer to the composer based on the layer type.
pub fn apply_layer(composer: &mut MergeComposer, layer_type: &str, value: Value) {
    match layer_type {
        "defaults" => composer.push_defaults(value),
        "file" => composer.push_file(value, None),
        "environment" => composer.push_environment(value),
        "cli" => composer.push_cli(value),
        _ => panic!("unknown layer type: {layer_type}"),
    }
}

/// Composes a [`PrBotConfig`] from a sequence of `(layer_type, value)` pairs.
pub fn build_config_from_layers(layers: &[(&str, Value)]) -> PrBotConfig {
    let mut composer = MergeComposer::new();

    for (layer_type, value) in layers {
        apply_layer(&mut composer, layer_type, value.clone());
    }

    PrBotConfig::merge_from_layers(composer.layers()).expect("merge should succeed")
}

/// A configuration with every required value set.
pub fn complete_config() -> PrBotConfig {
    PrBotConfig {
        client_id: Some("Iv1.abc".to_owned()),
        private_key_path: Some("/etc/prbot/app.pem".to_owned()),
        message_path: Some("/etc/prbot/message.j2".to_owned()),
        status_file: Some("/var/lib/prbot/state.json".to_owned()),
        repo_name: Some("example-org/linux".to_owned()),
        ..PrBotConfig::default()
    }
}
