//! Tests for layered settings loading

use optree::config::Settings;

#[test]
fn given_env_override_when_loading_then_it_wins_over_defaults() {
    // Single test for both default and override so the env mutation cannot
    // race a parallel test thread.
    let base = Settings::load().unwrap();
    assert!(!base.pause);
    assert!(!base.echo_steps);

    std::env::set_var("OPTREE_PAUSE", "true");
    let overridden = Settings::load();
    std::env::remove_var("OPTREE_PAUSE");

    let overridden = overridden.unwrap();
    assert!(overridden.pause);
    assert!(!overridden.echo_steps);
}

#[test]
fn given_default_settings_when_serializing_then_toml_lists_keys() {
    let rendered = Settings::default().to_toml().unwrap();
    assert!(rendered.contains("echo_steps"));
    assert!(rendered.contains("pause"));
}

#[test]
fn given_project_dirs_when_resolving_then_config_file_is_named() {
    let path = Settings::global_config_path().unwrap();
    assert!(path.ends_with("optree.toml"));
}
