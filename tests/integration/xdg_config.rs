//! Integration tests for XDG configuration and data locations

use pamsh::config::{self, ConfigLoader};
use pamsh::logging::default_log_file;
use tempfile::TempDir;

use crate::integration::with_xdg_env;

#[test]
fn test_default_paths_follow_xdg() {
    let test_dir = TempDir::new().unwrap();
    with_xdg_env(&test_dir, || {
        let config_home = test_dir.path().join("config");
        let data_home = test_dir.path().join("data");

        assert_eq!(
            ConfigLoader::default_path().unwrap(),
            config_home.join("pamsh").join("config.toml")
        );
        assert_eq!(
            config::history_file().unwrap(),
            data_home.join("pamsh").join("history.txt")
        );
        assert_eq!(
            default_log_file().unwrap(),
            data_home.join("pamsh").join("pamsh.log")
        );
    });
}

#[test]
fn test_load_without_global_file_uses_defaults() {
    let test_dir = TempDir::new().unwrap();
    with_xdg_env(&test_dir, || {
        let config = ConfigLoader::load().unwrap();
        assert_eq!(config, config::ShellConfig::default());
    });
}

#[test]
fn test_load_reads_global_file() {
    let test_dir = TempDir::new().unwrap();
    with_xdg_env(&test_dir, || {
        let path = ConfigLoader::default_path().unwrap();
        std::fs::create_dir_all(path.parent().unwrap()).unwrap();
        std::fs::write(&path, "server = \"https://global.test\"\noutput_format = \"json\"\n")
            .unwrap();

        let config = ConfigLoader::load().unwrap();
        assert_eq!(config.server, "https://global.test");
        assert_eq!(config.output_format, "json");
    });
}
