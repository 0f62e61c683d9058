//! Integration tests for Forage

mod cli_tests {
    use assert_cmd::{cargo::cargo_bin_cmd, Command};
    use predicates::prelude::*;
    use tempfile::TempDir;

    fn forage() -> Command {
        let mut cmd = cargo_bin_cmd!("forage");
        cmd.env_remove("FORAGE_API_KEY");
        cmd.env_remove("FORAGE_CONFIG");
        cmd
    }

    /// Write a config file pointing the cache at a temp database.
    fn temp_config(temp: &TempDir) -> std::path::PathBuf {
        let config_path = temp.path().join("config.toml");
        let db_path = temp.path().join("recipes.db");
        std::fs::write(
            &config_path,
            format!("[cache]\ndb_file = \"{}\"\n", db_path.display()),
        )
        .unwrap();
        config_path
    }

    #[test]
    fn help_displays() {
        forage()
            .arg("--help")
            .assert()
            .success()
            .stdout(predicate::str::contains("recipe search with a local query cache"));
    }

    #[test]
    fn version_displays() {
        forage()
            .arg("--version")
            .assert()
            .success()
            .stdout(predicate::str::contains("forage"));
    }

    #[test]
    fn find_requires_ingredients() {
        forage().arg("find").assert().failure();
    }

    #[test]
    fn find_without_api_key_fails_with_hint() {
        let temp = TempDir::new().unwrap();
        let config = temp_config(&temp);

        forage()
            .args(["--config", config.to_str().unwrap(), "find", "banana"])
            .assert()
            .failure()
            .stderr(predicate::str::contains("No API key configured"))
            .stderr(predicate::str::contains("config set api.key"));
    }

    #[test]
    fn cache_list_empty() {
        let temp = TempDir::new().unwrap();
        let config = temp_config(&temp);

        forage()
            .args(["--config", config.to_str().unwrap(), "cache", "list"])
            .assert()
            .success()
            .stdout(predicate::str::contains("No cached queries."));
    }

    #[test]
    fn cache_clear_missing_database() {
        let temp = TempDir::new().unwrap();
        let config = temp_config(&temp);

        forage()
            .args(["--config", config.to_str().unwrap(), "cache", "clear", "--yes"])
            .assert()
            .success()
            .stdout(predicate::str::contains("No cache database to clear."));
    }

    #[test]
    fn config_path_honors_flag() {
        let temp = TempDir::new().unwrap();
        let config = temp_config(&temp);

        forage()
            .args(["--config", config.to_str().unwrap(), "config", "path"])
            .assert()
            .success()
            .stdout(predicate::str::contains("config.toml"));
    }

    #[test]
    fn config_show_prints_sections() {
        let temp = TempDir::new().unwrap();
        let config = temp_config(&temp);

        forage()
            .args(["--config", config.to_str().unwrap(), "config", "show"])
            .assert()
            .success()
            .stdout(predicate::str::contains("[api]"))
            .stdout(predicate::str::contains("[search]"));
    }

    #[test]
    fn config_set_then_show_round_trips() {
        let temp = TempDir::new().unwrap();
        let config = temp_config(&temp);

        forage()
            .args([
                "--config",
                config.to_str().unwrap(),
                "config",
                "set",
                "api.key",
                "integration-key",
            ])
            .assert()
            .success();

        forage()
            .args(["--config", config.to_str().unwrap(), "config", "show"])
            .assert()
            .success()
            .stdout(predicate::str::contains("integration-key"));
    }

    #[test]
    fn invalid_config_is_reported() {
        let temp = TempDir::new().unwrap();
        let config = temp.path().join("config.toml");
        std::fs::write(&config, "not = [valid").unwrap();

        forage()
            .args(["--config", config.to_str().unwrap(), "cache", "list"])
            .assert()
            .failure()
            .stderr(predicate::str::contains("Invalid configuration"));
    }
}
