//! Integration tests for lintcache

mod resolve;

mod cli_tests {
    use assert_cmd::{cargo::cargo_bin_cmd, Command};
    use predicates::prelude::*;
    use std::fs;
    use std::path::Path;
    use tempfile::TempDir;

    fn lintcache() -> Command {
        cargo_bin_cmd!("lintcache")
    }

    /// Config pointing at a local source tree and a private store
    fn workspace() -> TempDir {
        let tmp = TempDir::new().unwrap();
        let src = tmp.path().join("src");
        let pkg = src.join("example.com").join("a");
        fs::create_dir_all(&pkg).unwrap();
        fs::write(
            pkg.join("a.go"),
            "package a\n\nfunc Run() {}\n\nfunc helper() {}\n",
        )
        .unwrap();
        fs::write(pkg.join("bad.go"), "func main() {}\n").unwrap();
        fs::write(pkg.join("README.md"), "# not go\n").unwrap();

        let config = format!(
            "[service]\ncontact_email = \"ops@example.com\"\n\n\
             [source]\nprovider = \"local\"\nlocal_root = {:?}\n\n\
             [store]\npath = {:?}\n",
            src.display().to_string(),
            tmp.path().join("store").display().to_string(),
        );
        fs::write(tmp.path().join("config.toml"), config).unwrap();
        tmp
    }

    fn with_config(dir: &Path) -> Command {
        let mut cmd = lintcache();
        cmd.arg("--config").arg(dir.join("config.toml"));
        cmd
    }

    #[test]
    fn help_displays() {
        lintcache()
            .arg("--help")
            .assert()
            .success()
            .stdout(predicate::str::contains("cached lint results"));
    }

    #[test]
    fn version_displays() {
        lintcache()
            .arg("--version")
            .assert()
            .success()
            .stdout(predicate::str::contains("lintcache"));
    }

    #[test]
    fn about_names_contact() {
        let tmp = workspace();
        with_config(tmp.path())
            .arg("about")
            .assert()
            .success()
            .stdout(predicate::str::contains(
                "Contact ops@example.com for help with the lintcache bot.",
            ));
    }

    #[test]
    fn config_path_honors_flag() {
        let tmp = workspace();
        with_config(tmp.path())
            .args(["config", "path"])
            .assert()
            .success()
            .stdout(predicate::str::contains("config.toml"));
    }

    #[test]
    fn config_show() {
        let tmp = workspace();
        with_config(tmp.path())
            .args(["config", "show"])
            .assert()
            .success()
            .stdout(predicate::str::contains("[filter]"))
            .stdout(predicate::str::contains("provider = \"local\""));
    }

    #[test]
    fn show_reports_problems_above_default_threshold() {
        let tmp = workspace();
        with_config(tmp.path())
            .args(["show", "example.com/a"])
            .assert()
            .success()
            .stdout(predicate::str::contains(
                "exported function Run should have comment or be unexported",
            ))
            .stdout(predicate::str::contains("package comment").not())
            .stdout(predicate::str::contains("bad.go").not());
    }

    #[test]
    fn show_min_confidence_lowers_threshold() {
        let tmp = workspace();
        with_config(tmp.path())
            .args(["show", "example.com/a", "--min-confidence", "0"])
            .assert()
            .success()
            .stdout(predicate::str::contains("package comment"))
            .stdout(predicate::str::contains("bad.go:1:1: expected 'package', found 'func'"));
    }

    #[test]
    fn show_json_output() {
        let tmp = workspace();
        let output = with_config(tmp.path())
            .args(["show", "example.com/a", "--format", "json", "-m", "0"])
            .output()
            .unwrap();
        assert!(output.status.success());

        let value: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
        assert_eq!(value["path"], "example.com/a");
        let names: Vec<_> = value["files"]
            .as_array()
            .unwrap()
            .iter()
            .map(|f| f["name"].as_str().unwrap().to_string())
            .collect();
        assert_eq!(names, vec!["a.go", "bad.go"]);
    }

    #[test]
    fn show_missing_package() {
        let tmp = workspace();
        with_config(tmp.path())
            .args(["show", "bogus/pkg"])
            .assert()
            .failure()
            .stderr(predicate::str::contains("Not Found"));
    }

    #[test]
    fn show_bad_path() {
        let tmp = workspace();
        with_config(tmp.path())
            .args(["show", "example.com/../etc"])
            .assert()
            .failure()
            .stderr(predicate::str::contains("Bad Request"));
    }

    #[test]
    fn refresh_then_list() {
        let tmp = workspace();
        with_config(tmp.path())
            .args(["refresh", "example.com/a"])
            .assert()
            .success();

        with_config(tmp.path())
            .args(["store", "list", "--format", "plain"])
            .assert()
            .success()
            .stdout(predicate::str::contains("example.com/a"));
    }

    #[test]
    fn store_clear_requires_confirmation() {
        let tmp = workspace();
        with_config(tmp.path())
            .args(["refresh", "example.com/a"])
            .assert()
            .success();

        with_config(tmp.path())
            .args(["store", "clear"])
            .assert()
            .success()
            .stdout(predicate::str::contains("Store left untouched"));

        with_config(tmp.path())
            .args(["store", "clear", "--yes"])
            .assert()
            .success()
            .stdout(predicate::str::contains("Removed 1 stored result(s)"));
    }

    #[test]
    fn invalid_config_has_hint() {
        let tmp = TempDir::new().unwrap();
        fs::write(tmp.path().join("config.toml"), "[filter]\nmin_confidence = \"x\"\n").unwrap();
        with_config(tmp.path())
            .arg("about")
            .assert()
            .failure()
            .stderr(predicate::str::contains("Hint:"));
    }
}
