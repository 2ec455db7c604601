use pokergym_cli::run;
use serial_test::serial;
use std::fs;

/// Sets environment variables for the life of the guard.
struct EnvGuard {
    restores: Vec<(String, Option<String>)>,
}

impl EnvGuard {
    fn apply(pairs: &[(&str, &str)]) -> Self {
        let mut restores = Vec::new();
        for (key, value) in pairs {
            let previous = std::env::var(key).ok();
            // SAFETY: every test touching the environment runs under #[serial]
            unsafe { std::env::set_var(key, value) };
            restores.push((key.to_string(), previous));
        }
        EnvGuard { restores }
    }
}

impl Drop for EnvGuard {
    fn drop(&mut self) {
        for (key, previous) in self.restores.iter().rev() {
            // SAFETY: see `apply`
            unsafe {
                match previous {
                    Some(val) => std::env::set_var(key, val),
                    None => std::env::remove_var(key),
                }
            }
        }
    }
}

fn cfg_json() -> (i32, serde_json::Value, String) {
    let mut out = Vec::new();
    let mut err = Vec::new();
    let code = run(["pokergym", "cfg"], &mut out, &mut err);
    let v = serde_json::from_slice(&out).unwrap_or(serde_json::Value::Null);
    (code, v, String::from_utf8_lossy(&err).into_owned())
}

#[test]
#[serial]
fn defaults_report_default_source() {
    let _g = EnvGuard::apply(&[
        ("POKERGYM_CONFIG", ""),
        ("POKERGYM_SEED", ""),
        ("POKERGYM_SEATS", ""),
    ]);
    let (code, v, _) = cfg_json();
    assert_eq!(code, 0);
    assert_eq!(v["seats"]["value"], 2);
    assert_eq!(v["seats"]["source"], "default");
    assert!(v["seed"]["value"].is_null());
    assert_eq!(v["evaluator"]["value"], "legacy");
}

#[test]
#[serial]
fn file_values_are_overridden_by_env() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("pokergym.toml");
    fs::write(
        &path,
        "seats = 4\nseed = 10\nbig_blind = 50\nsmall_blind = 25\nevaluator = \"standard\"\n",
    )
    .unwrap();
    let path_str = path.to_string_lossy().into_owned();
    let _g = EnvGuard::apply(&[("POKERGYM_CONFIG", path_str.as_str()), ("POKERGYM_SEED", "99")]);

    let (code, v, err) = cfg_json();
    assert_eq!(code, 0, "stderr: {}", err);
    assert_eq!(v["seats"]["value"], 4);
    assert_eq!(v["seats"]["source"], "file");
    assert_eq!(v["big_blind"]["value"], 50);
    assert_eq!(v["evaluator"]["value"], "standard");
    assert_eq!(v["seed"]["value"], 99);
    assert_eq!(v["seed"]["source"], "env");
    assert_eq!(v["endowment"]["source"], "default");
}

#[test]
#[serial]
fn configured_seed_and_seats_drive_deal() {
    let _g = EnvGuard::apply(&[
        ("POKERGYM_CONFIG", ""),
        ("POKERGYM_SEED", "8"),
        ("POKERGYM_SEATS", "5"),
    ]);
    let mut a = Vec::new();
    let mut b = Vec::new();
    assert_eq!(run(["pokergym", "deal"], &mut a, &mut Vec::new()), 0);
    assert_eq!(run(["pokergym", "deal", "--seed", "8"], &mut b, &mut Vec::new()), 0);
    assert_eq!(a, b);
    let v: serde_json::Value = serde_json::from_slice(&a).unwrap();
    assert_eq!(v["seats"].as_array().unwrap().len(), 5);
}

#[test]
#[serial]
fn bad_env_value_fails_every_command() {
    let _g = EnvGuard::apply(&[("POKERGYM_CONFIG", ""), ("POKERGYM_SEATS", "many")]);
    let (code, _, err) = cfg_json();
    assert_eq!(code, 2);
    assert!(err.contains("Invalid seats"));
}

#[test]
#[serial]
fn unreadable_config_file_is_reported() {
    let dir = tempfile::tempdir().unwrap();
    let missing = dir.path().join("absent.toml");
    let missing_str = missing.to_string_lossy().into_owned();
    let _g = EnvGuard::apply(&[("POKERGYM_CONFIG", missing_str.as_str())]);
    let (code, _, err) = cfg_json();
    assert_eq!(code, 2);
    assert!(err.contains("Configuration error"));
}
