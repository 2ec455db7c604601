use pokergym_cli::run;

fn run_cli(args: &[&str]) -> (i32, String, String) {
    let mut out = Vec::new();
    let mut err = Vec::new();
    let code = run(args, &mut out, &mut err);
    (
        code,
        String::from_utf8_lossy(&out).into_owned(),
        String::from_utf8_lossy(&err).into_owned(),
    )
}

#[test]
fn help_goes_to_stdout_and_succeeds() {
    let (code, out, err) = run_cli(&["pokergym", "--help"]);
    assert_eq!(code, 0);
    assert!(out.contains("train"));
    assert!(out.contains("sim"));
    assert!(err.is_empty());
}

#[test]
fn unknown_command_lists_commands_and_exits_2() {
    let (code, out, err) = run_cli(&["pokergym", "shuffle"]);
    assert_eq!(code, 2);
    assert!(out.is_empty());
    assert!(err.contains("Commands:"));
    for c in ["train", "sim", "deal", "cfg"] {
        assert!(err.contains(c), "missing {} in usage", c);
    }
}

#[test]
fn missing_required_flag_is_an_error() {
    let (code, _, err) = run_cli(&["pokergym", "sim"]);
    assert_eq!(code, 2);
    assert!(err.contains("--hands"));
}

#[test]
fn deal_is_deterministic_for_a_seed() {
    let (code_a, a, _) = run_cli(&["pokergym", "deal", "--seed", "7", "--seats", "4"]);
    let (code_b, b, _) = run_cli(&["pokergym", "deal", "--seed", "7", "--seats", "4"]);
    assert_eq!((code_a, code_b), (0, 0));
    assert_eq!(a, b);

    let v: serde_json::Value = serde_json::from_str(&a).unwrap();
    assert_eq!(v["seats"].as_array().unwrap().len(), 4);
    assert_eq!(v["street"], "Preflop");
    assert!(v["community"].as_array().unwrap().is_empty());
}

#[test]
fn deal_rejects_a_one_seat_table() {
    let (code, out, err) = run_cli(&["pokergym", "deal", "--seed", "1", "--seats", "1"]);
    assert_eq!(code, 2);
    assert!(out.is_empty());
    assert!(err.starts_with("Error:"));
}
