use assert_cmd::cargo::cargo_bin_cmd;
use predicates::prelude::*;

#[test]
fn prints_samples_by_default() {
    let mut cmd = cargo_bin_cmd!("chem-formula");

    let output_pred = predicate::str::contains("H2O => H:2,O:1")
        .and(predicate::str::contains("Cu(OH)2 => Cu:1,O:2,H:2"))
        .and(predicate::str::contains("C2H5OH => C:2,H:6,O:1"));

    cmd.assert().success().stdout(output_pred);
}

#[test]
fn parses_given_formulas() {
    let mut cmd = cargo_bin_cmd!("chem-formula");
    cmd.arg("NaCl").arg("(NH4)2SO4");

    cmd.assert()
        .success()
        .stdout(predicate::eq("NaCl => Na:1,Cl:1\n(NH4)2SO4 => N:2,H:8,S:1,O:4\n"));
}

#[test]
fn fails_on_malformed_formula() {
    let mut cmd = cargo_bin_cmd!("chem-formula");
    cmd.arg("H2O").arg("Cu(OH");

    cmd.assert()
        .failure()
        .stdout(predicate::str::contains("H2O => H:2,O:1"))
        .stdout(predicate::str::contains("Cu(OH => error: unmatched '(' at byte 2"));
}

#[test]
fn depth_flag_limits_nesting() {
    let mut cmd = cargo_bin_cmd!("chem-formula");
    cmd.arg("--max-depth").arg("1").arg("((H))");

    cmd.assert()
        .failure()
        .stdout(predicate::str::contains("exceeds the nesting limit of 1"));
}
