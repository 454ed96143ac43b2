mod common;
use crate::common::*;
use assert_cmd::prelude::*;
use predicates::prelude::*;
use ofxconnect::cli::BuildInfo;

#[test]
fn version_json_cmd() -> Result<()> {
    let mut cmd = mk_cmd()?;
    let assert = cmd.args(["-f", "json"]).arg("version").assert();

    let res = serde_json::from_slice::<serde_json::Value>(
        assert.success().stderr("").get_output().stdout.as_slice(),
    )?;
    assert!(res.get("build_version").is_some());
    assert!(res.get("rustc_version").is_some());
    Ok(())
}

#[test]
fn version_default_cmd() -> Result<()> {
    let cmd = mk_cmd()?.arg("version").unwrap();
    let info = BuildInfo::default();
    cmd.assert()
        .stderr("")
        .stdout(predicate::str::is_match(format!("Version: {}", info.build_version)).unwrap());
    Ok(())
}
