use assert_cmd::Command;

pub type Result<T> = std::result::Result<T, Box<dyn std::error::Error>>;

pub fn mk_cmd() -> Result<Command> {
    let mut cmd = Command::cargo_bin("ofxconnect")?;
    cmd.env_remove("RUST_LOG");
    Ok(cmd)
}
